//! # N-Puzzle Solver Library
//!
//! This library provides the core board mechanics for the m x n sliding-tile
//! puzzle and two informed search engines (best-first and iterative
//! deepening) for finding move sequences to the goal configuration.
//!
//! It is used by two binaries:
//! - `human_player`: Allows interactive play via the command line.
//! - `ai_solver`: Scrambles or parses a board, solves it with a chosen
//!   engine and heuristic, and reports the moves and search statistics.
//!
//! ## Modules
//! - `engine`: The board representation (`Puzzle`), move type (`Move`),
//!   move generation, scrambling, and rendering.
//! - `node`: Search-tree bookkeeping (`PuzzleNode`, `NodeArena`) shared by
//!   both engines, including path reconstruction.
//! - `heuristics`: The `Heuristic` evaluators (naive, out-of-place,
//!   Manhattan, Manhattan plus linear conflict), each with an optimal mode.
//! - `solver`: The `solve_best_first` and `solve_iterative_deepening`
//!   engines and their shared `Solution` / `SolveError` types.
//! - `player`: Step-wise and random play drivers built on the engines.
//! - `utils`: Board parsing from text and the solvability parity check.

pub mod engine;
pub mod heuristics;
pub mod node;
pub mod player;
pub mod solver;
pub mod utils;

// Items from sub-modules, if public, should be accessed via their full path,
// e.g., `npuzzle_solver::solver::solve_best_first()`. This keeps the
// top-level library namespace cleaner.
