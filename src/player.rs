//! Caller-facing play drivers built on top of the search engines.
//!
//! [`Player`] owns a board and solves it either all at once or one move at a
//! time, planning lazily with the configured engine. [`RandomPlayer`] ignores
//! heuristics entirely and just makes legal moves at random, which is handy as
//! a baseline and for exercising the move generator.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Move, Puzzle};
use crate::heuristics::Heuristic;
use crate::solver::{solve_best_first, solve_iterative_deepening, SolveError};

/// Which search engine a [`Player`] plans with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    /// Best-first search over a priority queue ordered by the heuristic.
    BestFirst,
    /// Iterative deepening with the bound raised to the minimum pruned value.
    IterativeDeepening,
}

/// Statistics gathered while solving, reported by [`Player::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    /// Number of moves in the plan produced by the last planning pass.
    pub solution_length: u64,
    /// Nodes popped or recursed into by the engine while planning.
    pub nodes_expanded: u64,
}

/// Drives a board toward the goal using one of the search engines.
///
/// Planning is lazy: nothing is searched until [`Player::step`] or
/// [`Player::solve`] is called, and a finished plan is replayed move by move
/// without searching again.
pub struct Player {
    puzzle: Puzzle,
    engine: Engine,
    heuristic: Heuristic,
    bound_limit: Option<u32>,
    plan: VecDeque<Move>,
    stats: PlayerStats,
}

impl Player {
    /// Creates a player that will solve `puzzle` with the given engine and
    /// heuristic.
    ///
    /// # Examples
    ///
    /// ```
    /// use npuzzle_solver::engine::Puzzle;
    /// use npuzzle_solver::heuristics::Heuristic;
    /// use npuzzle_solver::player::{Engine, Player};
    ///
    /// let puzzle = Puzzle::new_scrambled_with_seed(3, 3, 10, 7);
    /// let mut player = Player::new(puzzle, Engine::BestFirst, Heuristic::Manhattan { optimal: true });
    /// player.solve().unwrap();
    /// assert!(player.puzzle().is_goal());
    /// ```
    pub fn new(puzzle: Puzzle, engine: Engine, heuristic: Heuristic) -> Self {
        Player {
            puzzle,
            engine,
            heuristic,
            bound_limit: None,
            plan: VecDeque::new(),
            stats: PlayerStats::default(),
        }
    }

    /// Caps the deepening schedule when planning with
    /// [`Engine::IterativeDeepening`]. Ignored by the best-first engine.
    pub fn with_bound_limit(mut self, limit: u32) -> Self {
        self.bound_limit = Some(limit);
        self
    }

    /// The board in its current (possibly partially solved) state.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Statistics from the most recent planning pass.
    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    /// Applies the next move of the plan, searching first if no plan exists.
    ///
    /// Returns the move that was applied, or `None` if the board is already
    /// at the goal.
    pub fn step(&mut self) -> Result<Option<Move>, SolveError> {
        if self.plan.is_empty() {
            if self.puzzle.is_goal() {
                return Ok(None);
            }
            self.plan()?;
        }
        match self.plan.pop_front() {
            Some(mv) => {
                self.puzzle.apply_in_place(mv);
                Ok(Some(mv))
            }
            None => Ok(None),
        }
    }

    /// Plans (if necessary) and applies every remaining move.
    pub fn solve(&mut self) -> Result<(), SolveError> {
        while self.step()?.is_some() {}
        Ok(())
    }

    // Runs the configured engine from the current board state.
    fn plan(&mut self) -> Result<(), SolveError> {
        let solution = match self.engine {
            Engine::BestFirst => solve_best_first(&self.puzzle, &self.heuristic)?,
            Engine::IterativeDeepening => {
                solve_iterative_deepening(&self.puzzle, &self.heuristic, self.bound_limit)?
            }
        };
        self.stats = PlayerStats {
            solution_length: solution.moves.len() as u64,
            nodes_expanded: solution.nodes_expanded,
        };
        self.plan = solution.moves.into();
        Ok(())
    }
}

/// Makes uniformly random legal moves. Never plans, never finishes on
/// purpose.
pub struct RandomPlayer {
    puzzle: Puzzle,
    rng: SmallRng,
}

impl RandomPlayer {
    /// Creates a random player seeded from system entropy.
    pub fn new(puzzle: Puzzle) -> Self {
        RandomPlayer {
            puzzle,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a random player with a fixed seed, for reproducible runs.
    pub fn with_seed(puzzle: Puzzle, seed: u64) -> Self {
        RandomPlayer {
            puzzle,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// The board in its current state.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Applies one legal move chosen uniformly at random.
    pub fn step(&mut self) -> Move {
        let moves = self.puzzle.valid_moves();
        let mv = moves[self.rng.gen_range(0..moves.len())];
        self.puzzle.apply_in_place(mv);
        mv
    }

    /// Applies `count` random moves.
    pub fn play(&mut self, count: u32) {
        for _ in 0..count {
            self.step();
        }
    }
}
