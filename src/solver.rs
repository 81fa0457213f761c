//! The two search engines: best-first (A*-style) and iterative deepening
//! (IDA*-style).
//!
//! Both engines take a starting board and a heuristic, build their own
//! search tree in a `NodeArena`, and return the move sequence from the start
//! to the solved configuration. Neither engine ever mutates the caller's
//! board: every successor is generated with the pure `Puzzle::apply`.
//!
//! With an admissible heuristic in optimal mode (priorities include depth),
//! the first goal either engine reaches is a minimum-length solution. In
//! fast mode (h only) completeness still holds but optimality does not.
use crate::engine::{Move, Puzzle};
use crate::heuristics::Heuristic;
use crate::node::{NodeArena, NodeId, PuzzleNode};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

/// A successful search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Moves from the starting board to the solved board, in application
    /// order.
    pub moves: Vec<Move>,
    /// Number of nodes popped and processed (best-first) or expanded across
    /// all iterations (iterative deepening). Informational.
    pub nodes_expanded: u64,
    /// The bound schedule of the iterative-deepening engine, one entry per
    /// outer iteration. Empty for best-first search.
    pub bounds: Vec<u32>,
}

impl Solution {
    /// Solution length in moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True for the degenerate already-solved case.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// The ways a search can fail without producing a move sequence.
///
/// Normal search progress (pruning, dedup) never raises an error; these only
/// occur at the boundaries of what the engines can promise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// The frontier (or the dedup-bounded reachable space) was exhausted
    /// without finding the goal. On a well-formed board this means the
    /// scramble was parity-infeasible.
    FrontierExhausted,
    /// The iterative-deepening bound schedule passed the caller's safety
    /// limit.
    BoundLimitExceeded { limit: u32 },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::FrontierExhausted => {
                write!(f, "search space exhausted without reaching the goal")
            }
            SolveError::BoundLimitExceeded { limit } => {
                write!(f, "deepening bound exceeded the safety limit {}", limit)
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Solves `start` with best-first graph search.
///
/// The frontier is a binary heap keyed by `(priority, insertion sequence)`,
/// so equal-priority nodes pop in insertion order and repeated runs explore
/// identically. Dedup happens at pop time: a configuration may sit in the
/// frontier several times, reached by paths of different lengths, and only
/// its best-priority copy is ever expanded — later copies are skipped. The
/// first discovery of a state is not always via its cheapest path, so
/// discarding duplicates when they are *generated* would lock in the
/// longer path and break the optimality guarantee.
///
/// Each configuration is expanded at most once, which bounds the frontier
/// and guarantees termination on the finite reachable space.
///
/// # Returns
/// * `Ok(Solution)` with the root-to-goal moves once a goal node is popped.
/// * `Err(SolveError::FrontierExhausted)` if the frontier empties first.
pub fn solve_best_first(start: &Puzzle, heuristic: &Heuristic) -> Result<Solution, SolveError> {
    let mut arena = NodeArena::with_root(start.clone());
    let mut expanded: HashSet<Puzzle> = HashSet::new();

    let mut frontier: BinaryHeap<Reverse<(u32, u64, NodeId)>> = BinaryHeap::new();
    let mut sequence = 0u64;
    let root = arena.root();
    frontier.push(Reverse((heuristic.evaluate(arena.get(root)), sequence, root)));

    let mut nodes_expanded = 0u64;

    while let Some(Reverse((_, _, id))) = frontier.pop() {
        if !expanded.insert(arena.get(id).puzzle().clone()) {
            continue;
        }
        nodes_expanded += 1;

        if arena.get(id).is_goal() {
            return Ok(Solution {
                moves: arena.path_moves(id),
                nodes_expanded,
                bounds: Vec::new(),
            });
        }

        for child in arena.expand(id) {
            let node = arena.get(child);
            if expanded.contains(node.puzzle()) {
                continue;
            }
            let priority = heuristic.evaluate(node);
            sequence += 1;
            frontier.push(Reverse((priority, sequence, child)));
        }
    }

    Err(SolveError::FrontierExhausted)
}

/// Solves `start` with iterative-deepening depth-first search.
///
/// The outer bound starts at the root's evaluation and, after an iteration
/// that fails, rises to the minimum evaluator value seen among the pruned
/// nodes (never a blind `+1`). With `Heuristic::Naive` the evaluation is the
/// depth, so the schedule degenerates to 0, 1, 2, ... and the engine behaves
/// as plain iterative-deepening search.
///
/// Each iteration runs a fresh bounded DFS with its own visited structure
/// mapping configurations to the shallowest depth at which this iteration
/// reached them; a state re-reached no shallower is pruned. States are
/// revisited *across* iterations by design: that recomputation is the memory
/// cost IDA* trades away against best-first search.
///
/// `bound_limit` is an optional safety cap: the engine gives up with
/// `SolveError::BoundLimitExceeded` rather than deepening past it, which is
/// the recommended guard when the scramble might be parity-infeasible. An
/// iteration that prunes nothing and finds no goal has exhausted the
/// reachable space and reports `FrontierExhausted`.
pub fn solve_iterative_deepening(
    start: &Puzzle,
    heuristic: &Heuristic,
    bound_limit: Option<u32>,
) -> Result<Solution, SolveError> {
    let mut bound = heuristic.evaluate(&PuzzleNode::root(start.clone()));
    let mut bounds = Vec::new();
    let mut nodes_expanded = 0u64;

    loop {
        if let Some(limit) = bound_limit {
            if bound > limit {
                return Err(SolveError::BoundLimitExceeded { limit });
            }
        }
        bounds.push(bound);

        let mut arena = NodeArena::with_root(start.clone());
        let mut visited: HashMap<Puzzle, u32> = HashMap::new();
        visited.insert(start.clone(), 0);

        let root = arena.root();
        match bounded_dfs(
            &mut arena,
            root,
            bound,
            heuristic,
            &mut visited,
            &mut nodes_expanded,
        ) {
            Dfs::Found(goal) => {
                return Ok(Solution {
                    moves: arena.path_moves(goal),
                    nodes_expanded,
                    bounds,
                });
            }
            Dfs::Pruned(next) if next == u32::MAX => return Err(SolveError::FrontierExhausted),
            Dfs::Pruned(next) => {
                debug_assert!(next > bound, "bound must rise between iterations");
                bound = next;
            }
        }
    }
}

// Outcome of one bounded DFS subtree: either the goal's arena handle, or
// the minimum evaluator value among the subtree's pruned nodes (u32::MAX if
// nothing was pruned).
enum Dfs {
    Found(NodeId),
    Pruned(u32),
}

fn bounded_dfs(
    arena: &mut NodeArena,
    id: NodeId,
    bound: u32,
    heuristic: &Heuristic,
    visited: &mut HashMap<Puzzle, u32>,
    nodes_expanded: &mut u64,
) -> Dfs {
    let node = arena.get(id);
    let score = heuristic.evaluate(node);
    if score > bound {
        return Dfs::Pruned(score);
    }
    if node.is_goal() {
        return Dfs::Found(id);
    }

    *nodes_expanded += 1;
    let mut min_pruned = u32::MAX;

    for child in arena.expand(id) {
        let (puzzle, depth) = {
            let node = arena.get(child);
            (node.puzzle().clone(), node.depth())
        };
        // Skip states this iteration already reached at least as shallow;
        // a strictly shallower re-entry is re-explored to keep solutions
        // within the bound reachable.
        if let Some(&seen) = visited.get(&puzzle) {
            if seen <= depth {
                continue;
            }
        }
        visited.insert(puzzle, depth);

        match bounded_dfs(arena, child, bound, heuristic, visited, nodes_expanded) {
            Dfs::Found(goal) => return Dfs::Found(goal),
            Dfs::Pruned(value) => min_pruned = min_pruned.min(value),
        }
    }

    Dfs::Pruned(min_pruned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    // True minimal distances for every state reachable from solved, by
    // breadth-first enumeration of the whole space.
    fn exact_distances(rows: usize, cols: usize) -> HashMap<Puzzle, u32> {
        let goal = Puzzle::new(rows, cols);
        let mut distances = HashMap::new();
        distances.insert(goal.clone(), 0u32);
        let mut queue = VecDeque::from([goal]);
        while let Some(puzzle) = queue.pop_front() {
            let d = distances[&puzzle];
            for mv in puzzle.valid_moves() {
                let next = puzzle.apply(mv).expect("valid move applies");
                if !distances.contains_key(&next) {
                    distances.insert(next.clone(), d + 1);
                    queue.push_back(next);
                }
            }
        }
        distances
    }

    fn apply_all(start: &Puzzle, moves: &[Move]) -> Puzzle {
        let mut puzzle = start.clone();
        for &mv in moves {
            assert!(puzzle.apply_in_place(mv), "solution contained illegal move");
        }
        puzzle
    }

    // Shorthand for the admissible, optimal-mode evaluators.
    fn optimal_heuristics() -> Vec<Heuristic> {
        vec![
            Heuristic::Naive,
            Heuristic::OutOfPlace { optimal: true },
            Heuristic::Manhattan { optimal: true },
            Heuristic::LinearConflict { optimal: true },
        ]
    }

    #[test]
    fn test_best_first_already_solved() {
        let solved = Puzzle::new(3, 3);
        let solution =
            solve_best_first(&solved, &Heuristic::Manhattan { optimal: true }).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.nodes_expanded, 1);
    }

    #[test]
    fn test_best_first_single_move_scramble() {
        // [0, 1, blank, 2] needs exactly the move that slides tile 2 back.
        let scrambled = Puzzle::new(2, 2).apply(Move::Right).unwrap();
        for heuristic in optimal_heuristics() {
            let solution = solve_best_first(&scrambled, &heuristic).unwrap();
            assert_eq!(solution.len(), 1, "{:?}", heuristic);
            assert!(apply_all(&scrambled, &solution.moves).is_goal());
        }
    }

    #[test]
    fn test_best_first_path_validity() {
        let start = Puzzle::new_scrambled_with_seed(3, 3, 25, 42);
        let solution =
            solve_best_first(&start, &Heuristic::LinearConflict { optimal: true }).unwrap();
        assert!(apply_all(&start, &solution.moves).is_goal());
    }

    #[test]
    fn test_best_first_optimal_mode_bounded_by_scramble() {
        // A board scrambled by k legal moves can always be solved in <= k.
        for seed in 0..5 {
            let start = Puzzle::new_scrambled_with_seed(3, 3, 5, seed);
            let solution =
                solve_best_first(&start, &Heuristic::Manhattan { optimal: true }).unwrap();
            assert!(solution.len() <= 5, "seed {}: {} moves", seed, solution.len());
        }
    }

    #[test]
    fn test_optimal_heuristics_agree_on_length() {
        // All admissible evaluators in optimal mode must find equally short
        // solutions; Naive best-first is the brute-force reference.
        let start = Puzzle::new_scrambled_with_seed(2, 3, 30, 7);
        let reference = solve_best_first(&start, &Heuristic::Naive).unwrap().len();
        for heuristic in optimal_heuristics() {
            let solution = solve_best_first(&start, &heuristic).unwrap();
            assert_eq!(solution.len(), reference, "{:?}", heuristic);
        }
    }

    #[test]
    fn test_admissibility_on_small_boards() {
        // Neither informed estimate may exceed the true optimum, state by
        // state, across a batch of small scrambles.
        for seed in 0..10 {
            let start = Puzzle::new_scrambled_with_seed(2, 2, 11, seed);
            let truth = solve_best_first(&start, &Heuristic::Naive).unwrap().len() as u32;
            let root = PuzzleNode::root(start);
            assert!(Heuristic::OutOfPlace { optimal: false }.evaluate(&root) <= truth);
            assert!(Heuristic::Manhattan { optimal: false }.evaluate(&root) <= truth);
            assert!(Heuristic::LinearConflict { optimal: false }.evaluate(&root) <= truth);
        }
    }

    #[test]
    fn test_best_first_optimal_on_deep_state() {
        // A distance-17 state of the 2x3 space. Discarding a duplicate at
        // generation time instead of pop time locks in a 19-move path here,
        // because the first discovery of an intermediate state is not via
        // its cheapest route.
        let start = Puzzle::from_grid(2, 3, vec![4, 2, 0, 1, 5, 3]).unwrap();
        for heuristic in [
            Heuristic::OutOfPlace { optimal: true },
            Heuristic::Manhattan { optimal: true },
            Heuristic::LinearConflict { optimal: true },
        ] {
            let solution = solve_best_first(&start, &heuristic).unwrap();
            assert_eq!(solution.len(), 17, "{:?}", heuristic);
            assert!(apply_all(&start, &solution.moves).is_goal());
        }
    }

    #[test]
    fn test_both_engines_exact_on_full_2x2_space() {
        let distances = exact_distances(2, 2);
        assert_eq!(distances.len(), 12);
        for (puzzle, &d) in &distances {
            for heuristic in optimal_heuristics() {
                let bf = solve_best_first(puzzle, &heuristic).unwrap();
                assert_eq!(bf.len() as u32, d, "best-first {:?} on {:?}", heuristic, puzzle);
                let ids = solve_iterative_deepening(puzzle, &heuristic, None).unwrap();
                assert_eq!(ids.len() as u32, d, "deepening {:?} on {:?}", heuristic, puzzle);
            }
        }
    }

    #[test]
    fn test_both_engines_exact_on_full_2x3_space() {
        // 6!/2 = 360 reachable states, max distance 21.
        let distances = exact_distances(2, 3);
        assert_eq!(distances.len(), 360);
        let heuristic = Heuristic::Manhattan { optimal: true };
        for (puzzle, &d) in &distances {
            let bf = solve_best_first(puzzle, &heuristic).unwrap();
            assert_eq!(bf.len() as u32, d, "best-first on {:?}", puzzle);
            let ids = solve_iterative_deepening(puzzle, &heuristic, None).unwrap();
            assert_eq!(ids.len() as u32, d, "deepening on {:?}", puzzle);
        }
    }

    #[test]
    fn test_best_first_dedup_bounds_expansion() {
        // The 2x2 puzzle has 4!/2 = 12 reachable configurations; dedup means
        // no configuration is ever expanded twice, so the count is capped.
        let start = Puzzle::new_scrambled_with_seed(2, 2, 50, 3);
        let solution = solve_best_first(&start, &Heuristic::Naive).unwrap();
        assert!(
            solution.nodes_expanded <= 12,
            "expanded {} nodes on a 12-state space",
            solution.nodes_expanded
        );
    }

    #[test]
    fn test_best_first_deterministic_across_runs() {
        let start = Puzzle::new_scrambled_with_seed(3, 3, 18, 11);
        let heuristic = Heuristic::Manhattan { optimal: true };
        let first = solve_best_first(&start, &heuristic).unwrap();
        let second = solve_best_first(&start, &heuristic).unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(first.nodes_expanded, second.nodes_expanded);
        assert_eq!(first.moves, second.moves);
    }

    #[test]
    fn test_best_first_fast_mode_still_solves() {
        let start = Puzzle::new_scrambled_with_seed(3, 3, 30, 9);
        let optimal =
            solve_best_first(&start, &Heuristic::Manhattan { optimal: true }).unwrap();
        let fast = solve_best_first(&start, &Heuristic::Manhattan { optimal: false }).unwrap();
        assert!(apply_all(&start, &fast.moves).is_goal());
        // Fast mode forfeits the optimality guarantee but never beats it.
        assert!(fast.len() >= optimal.len());
    }

    #[test]
    fn test_best_first_reports_frontier_exhausted() {
        // Swapping one tile pair flips permutation parity: unreachable from
        // solved, so the finite dedup'd space drains without a goal.
        let unsolvable = Puzzle::from_grid(2, 2, vec![1, 0, 2, 3]).unwrap();
        let result = solve_best_first(&unsolvable, &Heuristic::Manhattan { optimal: true });
        assert_eq!(result, Err(SolveError::FrontierExhausted));
    }

    #[test]
    fn test_ids_already_solved() {
        let solved = Puzzle::new(2, 2);
        let solution = solve_iterative_deepening(&solved, &Heuristic::Naive, None).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.bounds, vec![0]);
    }

    #[test]
    fn test_ids_naive_bound_schedule_counts_up() {
        let start = Puzzle::new_scrambled_with_seed(2, 3, 14, 2);
        let solution = solve_iterative_deepening(&start, &Heuristic::Naive, None).unwrap();
        // Depth-bounded deepening raises the bound by exactly one per
        // iteration and stops at the solution length.
        let expected: Vec<u32> = (0..=solution.len() as u32).collect();
        assert_eq!(solution.bounds, expected);
        assert!(apply_all(&start, &solution.moves).is_goal());
    }

    #[test]
    fn test_ids_heuristic_bound_schedule_monotonic() {
        let start = Puzzle::new_scrambled_with_seed(3, 3, 22, 13);
        let heuristic = Heuristic::LinearConflict { optimal: true };
        let solution = solve_iterative_deepening(&start, &heuristic, None).unwrap();
        for pair in solution.bounds.windows(2) {
            assert!(pair[0] < pair[1], "bounds must strictly increase");
        }
        let root = PuzzleNode::root(start.clone());
        assert_eq!(solution.bounds[0], heuristic.evaluate(&root));
        assert!(apply_all(&start, &solution.moves).is_goal());
    }

    #[test]
    fn test_ids_matches_best_first_length_in_optimal_mode() {
        for seed in 0..5 {
            let start = Puzzle::new_scrambled_with_seed(3, 3, 12, seed);
            let heuristic = Heuristic::Manhattan { optimal: true };
            let a = solve_best_first(&start, &heuristic).unwrap();
            let b = solve_iterative_deepening(&start, &heuristic, None).unwrap();
            assert_eq!(a.len(), b.len(), "seed {}", seed);
        }
    }

    #[test]
    fn test_ids_bound_limit_is_enforced() {
        // A board needing 17 moves cannot finish under bound 2.
        let start = Puzzle::from_grid(2, 3, vec![4, 2, 0, 1, 5, 3]).unwrap();
        let result = solve_iterative_deepening(&start, &Heuristic::Naive, Some(2));
        assert_eq!(result, Err(SolveError::BoundLimitExceeded { limit: 2 }));
    }

    #[test]
    fn test_ids_reports_exhaustion_on_unsolvable_board() {
        let unsolvable = Puzzle::from_grid(2, 2, vec![1, 0, 2, 3]).unwrap();
        let result = solve_iterative_deepening(&unsolvable, &Heuristic::Naive, Some(100));
        assert_eq!(result, Err(SolveError::FrontierExhausted));
    }
}
