//! Heuristic evaluators for the sliding-tile search engines.
//!
//! Every evaluator maps a search node to a non-negative integer cost
//! estimate. The best-first engine uses the value as its priority-queue key
//! (lower is explored first); the iterative-deepening engine uses it as the
//! bound test value.
//!
//! The informed evaluators carry an `optimal` flag: when set, the evaluator
//! adds the node's depth to the estimate, turning it into a full-path cost
//! (g + h) suitable for optimal A*/IDA*. When clear, the evaluator returns
//! the pure remaining-cost estimate (h only), which biases the search toward
//! the goal and typically finds solutions faster, at the price of any
//! optimality guarantee.
use crate::engine::Puzzle;
use crate::node::PuzzleNode;

/// The closed set of evaluator families.
///
/// All variants are admissible in optimal mode: none overestimates the true
/// minimal number of remaining moves.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::{Move, Puzzle};
/// use npuzzle_solver::heuristics::Heuristic;
/// use npuzzle_solver::node::PuzzleNode;
///
/// // One move away from solved: every informed estimate is exactly 1.
/// let scrambled = Puzzle::new(2, 2).apply(Move::Right).unwrap();
/// let node = PuzzleNode::root(scrambled);
/// assert_eq!(Heuristic::OutOfPlace { optimal: false }.evaluate(&node), 1);
/// assert_eq!(Heuristic::Manhattan { optimal: false }.evaluate(&node), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Uninformed: the node's depth alone. Turns best-first search into
    /// uniform-cost (brute-force breadth-ordered) search and the deepening
    /// engine into plain iterative-deepening DFS.
    Naive,
    /// Number of non-blank tiles not on their goal cell.
    OutOfPlace { optimal: bool },
    /// Sum of horizontal plus vertical distances of every non-blank tile
    /// from its goal cell.
    Manhattan { optimal: bool },
    /// Manhattan distance plus a linear-conflict correction: 2 for every
    /// pair of tiles that share a goal line with each other and with their
    /// current line, but sit in reversed relative order.
    LinearConflict { optimal: bool },
}

impl Heuristic {
    /// Evaluates `node`, including its depth whenever the variant's
    /// `optimal` flag is set (the naive evaluator *is* the depth).
    pub fn evaluate(&self, node: &PuzzleNode) -> u32 {
        match *self {
            Heuristic::Naive => node.depth(),
            Heuristic::OutOfPlace { optimal } => {
                out_of_place(node) + if optimal { node.depth() } else { 0 }
            }
            Heuristic::Manhattan { optimal } => {
                manhattan(node) + if optimal { node.depth() } else { 0 }
            }
            Heuristic::LinearConflict { optimal } => {
                let puzzle = node.puzzle();
                manhattan(node)
                    + 2 * (row_conflicts(puzzle) + col_conflicts(puzzle))
                    + if optimal { node.depth() } else { 0 }
            }
        }
    }

    /// True iff the evaluator reports g + h rather than h alone. The naive
    /// evaluator is pure depth and therefore always a full-path value.
    pub fn is_optimal(&self) -> bool {
        match *self {
            Heuristic::Naive => true,
            Heuristic::OutOfPlace { optimal }
            | Heuristic::Manhattan { optimal }
            | Heuristic::LinearConflict { optimal } => optimal,
        }
    }
}

fn out_of_place(node: &PuzzleNode) -> u32 {
    let puzzle = node.puzzle();
    let blank = puzzle.blank_value();
    puzzle
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(i, &v)| v != blank && v as usize != i)
        .count() as u32
}

fn manhattan(node: &PuzzleNode) -> u32 {
    let puzzle = node.puzzle();
    let (_, cols) = puzzle.size();
    let blank = puzzle.blank_value();
    let mut total = 0u32;
    for (i, &v) in puzzle.tiles().iter().enumerate() {
        if v == blank {
            continue;
        }
        let (row, col) = (i / cols, i % cols);
        let (goal_row, goal_col) = (v as usize / cols, v as usize % cols);
        total += row.abs_diff(goal_row) as u32;
        total += col.abs_diff(goal_col) as u32;
    }
    total
}

// Count, for every row, the pairs of tiles whose goal row is that row but
// whose left-to-right order disagrees with their goal order. An exact
// pairwise inversion count; approximations would break admissibility.
fn row_conflicts(puzzle: &Puzzle) -> u32 {
    let (rows, cols) = puzzle.size();
    let blank = puzzle.blank_value();
    let mut conflicts = 0;
    let mut line = Vec::with_capacity(cols);
    for row in 0..rows {
        line.clear();
        for col in 0..cols {
            let v = puzzle.tiles()[row * cols + col];
            if v != blank && v as usize / cols == row {
                line.push(v);
            }
        }
        conflicts += inversions(&line);
    }
    conflicts
}

// Symmetric scan for columns, keeping tiles whose goal column is the current
// column; same-goal-column tiles order by value exactly as by goal row.
fn col_conflicts(puzzle: &Puzzle) -> u32 {
    let (rows, cols) = puzzle.size();
    let blank = puzzle.blank_value();
    let mut conflicts = 0;
    let mut line = Vec::with_capacity(rows);
    for col in 0..cols {
        line.clear();
        for row in 0..rows {
            let v = puzzle.tiles()[row * cols + col];
            if v != blank && v as usize % cols == col {
                line.push(v);
            }
        }
        conflicts += inversions(&line);
    }
    conflicts
}

fn inversions(line: &[u8]) -> u32 {
    let mut count = 0;
    for i in 0..line.len() {
        for j in i + 1..line.len() {
            if line[i] > line[j] {
                count += 1;
            }
        }
    }
    count
}
