//! Core board model for the m x n sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: The four directions a neighboring tile can slide into the blank.
//! - `Puzzle`: The board itself, with move legality, pure and in-place move
//!   application, the goal test, and scrambling.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A single sliding move, named for the direction the *tile* travels.
///
/// `Move::Up` slides the tile below the blank upward into the blank,
/// `Move::Left` slides the tile to the right of the blank leftward, and so on.
/// A move is legal only when the named neighboring cell exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// The tile below the blank slides up.
    Up,
    /// The tile above the blank slides down.
    Down,
    /// The tile right of the blank slides left.
    Left,
    /// The tile left of the blank slides right.
    Right,
}

impl Move {
    /// Returns the move that undoes this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use npuzzle_solver::engine::Move;
    /// assert_eq!(Move::Up.opposite(), Move::Down);
    /// assert_eq!(Move::Left.opposite(), Move::Right);
    /// ```
    pub fn opposite(&self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", name)
    }
}

/// An m x n sliding-tile board.
///
/// Tiles are the values `0..rows*cols-2`; the blank is stored as the sentinel
/// value `rows*cols-1`. The board is solved when the grid, read row-major,
/// is `0, 1, ..., rows*cols-2` followed by the blank in the final cell.
///
/// Two puzzles are equal iff their dimensions and every cell match, and the
/// derived hash follows the same definition, so a `Puzzle` can key a
/// `HashSet`/`HashMap` directly for visited-state tracking.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Puzzle {
    rows: usize,
    cols: usize,
    grid: Vec<u8>,
    blank: usize,
}

impl Puzzle {
    /// Creates a new solved puzzle with the given dimensions.
    ///
    /// # Panics
    /// Panics if either dimension is below 2, or if `rows * cols` exceeds 256
    /// (the tile value range of the `u8` grid).
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Puzzle;
    /// let puzzle = Puzzle::new(3, 3);
    /// assert!(puzzle.is_goal());
    /// assert_eq!(puzzle.size(), (3, 3));
    /// ```
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 2 && cols >= 2, "Puzzle dimensions must be at least 2x2");
        assert!(rows * cols <= 256, "Puzzle larger than 256 cells is not supported");
        let size = rows * cols;
        let grid = (0..size).map(|i| i as u8).collect();
        Puzzle {
            rows,
            cols,
            grid,
            blank: size - 1,
        }
    }

    /// Builds a puzzle from an externally supplied row-major grid.
    ///
    /// The grid must be a permutation of `0..rows*cols-1` plus the blank
    /// sentinel `rows*cols-1`, i.e. every tile exactly once with exactly one
    /// blank. This checks the board invariants but *not* solvability; boards
    /// handed to a search engine should come from `scramble` or from
    /// `utils::puzzle_from_rows`, which additionally rejects parity-infeasible
    /// arrangements.
    ///
    /// # Returns
    /// * `Ok(Puzzle)` if the grid is a well-formed arrangement.
    /// * `Err(String)` describing the violated invariant otherwise.
    pub fn from_grid(rows: usize, cols: usize, grid: Vec<u8>) -> Result<Self, String> {
        if rows < 2 || cols < 2 {
            return Err(format!(
                "Puzzle dimensions must be at least 2x2, got {}x{}",
                rows, cols
            ));
        }
        let size = rows * cols;
        if size > 256 {
            return Err(format!("Puzzle of {} cells exceeds the 256-cell limit", size));
        }
        if grid.len() != size {
            return Err(format!(
                "Grid has {} cells, expected {} for a {}x{} puzzle",
                grid.len(),
                size,
                rows,
                cols
            ));
        }
        let mut seen = vec![false; size];
        for &value in &grid {
            let v = value as usize;
            if v >= size {
                return Err(format!("Tile value {} out of range for {} cells", v, size));
            }
            if seen[v] {
                return Err(format!("Tile value {} appears more than once", v));
            }
            seen[v] = true;
        }
        // Permutation of 0..size implies exactly one blank sentinel.
        let blank = grid
            .iter()
            .position(|&v| v as usize == size - 1)
            .expect("permutation contains the blank sentinel");
        Ok(Puzzle {
            rows,
            cols,
            grid,
            blank,
        })
    }

    /// Creates a puzzle scrambled by `moves` random legal moves from solved,
    /// seeded from system entropy.
    pub fn new_scrambled(rows: usize, cols: usize, moves: u32) -> Self {
        let mut puzzle = Puzzle::new(rows, cols);
        let mut rng = SmallRng::from_entropy();
        puzzle.scramble(moves, &mut rng);
        puzzle
    }

    /// Creates a puzzle scrambled by `moves` random legal moves from solved,
    /// using a seeded generator so the same seed always yields the same board.
    ///
    /// Because scrambling only ever applies legal moves, the result is
    /// guaranteed reachable from solved.
    pub fn new_scrambled_with_seed(rows: usize, cols: usize, moves: u32, seed: u64) -> Self {
        let mut puzzle = Puzzle::new(rows, cols);
        let mut rng = SmallRng::seed_from_u64(seed);
        puzzle.scramble(moves, &mut rng);
        puzzle
    }

    /// Returns the dimensions as `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the tile at column `x`, row `y` (indexed from the top-left),
    /// or `None` if the coordinates fall outside the grid. The blank reads as
    /// the sentinel value `rows * cols - 1`.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.cols && y < self.rows {
            Some(self.grid[y * self.cols + x])
        } else {
            None
        }
    }

    /// Returns the row-major cell values, blank sentinel included.
    pub fn tiles(&self) -> &[u8] {
        &self.grid
    }

    /// Returns the blank's position as a row-major index.
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// The sentinel value that marks the blank cell.
    pub fn blank_value(&self) -> u8 {
        (self.rows * self.cols - 1) as u8
    }

    /// Returns true iff the puzzle is in the solved configuration.
    pub fn is_goal(&self) -> bool {
        self.grid.iter().enumerate().all(|(i, &v)| v as usize == i)
    }

    /// Returns the currently legal moves, in the fixed order Up, Down,
    /// Right, Left filtered by bounds.
    ///
    /// Never empty for valid dimensions: the blank always has at least two
    /// neighbors on a board of 2x2 or larger.
    pub fn valid_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(4);
        if self.blank < (self.rows - 1) * self.cols {
            moves.push(Move::Up);
        }
        if self.blank >= self.cols {
            moves.push(Move::Down);
        }
        if self.blank % self.cols > 0 {
            moves.push(Move::Right);
        }
        if self.blank % self.cols < self.cols - 1 {
            moves.push(Move::Left);
        }
        moves
    }

    // Row-major index of the cell whose tile would slide for this move, or
    // None when the move runs off the board.
    fn sliding_index(&self, mv: Move) -> Option<usize> {
        match mv {
            Move::Up if self.blank < (self.rows - 1) * self.cols => Some(self.blank + self.cols),
            Move::Down if self.blank >= self.cols => Some(self.blank - self.cols),
            Move::Right if self.blank % self.cols > 0 => Some(self.blank - 1),
            Move::Left if self.blank % self.cols < self.cols - 1 => Some(self.blank + 1),
            _ => None,
        }
    }

    /// Applies `mv` to this puzzle in place.
    ///
    /// # Returns
    /// `true` if the move was legal and the board changed, `false` if the move
    /// was illegal and the board is untouched.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::{Move, Puzzle};
    /// let mut puzzle = Puzzle::new(2, 2);
    /// assert!(puzzle.apply_in_place(Move::Down));
    /// assert!(!puzzle.is_goal());
    /// assert!(puzzle.apply_in_place(Move::Up));
    /// assert!(puzzle.is_goal());
    /// ```
    pub fn apply_in_place(&mut self, mv: Move) -> bool {
        match self.sliding_index(mv) {
            Some(from) => {
                self.grid[self.blank] = self.grid[from];
                self.grid[from] = self.blank_value();
                self.blank = from;
                true
            }
            None => false,
        }
    }

    /// Returns a new puzzle that is the result of applying `mv`, or `None`
    /// if the move is illegal. The original puzzle is never modified.
    ///
    /// For any legal move, `apply` and `apply_in_place` produce identical
    /// configurations; the search engines use this pure form exclusively so
    /// that no backtracking undo is ever needed.
    pub fn apply(&self, mv: Move) -> Option<Puzzle> {
        self.sliding_index(mv).map(|from| {
            let mut next = self.clone();
            next.grid[next.blank] = next.grid[from];
            next.grid[from] = next.blank_value();
            next.blank = from;
            next
        })
    }

    /// Moves by tile value: slides the named tile into the blank if the two
    /// are adjacent. This is the interactive, human-facing variant of move
    /// entry; the search engines work in `Move` directions.
    ///
    /// # Returns
    /// `true` if `tile` exists and is adjacent to the blank, `false` otherwise
    /// (the blank sentinel itself is not a movable tile).
    pub fn move_tile(&mut self, tile: u8) -> bool {
        if tile >= self.blank_value() {
            return false;
        }
        let index = match self.grid.iter().position(|&v| v == tile) {
            Some(i) => i,
            None => return false,
        };
        let (tr, tc) = (index / self.cols, index % self.cols);
        let (br, bc) = (self.blank / self.cols, self.blank % self.cols);
        let mv = if tr == br && tc + 1 == bc {
            Move::Right
        } else if tr == br && bc + 1 == tc {
            Move::Left
        } else if tc == bc && tr + 1 == br {
            Move::Down
        } else if tc == bc && br + 1 == tr {
            Move::Up
        } else {
            return false;
        };
        self.apply_in_place(mv)
    }

    /// Scrambles this puzzle by applying `moves` random legal moves.
    ///
    /// Each step picks uniformly from the currently valid moves, excluding
    /// the one that would undo the previous step, so no two consecutive
    /// moves cancel out. The scrambled board is always solvable, since only
    /// legal moves are ever applied.
    pub fn scramble(&mut self, moves: u32, rng: &mut impl Rng) {
        let mut last: Option<Move> = None;
        for _ in 0..moves {
            let mut choices = self.valid_moves();
            if let Some(prev) = last {
                choices.retain(|&mv| mv != prev.opposite());
            }
            // At least two moves are always legal, so one survives.
            let mv = choices[rng.gen_range(0..choices.len())];
            let applied = self.apply_in_place(mv);
            debug_assert!(applied, "valid_moves produced an illegal move");
            last = Some(mv);
        }
    }
}

impl fmt::Display for Puzzle {
    /// Renders the board as a bordered ASCII grid, with the blank cell left
    /// empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hborder = "-".repeat(6 * self.cols + 1);
        let hspacer = format!("{}|", "|     ".repeat(self.cols));
        for row in 0..self.rows {
            writeln!(f, "{}", hborder)?;
            writeln!(f, "{}", hspacer)?;
            for col in 0..self.cols {
                let value = self.grid[row * self.cols + col];
                if value == self.blank_value() {
                    write!(f, "|     ")?;
                } else {
                    write!(f, "|{:^5}", value)?;
                }
            }
            writeln!(f, "|")?;
            writeln!(f, "{}", hspacer)?;
        }
        write!(f, "{}", hborder)
    }
}
