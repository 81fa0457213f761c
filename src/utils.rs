use crate::engine::Puzzle;

/// Parses an array of string slices into a [`Puzzle`].
///
/// Each string slice is one row of the board, top row first. Cells within a
/// row are whitespace-separated: either a tile value (`0` up to
/// `rows * cols - 2`) or `_` for the blank. The board dimensions are taken
/// from the input itself, so every row must contain the same number of cells.
///
/// The parsed board is also checked for solvability, so a board accepted by
/// this function is guaranteed to have a path to the goal.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`), one per row.
///
/// # Returns
/// * `Ok(Puzzle)` if the input is a well-formed, solvable board.
/// * `Err(String)` if:
///     - There are fewer than two rows, or a row has fewer than two cells.
///     - Rows have differing cell counts.
///     - A cell is neither `_` nor a valid tile value, or a value repeats.
///     - The board is well-formed but unsolvable.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::puzzle_from_rows;
///
/// let puzzle = puzzle_from_rows(&[
///     "0 1 2",
///     "3 4 5",
///     "6 7 _",
/// ]).unwrap();
/// assert!(puzzle.is_goal());
///
/// // Swapping one adjacent tile pair flips the parity.
/// assert!(puzzle_from_rows(&["1 0", "2 _"]).is_err());
/// ```
pub fn puzzle_from_rows(s: &[&str]) -> Result<Puzzle, String> {
    if s.len() < 2 {
        return Err(format!("Expected at least 2 rows, found {}", s.len()));
    }
    let rows = s.len();
    let cols = s[0].split_whitespace().count();
    if cols < 2 {
        return Err(format!("Expected at least 2 columns, found {}", cols));
    }
    let blank_value = (rows * cols - 1) as u8;

    let mut grid = Vec::with_capacity(rows * cols);
    for (r, row_str) in s.iter().enumerate() {
        let cells: Vec<&str> = row_str.split_whitespace().collect();
        if cells.len() != cols {
            return Err(format!(
                "Row {} has {} cells, expected {}",
                r,
                cells.len(),
                cols
            ));
        }
        for (c, cell) in cells.iter().enumerate() {
            if *cell == "_" {
                grid.push(blank_value);
            } else {
                let value: u8 = cell
                    .parse()
                    .map_err(|_| format!("Unrecognized cell '{}' in row {} col {}", cell, r, c))?;
                if value >= blank_value {
                    return Err(format!(
                        "Tile value {} out of range in row {} col {} (max {})",
                        value,
                        r,
                        c,
                        blank_value - 1
                    ));
                }
                grid.push(value);
            }
        }
    }

    let puzzle = Puzzle::from_grid(rows, cols, grid)?;
    if !is_solvable(&puzzle) {
        return Err("Board is unsolvable: no sequence of moves reaches the goal".to_string());
    }
    Ok(puzzle)
}

/// Counts inversions among the non-blank tiles in row-major order.
///
/// An inversion is a pair of tiles where the higher value appears before the
/// lower one when reading the board left to right, top to bottom. The blank
/// does not participate.
pub fn inversions(puzzle: &Puzzle) -> u32 {
    let blank = puzzle.blank_value();
    let tiles: Vec<u8> = puzzle
        .tiles()
        .iter()
        .copied()
        .filter(|&t| t != blank)
        .collect();
    let mut count = 0;
    for i in 0..tiles.len() {
        for j in (i + 1)..tiles.len() {
            if tiles[i] > tiles[j] {
                count += 1;
            }
        }
    }
    count
}

/// Reports whether the board can reach the goal configuration at all.
///
/// Sliding moves preserve a parity invariant, so exactly half of all tile
/// permutations are reachable. For boards with an odd number of columns the
/// inversion count must be even; for an even number of columns the inversion
/// count plus the blank's row distance from the bottom must be even.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Puzzle;
/// use npuzzle_solver::utils::is_solvable;
///
/// assert!(is_solvable(&Puzzle::new(3, 3)));
/// assert!(is_solvable(&Puzzle::new_scrambled_with_seed(4, 4, 50, 1)));
///
/// let swapped = Puzzle::from_grid(2, 2, vec![1, 0, 2, 3]).unwrap();
/// assert!(!is_solvable(&swapped));
/// ```
pub fn is_solvable(puzzle: &Puzzle) -> bool {
    let (rows, cols) = puzzle.size();
    let inv = inversions(puzzle);
    if cols % 2 == 1 {
        inv % 2 == 0
    } else {
        let blank_row_from_bottom = (rows - 1 - puzzle.blank_index() / cols) as u32;
        (inv + blank_row_from_bottom) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzle_from_rows_valid() {
        let puzzle = puzzle_from_rows(&["0 1 2", "3 4 5", "6 7 _"]).unwrap();
        assert_eq!(puzzle.size(), (3, 3));
        assert!(puzzle.is_goal());
        assert_eq!(puzzle.blank_index(), 8);
    }

    #[test]
    fn test_puzzle_from_rows_rectangular() {
        let puzzle = puzzle_from_rows(&["4 1 2 3", "0 5 6 _"]).unwrap();
        assert_eq!(puzzle.size(), (2, 4));
        assert!(!puzzle.is_goal());
    }

    #[test]
    fn test_puzzle_from_rows_ragged_rows() {
        let result = puzzle_from_rows(&["0 1 2", "3 4", "5 6 _"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Row 1 has 2 cells"));
    }

    #[test]
    fn test_puzzle_from_rows_bad_cell() {
        let result = puzzle_from_rows(&["0 x", "2 _"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unrecognized cell 'x'"));
    }

    #[test]
    fn test_puzzle_from_rows_value_out_of_range() {
        let result = puzzle_from_rows(&["0 7", "2 _"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_puzzle_from_rows_duplicate_tile() {
        let result = puzzle_from_rows(&["0 0", "2 _"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_puzzle_from_rows_too_small() {
        assert!(puzzle_from_rows(&["0 _"]).is_err());
        assert!(puzzle_from_rows(&["0", "_"]).is_err());
    }

    #[test]
    fn test_puzzle_from_rows_rejects_unsolvable() {
        let result = puzzle_from_rows(&["1 0", "2 _"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("unsolvable"));
    }

    #[test]
    fn test_inversions_goal_is_zero() {
        assert_eq!(inversions(&Puzzle::new(3, 3)), 0);
        assert_eq!(inversions(&Puzzle::new(4, 4)), 0);
    }

    #[test]
    fn test_inversions_counts_pairs() {
        // Reading order 2, 1, 0: pairs (2,1), (2,0), (1,0).
        let puzzle = Puzzle::from_grid(2, 2, vec![2, 1, 0, 3]).unwrap();
        assert_eq!(inversions(&puzzle), 3);
    }

    #[test]
    fn test_inversions_ignores_blank() {
        // Blank (8) first in reading order contributes nothing.
        let puzzle = Puzzle::from_grid(3, 3, vec![8, 0, 1, 3, 4, 2, 6, 7, 5]).unwrap();
        assert_eq!(inversions(&puzzle), 4);
    }

    #[test]
    fn test_solvable_goal_boards() {
        assert!(is_solvable(&Puzzle::new(2, 2)));
        assert!(is_solvable(&Puzzle::new(3, 3)));
        assert!(is_solvable(&Puzzle::new(4, 4)));
        assert!(is_solvable(&Puzzle::new(3, 4)));
    }

    #[test]
    fn test_scrambled_boards_stay_solvable() {
        for seed in 0..5 {
            let puzzle = Puzzle::new_scrambled_with_seed(4, 4, 100, seed);
            assert!(is_solvable(&puzzle));
        }
    }

    #[test]
    fn test_adjacent_swap_is_unsolvable() {
        // Swapping two non-blank tiles in the goal flips the parity.
        let puzzle = Puzzle::from_grid(2, 2, vec![1, 0, 2, 3]).unwrap();
        assert!(!is_solvable(&puzzle));
        let puzzle = Puzzle::from_grid(3, 3, vec![1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert!(!is_solvable(&puzzle));
    }

    #[test]
    fn test_solvability_even_cols_uses_blank_row() {
        // Same tile ordering (0, 1, 2), blank one row higher: parity flips.
        let bottom = Puzzle::from_grid(2, 2, vec![0, 1, 3, 2]).unwrap();
        let top = Puzzle::from_grid(2, 2, vec![3, 0, 1, 2]).unwrap();
        assert!(is_solvable(&bottom));
        assert!(!is_solvable(&top));
    }
}
