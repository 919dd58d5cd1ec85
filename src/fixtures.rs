//! Sudoku puzzle loading, from a file or an embedded string.
//!
//! The text format mirrors `original_source`'s own puzzle files: one line
//! per row, a digit `1`-`9` for a given, any other character (space, `.`,
//! `_`) for a blank.

use std::fs;
use std::path::Path;

use crate::domains::sudoku::{COUNT, SudokuRule};
use crate::error::SolverError;
use crate::planar::PlanarSpace;
use crate::position::Position;
use crate::space::Space;

/// The classic "easy" Sudoku puzzle used throughout spec examples, whose
/// unique solution starts `534678912...`.
pub const EASY_SUDOKU: &str = "53  7    \n\
6  195   \n\
 98    6 \n\
8   6   3\n\
4  8 3  1\n\
7   2   6\n\
 6    28 \n\
   419  5\n\
    8  79";

/// Parses a text grid into a [`PlanarSpace`], solving every recognized
/// given digit but otherwise leaving blanks fully unconstrained.
///
/// Rows shorter than [`COUNT`] are treated as blank past their end; rows
/// beyond [`COUNT`] are ignored, matching how the original loader tolerated
/// ragged puzzle files.
#[must_use]
pub fn parse_sudoku(text: &str) -> PlanarSpace<SudokuRule> {
    let matrix: Vec<Vec<Position>> = (0..COUNT)
        .map(|y| {
            let row = text.lines().nth(y).unwrap_or("");
            (0..COUNT)
                .map(|x| match row.as_bytes().get(x) {
                    Some(byte @ b'1'..=b'9') => Position::solved_to((byte - b'1') as usize),
                    _ => Position::unconstrained(COUNT),
                })
                .collect()
        })
        .collect();

    let mut space = PlanarSpace::from_matrix(SudokuRule, matrix);
    for y in 0..COUNT {
        for x in 0..COUNT {
            if space.get((x, y)).is_solved() {
                space.queue_mut().push_back((x, y));
            }
        }
    }
    space
}

/// Loads and parses a Sudoku puzzle from `path`.
///
/// # Errors
///
/// Returns [`SolverError::Fixture`] if the file cannot be read.
pub fn load_sudoku(path: &Path) -> Result<PlanarSpace<SudokuRule>, SolverError> {
    let text = fs::read_to_string(path).map_err(|source| SolverError::Fixture {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_sudoku(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_sudoku_has_exactly_its_givens_solved() {
        let space = parse_sudoku(EASY_SUDOKU);
        assert!(space.get((0, 0)).is_solved());
        assert_eq!(space.get((0, 0)).state(), 4); // '5' -> index 4
        assert!(!space.get((1, 0)).is_solved());
    }

    #[test]
    fn ragged_rows_are_treated_as_blank() {
        let space = parse_sudoku("5");
        assert!(space.get((0, 0)).is_solved());
        assert!(!space.get((1, 0)).is_solved());
        assert!(!space.get((0, 1)).is_solved());
    }

    #[test]
    fn missing_fixture_file_reports_its_path() {
        let result = load_sudoku(Path::new("/nonexistent/path/to/a/puzzle.txt"));
        assert!(result.is_err());
    }
}
