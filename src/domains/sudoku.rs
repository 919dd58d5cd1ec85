//! Classic 9x9 Sudoku: row, column, and 3x3 block uniqueness.
//!
//! Ported from `original_source/src/sudoku.py`'s `Table.propagate`, including
//! its block loop's `and`-not-`or` condition, which skips any cell already
//! covered by the row or column loop rather than re-removing redundantly.

use crate::planar::{PlanarSpace, PropagationRule};
use crate::space::{Space, SpaceIndex};

/// Number of rows, columns, and distinct digits.
pub const COUNT: usize = 9;
/// Side length of a block.
const SUB: usize = 3;

#[derive(Clone, Copy, Default)]
pub struct SudokuRule;

impl PropagationRule for SudokuRule {
    fn state_count(&self) -> usize {
        COUNT
    }

    fn propagate(&self, space: &mut PlanarSpace<Self>, index: SpaceIndex) -> bool {
        let (x, y) = index;
        let state = space.get(index).state();

        for xx in 0..COUNT {
            if xx != x && !space.remove((xx, y), &[state]) {
                return false;
            }
        }
        for yy in 0..COUNT {
            if yy != y && !space.remove((x, yy), &[state]) {
                return false;
            }
        }

        let block_x = (x / SUB) * SUB;
        let block_y = (y / SUB) * SUB;
        for yy in block_y..block_y + SUB {
            for xx in block_x..block_x + SUB {
                if xx != x && yy != y && !space.remove((xx, yy), &[state]) {
                    return false;
                }
            }
        }

        true
    }
}

/// True iff every position is solved and every row, column, and block is a
/// permutation of `0..COUNT`.
#[must_use]
pub fn is_valid(space: &PlanarSpace<SudokuRule>) -> bool {
    if space.positions().any(|(_, position)| !position.is_solved()) {
        return false;
    }

    let is_permutation = |states: Vec<usize>| {
        let mut seen = vec![false; COUNT];
        for state in states {
            if seen[state] {
                return false;
            }
            seen[state] = true;
        }
        true
    };

    for y in 0..COUNT {
        let row: Vec<_> = (0..COUNT).map(|x| space.get((x, y)).state()).collect();
        if !is_permutation(row) {
            return false;
        }
    }
    for x in 0..COUNT {
        let col: Vec<_> = (0..COUNT).map(|y| space.get((x, y)).state()).collect();
        if !is_permutation(col) {
            return false;
        }
    }
    for block_y in (0..COUNT).step_by(SUB) {
        for block_x in (0..COUNT).step_by(SUB) {
            let block: Vec<_> = (block_y..block_y + SUB)
                .flat_map(|yy| (block_x..block_x + SUB).map(move |xx| (xx, yy)))
                .map(|(xx, yy)| space.get((xx, yy)).state())
                .collect();
            if !is_permutation(block) {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn complete_valid_grid_is_valid() {
        let solution = "534678912\n\
            672195348\n\
            198342567\n\
            859761423\n\
            426853791\n\
            713924856\n\
            961537284\n\
            287419635\n\
            345286179";
        let space = fixtures::parse_sudoku(solution);
        assert!(is_valid(&space));
    }

    #[test]
    fn unsolved_grid_is_not_valid() {
        let space = PlanarSpace::new(SudokuRule, COUNT, COUNT);
        assert!(!is_valid(&space));
    }

    #[test]
    fn solving_a_cell_eliminates_peers_in_row_col_and_block() {
        let mut space = PlanarSpace::new(SudokuRule, COUNT, COUNT);
        assert!(space.solve((0, 0), 4));
        assert!(space.propagate((0, 0)));
        assert!(!space.get((1, 0)).has(4));
        assert!(!space.get((0, 1)).has(4));
        assert!(!space.get((2, 2)).has(4));
        // Outside the block/row/col: untouched.
        assert!(space.get((8, 8)).has(4));
    }
}
