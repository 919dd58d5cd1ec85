//! Loops: each cell holds a rotated pipe tile (one of 4 orientations), and
//! neighbors must agree on whether a connection crosses their shared edge.
//!
//! Ported from `original_source/src/loops.py`'s `Scene.propagate`. State `s`
//! connects left when `s` is 0 or 1, right when 2 or 3, up when 0 or 3, down
//! when 1 or 2 — so each orientation connects exactly two adjacent sides.

use crate::planar::{PlanarSpace, PropagationRule};
use crate::space::{Space, SpaceIndex};

/// Number of tile orientations.
pub const STATE_COUNT: usize = 4;

fn connects_left(state: usize) -> bool {
    matches!(state, 0 | 1)
}
fn connects_right(state: usize) -> bool {
    matches!(state, 2 | 3)
}
fn connects_up(state: usize) -> bool {
    matches!(state, 0 | 3)
}
fn connects_down(state: usize) -> bool {
    matches!(state, 1 | 2)
}

#[derive(Clone, Copy, Default)]
pub struct LoopsRule;

impl PropagationRule for LoopsRule {
    fn state_count(&self) -> usize {
        STATE_COUNT
    }

    fn propagate(&self, space: &mut PlanarSpace<Self>, index: SpaceIndex) -> bool {
        let (x, y) = index;
        let state = space.get(index).state();
        let width = space.width();
        let height = space.height();

        if x > 0 {
            let forbidden: Vec<_> = (0..STATE_COUNT)
                .filter(|&s| connects_right(s) != connects_left(state))
                .collect();
            if !space.remove((x - 1, y), &forbidden) {
                return false;
            }
        }
        if x + 1 < width {
            let forbidden: Vec<_> = (0..STATE_COUNT)
                .filter(|&s| connects_left(s) != connects_right(state))
                .collect();
            if !space.remove((x + 1, y), &forbidden) {
                return false;
            }
        }
        if y > 0 {
            let forbidden: Vec<_> = (0..STATE_COUNT)
                .filter(|&s| connects_down(s) != connects_up(state))
                .collect();
            if !space.remove((x, y - 1), &forbidden) {
                return false;
            }
        }
        if y + 1 < height {
            let forbidden: Vec<_> = (0..STATE_COUNT)
                .filter(|&s| connects_up(s) != connects_down(state))
                .collect();
            if !space.remove((x, y + 1), &forbidden) {
                return false;
            }
        }

        true
    }
}

/// True iff every position is solved and every adjacent pair agrees on its
/// shared edge.
#[must_use]
pub fn is_valid(space: &PlanarSpace<LoopsRule>) -> bool {
    if space.positions().any(|(_, position)| !position.is_solved()) {
        return false;
    }

    for y in 0..space.height() {
        for x in 0..space.width() {
            let state = space.get((x, y)).state();
            if x + 1 < space.width() {
                let right = space.get((x + 1, y)).state();
                if connects_right(state) != connects_left(right) {
                    return false;
                }
            }
            if y + 1 < space.height() {
                let down = space.get((x, y + 1)).state();
                if connects_down(state) != connects_up(down) {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solving_a_tile_restricts_its_right_neighbor() {
        let mut space = PlanarSpace::new(LoopsRule, 2, 1);
        assert!(space.solve((0, 0), 2)); // connects right
        assert!(space.propagate((0, 0)));
        for s in 0..STATE_COUNT {
            if space.get((1, 0)).has(s) {
                assert!(connects_left(s));
            }
        }
    }

    #[test]
    fn edge_tiles_never_connect_off_grid() {
        let space = PlanarSpace::new(LoopsRule, 1, 1);
        // A single isolated cell has no neighbor constraints — all four
        // orientations remain legal until solved.
        assert_eq!(space.get((0, 0)).count(), 4);
    }
}
