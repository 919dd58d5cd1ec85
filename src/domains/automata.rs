//! Reverse-reconstruction of a Rule 30 cellular automaton: given a partially
//! known grid, recover a consistent assignment where every cell is the Rule
//! 30 successor of the row above it.
//!
//! Ported from `original_source/src/automata.py`'s `Scene.propagate`. Each
//! position holds 6 candidate states: 0 and 1 are real cell values; states
//! `2..=5` are per-role markers (see [`ROLE_OFFSETS`]) tracking whether a
//! given neighborhood role still has ambiguous support. A marker is removed
//! once its role's value becomes pinned down by some application of the
//! rule, which is what gives MRV a gradient to follow even before a cell is
//! narrowed all the way to a single binary value.

use crate::planar::{PlanarSpace, PropagationRule};
use crate::space::{Space, SpaceIndex};

/// Real values (0, 1) plus four per-role ambiguity markers.
pub const STATE_COUNT: usize = 6;
const UNSET: usize = 2;
const UNSOLVED: usize = 3;

/// `(left, center, right, next)` truth table for Rule 30.
const RULE_30: [(u8, u8, u8, u8); 8] = [
    (1, 1, 1, 0),
    (1, 1, 0, 0),
    (1, 0, 1, 0),
    (1, 0, 0, 1),
    (0, 1, 1, 1),
    (0, 1, 0, 1),
    (0, 0, 1, 1),
    (0, 0, 0, 0),
];

/// Offsets, relative to a role's own anchor, of the four cells a single
/// Rule-30 application reads: up-left, up, up-right, and the cell being
/// reconstructed itself.
const ROLE_OFFSETS: [(isize, isize); 4] = [(-1, -1), (0, -1), (1, -1), (0, 0)];

#[derive(Clone, Copy, Default)]
pub struct Rule30Rule;

fn in_bounds(width: usize, height: usize, x: isize, y: isize) -> bool {
    x >= 0 && (x as usize) < width && y >= 0 && (y as usize) < height
}

impl PropagationRule for Rule30Rule {
    fn state_count(&self) -> usize {
        STATE_COUNT
    }

    fn propagate(&self, space: &mut PlanarSpace<Self>, index: SpaceIndex) -> bool {
        if space.get(index).state() > 1 {
            return false;
        }

        let (cx, cy) = (index.0 as isize, index.1 as isize);
        let width = space.width();
        let height = space.height();

        for &role in &ROLE_OFFSETS {
            let indices: Vec<(isize, isize)> = ROLE_OFFSETS
                .iter()
                .map(|off| (cx + off.0 - role.0, cy + off.1 - role.1))
                .collect();

            let known: Vec<Option<u8>> = indices
                .iter()
                .map(|&(x, y)| {
                    if !in_bounds(width, height, x, y) {
                        return None;
                    }
                    let position = space.get((x as usize, y as usize));
                    position.is_solved().then(|| position.state() as u8)
                })
                .collect();

            let mut solves = [UNSET; 4];
            let mut found = false;
            for &(r0, r1, r2, r3) in &RULE_30 {
                let rule = [r0, r1, r2, r3];
                let matches = known
                    .iter()
                    .zip(rule.iter())
                    .all(|(state, &part)| state.map_or(true, |s| s == part));
                if !matches {
                    continue;
                }
                found = true;
                for slot in 0..4 {
                    solves[slot] = match known[slot] {
                        Some(_) => solves[slot],
                        None => {
                            let part = rule[slot] as usize;
                            if solves[slot] == UNSET || solves[slot] == part {
                                part
                            } else {
                                UNSOLVED
                            }
                        }
                    };
                }
            }
            if !found {
                return false;
            }

            for (slot, &(x, y)) in indices.iter().enumerate() {
                if !in_bounds(width, height, x, y) {
                    continue;
                }
                let target = (x as usize, y as usize);
                match solves[slot] {
                    0 | 1 => {
                        if !space.solve(target, solves[slot]) {
                            return false;
                        }
                    }
                    UNSOLVED => {
                        if !space.remove(target, &[2 + slot]) {
                            return false;
                        }
                    }
                    _ => {}
                }
            }
        }

        true
    }
}

/// True iff every position is solved down to a real binary value (no marker
/// state left over).
#[must_use]
pub fn is_valid(space: &PlanarSpace<Rule30Rule>) -> bool {
    space
        .positions()
        .all(|(_, position)| position.is_solved() && position.state() < 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_row_solving_propagates_a_row_down() {
        let mut space = PlanarSpace::new(Rule30Rule, 5, 2);
        // A row of all zeros maps to all zeros under Rule 30.
        for x in 0..5 {
            assert!(space.solve((x, 0), 0));
        }
        for x in 0..5 {
            assert!(space.propagate((x, 0)));
        }
        while let Some(index) = space.queue_mut().pop_front() {
            assert!(space.propagate(index));
        }
        for x in 0..5 {
            assert!(space.get((x, 1)).is_solved());
            assert_eq!(space.get((x, 1)).state(), 0);
        }
    }

    #[test]
    fn a_cell_already_solved_to_a_marker_state_is_rejected() {
        let mut space = PlanarSpace::new(Rule30Rule, 3, 3);
        // Forcing a marker state as if it were a real solved value violates
        // the state() > 1 guard.
        space.get_mut((1, 1)).solve(UNSET);
        assert!(!space.propagate((1, 1)));
    }
}
