//! The concrete 2D-matrix Space shared by all three example domains.

use std::collections::{HashSet, VecDeque};

use crate::position::Position;
use crate::space::{Space, SpaceIndex};

/// A domain-specific propagation rule consumed by [`PlanarSpace`].
///
/// Implementing this trait — rather than subclassing a Space — is how
/// Sudoku, Loops, and Rule-30 reverse-reconstruction each plug into the
/// shared engine. See spec.md §9 "Polymorphism over propagate": the surface
/// is one method plus the state universe size, deliberately avoiding a
/// deeper inheritance hierarchy.
pub trait PropagationRule: Clone {
    /// Number of distinct states a position in this domain may hold.
    fn state_count(&self) -> usize;

    /// Tightens the neighbors of a just-solved `index`. Returns `false` on
    /// contradiction. Implementations must only call `space.get`,
    /// `space.solve`, and `space.remove`.
    fn propagate(&self, space: &mut PlanarSpace<Self>, index: SpaceIndex) -> bool
    where
        Self: Sized;
}

/// A 2D matrix of positions indexed by `(x, y)`, `0 <= x < width`,
/// `0 <= y < height`.
#[derive(Clone)]
pub struct PlanarSpace<R: PropagationRule> {
    matrix: Vec<Vec<Position>>,
    width: usize,
    height: usize,
    queue: VecDeque<SpaceIndex>,
    edge: HashSet<SpaceIndex>,
    rule: R,
}

impl<R: PropagationRule> PlanarSpace<R> {
    /// Builds a fresh matrix of fully-unconstrained positions.
    #[must_use]
    pub fn new(rule: R, width: usize, height: usize) -> Self {
        let size = rule.state_count();
        let matrix = (0..height)
            .map(|_| (0..width).map(|_| Position::unconstrained(size)).collect())
            .collect();
        Self {
            matrix,
            width,
            height,
            queue: VecDeque::new(),
            edge: HashSet::new(),
            rule,
        }
    }

    /// Builds a space from a pre-filled matrix (e.g. a loaded puzzle grid).
    ///
    /// The width is taken from the first row; an empty matrix yields a
    /// zero-width, zero-height space.
    #[must_use]
    pub fn from_matrix(rule: R, matrix: Vec<Vec<Position>>) -> Self {
        let height = matrix.len();
        let width = matrix.first().map_or(0, Vec::len);
        Self {
            matrix,
            width,
            height,
            queue: VecDeque::new(),
            edge: HashSet::new(),
            rule,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn rule(&self) -> &R {
        &self.rule
    }
}

impl<R: PropagationRule> Space for PlanarSpace<R> {
    fn get(&self, index: SpaceIndex) -> &Position {
        let (x, y) = index;
        &self.matrix[y][x]
    }

    fn get_mut(&mut self, index: SpaceIndex) -> &mut Position {
        let (x, y) = index;
        &mut self.matrix[y][x]
    }

    fn positions(&self) -> Box<dyn Iterator<Item = (SpaceIndex, &Position)> + '_> {
        Box::new(self.matrix.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, position)| ((x, y), position))
        }))
    }

    fn queue(&self) -> &VecDeque<SpaceIndex> {
        &self.queue
    }

    fn queue_mut(&mut self) -> &mut VecDeque<SpaceIndex> {
        &mut self.queue
    }

    fn edge(&self) -> &HashSet<SpaceIndex> {
        &self.edge
    }

    fn edge_mut(&mut self) -> &mut HashSet<SpaceIndex> {
        &mut self.edge
    }

    fn propagate(&mut self, index: SpaceIndex) -> bool {
        let rule = self.rule.clone();
        rule.propagate(self, index)
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    fn assign(&mut self, other: Self) {
        *self = other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Default)]
    struct NoOpRule;

    impl PropagationRule for NoOpRule {
        fn state_count(&self) -> usize {
            3
        }

        fn propagate(&self, _space: &mut PlanarSpace<Self>, _index: SpaceIndex) -> bool {
            true
        }
    }

    #[test]
    fn get_indexes_row_major() {
        let space = PlanarSpace::new(NoOpRule, 3, 2);
        assert_eq!(space.width(), 3);
        assert_eq!(space.height(), 2);
        assert_eq!(space.get((2, 1)).count(), 3);
    }

    #[test]
    fn solve_enqueues_and_clears_edge() {
        let mut space = PlanarSpace::new(NoOpRule, 2, 2);
        space.edge_mut().insert((0, 0));
        assert!(space.solve((0, 0), 1));
        assert!(space.get((0, 0)).is_solved());
        assert_eq!(space.queue().front(), Some(&(0, 0)));
        assert!(!space.edge().contains(&(0, 0)));
    }

    #[test]
    fn remove_below_full_marks_edge_but_not_queue() {
        let mut space = PlanarSpace::new(NoOpRule, 2, 2);
        assert!(space.remove((1, 1), &[0]));
        assert!(!space.get((1, 1)).is_solved());
        assert!(space.edge().contains(&(1, 1)));
        assert!(space.queue().is_empty());
    }

    #[test]
    fn remove_down_to_one_enqueues_and_drops_edge() {
        let mut space = PlanarSpace::new(NoOpRule, 2, 2);
        space.edge_mut().insert((1, 1));
        assert!(space.remove((1, 1), &[0, 1]));
        assert!(space.get((1, 1)).is_solved());
        assert!(space.queue().contains(&(1, 1)));
        assert!(!space.edge().contains(&(1, 1)));
    }

    #[test]
    fn remove_on_solved_position_fails() {
        let mut space = PlanarSpace::new(NoOpRule, 2, 2);
        assert!(space.solve((0, 0), 2));
        assert!(!space.remove((0, 0), &[2]));
    }

    #[test]
    fn remove_absent_state_on_unsolved_position_is_a_silent_no_op() {
        let mut space = PlanarSpace::new(NoOpRule, 2, 2);
        assert!(space.remove((0, 0), &[0]));
        assert!(space.remove((0, 0), &[0]));
        assert!(!space.get((0, 0)).has(0));
        assert!(space.get((0, 0)).has(1));
    }

    #[test]
    fn copy_is_independent_of_the_original() {
        let mut original = PlanarSpace::new(NoOpRule, 2, 2);
        original.edge_mut().insert((0, 0));
        let mut copy = original.copy();

        copy.solve((0, 0), 0);
        assert!(copy.get((0, 0)).is_solved());
        assert!(!original.get((0, 0)).is_solved());
        assert!(original.edge().contains(&(0, 0)));
        assert!(!copy.edge().contains(&(0, 0)));
        assert!(original.queue().is_empty());
        assert!(!copy.queue().is_empty());
    }

    #[test]
    fn assign_replaces_contents() {
        let mut target = PlanarSpace::new(NoOpRule, 2, 2);
        let mut source = target.copy();
        source.solve((1, 1), 0);
        target.assign(source);
        assert!(target.get((1, 1)).is_solved());
    }
}
