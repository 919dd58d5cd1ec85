//! The abstract Space: a collection of positions plus the propagation queue,
//! edge frontier, and copy/assign primitives branch-and-backtrack search
//! depends on.

use std::collections::{HashSet, VecDeque};

use crate::position::{Position, PositionState};

/// Index of a position within a Space. The planar concrete Space uses
/// `(x, y)` with `0 <= x < width`, `0 <= y < height`.
pub type SpaceIndex = (usize, usize);

/// A collection of positions, owned exclusively, plus the bookkeeping the
/// solver needs to branch and backtrack.
///
/// Implementors mediate all narrowing through [`Space::solve`] and
/// [`Space::remove`] so the queue and edge invariants hold:
///
/// - every index in `queue` refers to a position that was solved at the
///   moment it was enqueued, in FIFO order;
/// - `edge` never contains a solved index.
///
/// Domain propagation rules (see [`crate::planar::PropagationRule`]) only
/// ever call `get`, `solve`, and `remove`.
pub trait Space {
    /// Returns the position at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range — a programmer error, not a
    /// runtime condition.
    fn get(&self, index: SpaceIndex) -> &Position;

    /// Mutable access to the position at `index`, used by the default
    /// `solve`/`remove` implementations below.
    fn get_mut(&mut self, index: SpaceIndex) -> &mut Position;

    /// Iterates over every `(index, &Position)` pair in the space.
    fn positions(&self) -> Box<dyn Iterator<Item = (SpaceIndex, &Position)> + '_>;

    /// FIFO of indices that just became solved and await propagation.
    fn queue(&self) -> &VecDeque<SpaceIndex>;
    /// Mutable access to the propagation queue.
    fn queue_mut(&mut self) -> &mut VecDeque<SpaceIndex>;

    /// Indices eligible for MRV branching: touched by propagation, not yet
    /// solved.
    fn edge(&self) -> &HashSet<SpaceIndex>;
    /// Mutable access to the edge frontier.
    fn edge_mut(&mut self) -> &mut HashSet<SpaceIndex>;

    /// Applies the domain propagation rule for a just-solved `index`.
    ///
    /// Returns `false` on contradiction. May cascade further `solve`/
    /// `remove` calls; anything solved this way is itself drained from the
    /// queue later.
    fn propagate(&mut self, index: SpaceIndex) -> bool;

    /// Deep-copies positions, queue, and edge. Mutating the copy must never
    /// affect `self`.
    fn copy(&self) -> Self
    where
        Self: Sized;

    /// Replaces this Space's contents with `other`'s — used to commit a
    /// successful branch into the caller's Space.
    fn assign(&mut self, other: Self)
    where
        Self: Sized;

    /// Intersects the position at `index` with `{state}`.
    ///
    /// Returns `false` if `state` was not a candidate (narrowing would empty
    /// the position).
    fn solve(&mut self, index: SpaceIndex, state: PositionState) -> bool {
        let position = self.get_mut(index);
        position.solve(state);
        if !position.is_solved() {
            return false;
        }
        self.queue_mut().push_back(index);
        self.edge_mut().remove(&index);
        true
    }

    /// Removes `states` from the position at `index`.
    ///
    /// Returns `false` if asked to narrow an already-solved position whose
    /// sole state is among `states`. Silently succeeds if a requested state
    /// is already absent from an unsolved position — this asymmetry is
    /// load-bearing for the domain propagation rules (see DESIGN.md).
    fn remove(&mut self, index: SpaceIndex, states: &[PositionState]) -> bool {
        for &state in states {
            let position = self.get_mut(index);
            if !position.has(state) {
                continue;
            }
            if position.is_solved() {
                return false;
            }
            position.remove([state]);
            if position.is_solved() {
                self.queue_mut().push_back(index);
                self.edge_mut().remove(&index);
            } else {
                self.edge_mut().insert(index);
            }
        }
        true
    }
}
