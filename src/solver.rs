//! Propagate → MRV select → branch-and-backtrack recursion.
//!
//! All randomness (initial edge seeding, tie-breaking among MRV candidates)
//! is drawn from a single seeded source so that runs are reproducible,
//! mirroring how `original_source`'s domains call `random.seed(0)` before
//! solving, generalized here to a user-supplied seed (spec.md §9
//! "Deterministic RNG").

use std::time::Instant;

use rand::seq::{IndexedRandom, IteratorRandom};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::space::{Space, SpaceIndex};
use crate::stats::RunStats;

/// Invoked once per recursion entry with the current Space; used by callers
/// to animate between steps. May block — the Solver makes no assumptions
/// about the observer's latency and holds no resources across the call
/// other than the Space itself.
pub trait Observer<S> {
    fn observe(&mut self, space: &S);
}

/// An observer that does nothing — the default when no animation is wanted.
#[derive(Default)]
pub struct NullObserver;

impl<S> Observer<S> for NullObserver {
    fn observe(&mut self, _space: &S) {}
}

/// Drives a [`Space`] to a consistent, fully-determined assignment.
pub struct Solver {
    rng: StdRng,
    branches_attempted: usize,
    backtracks: usize,
    last_duration_ms: u128,
}

impl Solver {
    /// Creates a solver seeded for reproducible runs.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            branches_attempted: 0,
            backtracks: 0,
            last_duration_ms: 0,
        }
    }

    /// Solves `space` in place, invoking `observer` before each step.
    ///
    /// Returns `true` iff every position ended up solved consistently;
    /// `false` signals the space is unsatisfiable (every branch failed).
    pub fn solve<S: Space, O: Observer<S>>(&mut self, space: &mut S, observer: &mut O) -> bool {
        self.branches_attempted = 0;
        self.backtracks = 0;
        let start = Instant::now();
        let result = self.solve_inner(space, observer);
        self.last_duration_ms = start.elapsed().as_millis();
        result
    }

    /// Run statistics for the most recent [`Solver::solve`] call.
    #[must_use]
    pub fn stats(&self) -> RunStats {
        RunStats {
            branches_attempted: self.branches_attempted,
            backtracks: self.backtracks,
            duration_ms: self.last_duration_ms,
        }
    }

    fn solve_inner<S: Space, O: Observer<S>>(&mut self, space: &mut S, observer: &mut O) -> bool {
        observer.observe(space);
        if !self.propagate_queue(space) {
            return false;
        }
        match self.select_position(space) {
            None => true,
            Some(index) => self.solve_index(space, index, observer),
        }
    }

    /// Repeatedly pops the front of the queue and propagates it.
    fn propagate_queue<S: Space>(&mut self, space: &mut S) -> bool {
        while let Some(index) = space.queue_mut().pop_front() {
            if !space.propagate(index) {
                return false;
            }
        }
        true
    }

    /// Minimum-remaining-values selection, restricted to the edge frontier.
    ///
    /// If the edge is empty, seeds it with one random unsolved position
    /// first (spec.md §4.2 "Edge-set rationale"). Returns `None` ("not
    /// found") once no edge index has more than one candidate left.
    fn select_position<S: Space>(&mut self, space: &mut S) -> Option<SpaceIndex> {
        if space.edge().is_empty() {
            let seed = space
                .positions()
                .filter(|(_, position)| !position.is_solved())
                .map(|(index, _)| index)
                .choose(&mut self.rng);
            if let Some(index) = seed {
                space.edge_mut().insert(index);
            }
        }

        // Snapshot to an ordered sequence before random selection, rather
        // than relying on hash-iteration order of the edge set.
        let mut edge: Vec<SpaceIndex> = space.edge().iter().copied().collect();
        edge.sort_unstable();

        let mut minimum = None;
        let mut candidates = Vec::new();
        for index in edge {
            let count = space.get(index).count();
            if count <= 1 {
                continue;
            }
            match minimum {
                Some(m) if count < m => {
                    minimum = Some(count);
                    candidates.clear();
                    candidates.push(index);
                }
                Some(m) if count == m => candidates.push(index),
                Some(_) => {}
                None => {
                    minimum = Some(count);
                    candidates.push(index);
                }
            }
        }

        candidates.choose(&mut self.rng).copied()
    }

    /// Tries each remaining candidate at `index`, in ascending order, on a
    /// cloned Space, recursing into each before trying the next.
    fn solve_index<S: Space, O: Observer<S>>(
        &mut self,
        space: &mut S,
        index: SpaceIndex,
        observer: &mut O,
    ) -> bool {
        // Capture the candidate list before mutation: `states()` is not
        // restartable once the position it reads changes.
        let states: Vec<_> = space.get(index).states().collect();
        for state in states {
            self.branches_attempted += 1;
            let mut branch = space.copy();
            // `state` came from this exact position's current candidates,
            // so this can never itself produce a contradiction; any failure
            // surfaces from the recursive propagate/select below.
            branch.solve(index, state);
            if self.solve_inner(&mut branch, observer) {
                space.assign(branch);
                return true;
            }
            self.backtracks += 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::automata::{self, Rule30Rule};
    use crate::domains::loops::{self, LoopsRule};
    use crate::domains::sudoku::{self, COUNT};
    use crate::fixtures::{self, EASY_SUDOKU};
    use crate::planar::PlanarSpace;

    #[test]
    fn trivial_sudoku_is_already_solved() {
        let solution = "534678912\n\
            672195348\n\
            198342567\n\
            859761423\n\
            426853791\n\
            713924856\n\
            961537284\n\
            287419635\n\
            345286179";
        let mut space = fixtures::parse_sudoku(solution);
        let mut solver = Solver::new(0);
        assert!(solver.solve(&mut space, &mut NullObserver));
        assert!(sudoku::is_valid(&space));
        assert_eq!(space.get((0, 0)).state(), 4);
    }

    #[test]
    fn easy_sudoku_solves_to_the_known_solution() {
        let mut space = fixtures::parse_sudoku(EASY_SUDOKU);
        let mut solver = Solver::new(0);
        assert!(solver.solve(&mut space, &mut NullObserver));
        assert!(sudoku::is_valid(&space));
        let row0: String = (0..COUNT)
            .map(|x| char::from_digit(space.get((x, 0)).state() as u32 + 1, 10).unwrap())
            .collect();
        assert_eq!(row0, "534678912");
    }

    #[test]
    fn inconsistent_sudoku_fails_without_full_solve() {
        let text = "11       \n \n \n \n \n \n \n \n ";
        let mut space = fixtures::parse_sudoku(text);
        let mut solver = Solver::new(0);
        assert!(!solver.solve(&mut space, &mut NullObserver));
        assert!(!sudoku::is_valid(&space));
    }

    #[test]
    fn loops_grid_solves_fully_and_validly() {
        let mut space = PlanarSpace::new(LoopsRule, 3, 3);
        let mut solver = Solver::new(42);
        assert!(solver.solve(&mut space, &mut NullObserver));
        assert!(loops::is_valid(&space));
        for (_, position) in space.positions() {
            assert!(position.is_solved());
            assert!(position.state() < 4);
        }
    }

    #[test]
    fn automata_grid_never_leaves_a_solved_cell_out_of_binary() {
        let mut space = PlanarSpace::new(Rule30Rule, 10, 10);
        space.edge_mut().insert((5, 5));
        let mut solver = Solver::new(7);
        let solved = solver.solve(&mut space, &mut NullObserver);
        if solved {
            assert!(automata::is_valid(&space));
        }
    }

    #[test]
    fn edge_never_contains_a_solved_index_after_a_solve() {
        let mut space = PlanarSpace::new(LoopsRule, 4, 4);
        let mut solver = Solver::new(3);
        assert!(solver.solve(&mut space, &mut NullObserver));
        for index in space.edge() {
            assert!(!space.get(*index).is_solved());
        }
    }
}
