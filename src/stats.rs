//! Run statistics reporting, rendered with `comfy-table` the way the
//! teacher's `stats.rs` renders 8-puzzle search statistics. Far simpler
//! here: a single Wave Function Collapse solve produces one set of
//! numbers, not a benchmark across many runs, so there is no percentile
//! aggregation to do.

use std::fmt::{self, Display};

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, modifiers, presets};

/// Statistics for a single [`crate::solver::Solver::solve`] call.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunStats {
    /// Number of candidate states tried across every branch point.
    pub branches_attempted: usize,
    /// Number of those candidates that led to a dead end and were undone.
    pub backtracks: usize,
    /// Wall-clock time of the solve, in milliseconds.
    pub duration_ms: u128,
}

impl Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "branches={}, backtracks={}, time={}ms",
            self.branches_attempted, self.backtracks, self.duration_ms,
        )
    }
}

fn new_base_table() -> Table {
    let mut t = Table::new();
    t.load_preset(presets::UTF8_FULL_CONDENSED);
    t.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    t.set_content_arrangement(ContentArrangement::Dynamic);
    t
}

fn add_value_row(t: &mut Table, metric: &str, value: &dyn Display) {
    t.add_row([
        Cell::new(metric).add_attribute(Attribute::Bold),
        Cell::new(format!("{value}")).set_alignment(CellAlignment::Right),
    ]);
}

/// Prints a formatted table for a single solve's statistics.
pub fn print_run_stats(stats: &RunStats) {
    let mut table = new_base_table();
    table.set_header(["Metric", "Value"]);

    add_value_row(&mut table, "Time (ms)", &stats.duration_ms);
    add_value_row(&mut table, "Branches attempted", &stats.branches_attempted);
    add_value_row(&mut table, "Backtracks", &stats.backtracks);

    println!("\nRun statistics\n\n{table}");
}
