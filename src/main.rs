//! # Wave Function Collapse solver CLI
//!
//! A command-line front end for the generic constraint-satisfaction engine
//! in the `wfc_solver` library: propagate, pick the most-constrained unsolved
//! cell, branch, backtrack on contradiction.
//!
//! ## CLI overview
//!
//! - `sudoku`: load a 9x9 Sudoku puzzle (a bundled easy puzzle by default)
//!   and solve it.
//! - `sudoku-mini`: load a puzzle from a file and print a bare solved/
//!   unsolved grid to stderr, nothing else.
//! - `loops`: solve a random Loops tile-matching grid of the given size.
//! - `automata`: reverse-reconstruct a Rule 30 grid from a single seed cell.
//!
//! Run with `--help` for full details.
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use colored::{ColoredString, Colorize};

use wfc_solver::domains::automata::{self, Rule30Rule};
use wfc_solver::domains::loops::{self, LoopsRule};
use wfc_solver::domains::sudoku::{self, SudokuRule};
use wfc_solver::error::SolverError;
use wfc_solver::fixtures::{self, EASY_SUDOKU};
use wfc_solver::planar::{PlanarSpace, PropagationRule};
use wfc_solver::position::Position;
use wfc_solver::solver::{NullObserver, Observer, Solver};
use wfc_solver::space::Space;
use wfc_solver::stats::print_run_stats;

/// Rejects a grid too small to hold any position, reporting the same
/// `SolverError` the fixture loader uses for other CLI-facing failures.
fn check_dimensions(width: usize, height: usize) -> Result<(), SolverError> {
    if width == 0 || height == 0 {
        return Err(SolverError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Default side length for a freshly generated Loops grid.
const DEFAULT_LOOPS_SIZE: usize = 25;
/// Default side length for a freshly generated Rule-30 grid.
const DEFAULT_AUTOMATA_SIZE: usize = 100;

/// Command-line arguments for the solver.
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands supported by the CLI, one per bundled domain.
#[derive(Subcommand)]
enum Commands {
    /// Solve a 9x9 Sudoku puzzle
    Sudoku {
        /// Path to a puzzle file; uses a bundled easy puzzle if omitted
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        /// Seed for the solver's random tie-breaking
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        /// Print the grid after every propagation step
        #[arg(short, long)]
        animate: bool,
    },
    /// Solve a Sudoku puzzle and print only SOLVED/UNSOLVED plus the grid
    SudokuMini {
        /// Path to a puzzle file
        fixture: PathBuf,
    },
    /// Solve a random Loops tile-matching grid
    Loops {
        #[arg(long, default_value_t = DEFAULT_LOOPS_SIZE)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_LOOPS_SIZE)]
        height: usize,
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[arg(short, long)]
        animate: bool,
    },
    /// Reverse-reconstruct a Rule 30 grid from a single seed cell
    Automata {
        #[arg(long, default_value_t = DEFAULT_AUTOMATA_SIZE)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_AUTOMATA_SIZE)]
        height: usize,
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[arg(short, long)]
        animate: bool,
    },
}

/// Prints a grid, one character per cell via `glyph`.
fn print_grid<R: PropagationRule>(space: &PlanarSpace<R>, glyph: impl Fn(&Position) -> char) {
    for y in 0..space.height() {
        let row: String = (0..space.width())
            .map(|x| glyph(space.get((x, y))))
            .collect();
        println!("{row}");
    }
}

/// Renders the grid to the terminal before every solver step, for `--animate`.
struct TerminalObserver<F> {
    step: usize,
    glyph: F,
}

impl<R: PropagationRule, F: Fn(&Position) -> char> Observer<PlanarSpace<R>> for TerminalObserver<F> {
    fn observe(&mut self, space: &PlanarSpace<R>) {
        println!("\n-- step {} --", self.step);
        print_grid(space, &self.glyph);
        self.step += 1;
    }
}

fn sudoku_glyph(position: &Position) -> char {
    if position.is_solved() {
        char::from_digit(position.state() as u32 + 1, 10).unwrap_or('?')
    } else {
        '.'
    }
}

fn loops_glyph(position: &Position) -> char {
    if !position.is_solved() {
        return '.';
    }
    match position.state() {
        0 => '└',
        1 => '┌',
        2 => '┐',
        3 => '┘',
        _ => '?',
    }
}

fn automata_glyph(position: &Position) -> char {
    if !position.is_solved() {
        return '.';
    }
    match position.state() {
        0 => ' ',
        1 => '#',
        _ => '?',
    }
}

fn banner(solved: bool, valid: bool) -> ColoredString {
    match (solved, valid) {
        (true, true) => "SOLVED".green().bold(),
        (true, false) => "INVALID".red().bold(),
        (false, _) => "UNSOLVED".yellow().bold(),
    }
}

fn run_sudoku(fixture: Option<PathBuf>, seed: u64, animate: bool) {
    let mut space = match fixture {
        Some(path) => fixtures::load_sudoku(&path).unwrap_or_else(|err| {
            eprintln!("{err}");
            std::process::exit(1);
        }),
        None => fixtures::parse_sudoku(EASY_SUDOKU),
    };

    let mut solver = Solver::new(seed);
    let solved = if animate {
        let mut observer = TerminalObserver {
            step: 0,
            glyph: sudoku_glyph,
        };
        solver.solve(&mut space, &mut observer)
    } else {
        solver.solve(&mut space, &mut NullObserver)
    };

    print_grid(&space, sudoku_glyph);
    println!("\n{}", banner(solved, sudoku::is_valid(&space)));
    print_run_stats(&solver.stats());
}

fn run_sudoku_mini(fixture: PathBuf) {
    let mut space = match fixtures::load_sudoku(&fixture) {
        Ok(space) => space,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let mut solver = Solver::new(0);
    let solved = solver.solve(&mut space, &mut NullObserver);

    eprintln!("{}", if solved { "SOLVED" } else { "UNSOLVED" });
    for y in 0..space.height() {
        let row: String = (0..space.width())
            .map(|x| {
                let position = space.get((x, y));
                if position.is_solved() {
                    char::from_digit(position.state() as u32 + 1, 10).unwrap_or(' ')
                } else {
                    ' '
                }
            })
            .collect();
        eprintln!("{row}");
    }
}

fn run_loops(width: usize, height: usize, seed: u64, animate: bool) {
    if let Err(err) = check_dimensions(width, height) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    let mut space = PlanarSpace::new(LoopsRule, width, height);
    let mut solver = Solver::new(seed);
    let solved = if animate {
        let mut observer = TerminalObserver {
            step: 0,
            glyph: loops_glyph,
        };
        solver.solve(&mut space, &mut observer)
    } else {
        solver.solve(&mut space, &mut NullObserver)
    };

    print_grid(&space, loops_glyph);
    println!("\n{}", banner(solved, loops::is_valid(&space)));
    print_run_stats(&solver.stats());
}

fn run_automata(width: usize, height: usize, seed: u64, animate: bool) {
    if let Err(err) = check_dimensions(width, height) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    let mut space = PlanarSpace::new(Rule30Rule, width, height);
    space.edge_mut().insert((width / 2, height / 2));

    let mut solver = Solver::new(seed);
    let solved = if animate {
        let mut observer = TerminalObserver {
            step: 0,
            glyph: automata_glyph,
        };
        solver.solve(&mut space, &mut observer)
    } else {
        solver.solve(&mut space, &mut NullObserver)
    };

    print_grid(&space, automata_glyph);
    println!("\n{}", banner(solved, automata::is_valid(&space)));
    print_run_stats(&solver.stats());
}

fn main() {
    let Args { command } = Args::parse();

    match command {
        Commands::Sudoku {
            fixture,
            seed,
            animate,
        } => run_sudoku(fixture, seed, animate),
        Commands::SudokuMini { fixture } => run_sudoku_mini(fixture),
        Commands::Loops {
            width,
            height,
            seed,
            animate,
        } => run_loops(width, height, seed, animate),
        Commands::Automata {
            width,
            height,
            seed,
            animate,
        } => run_automata(width, height, seed, animate),
    }
}
