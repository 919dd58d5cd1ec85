//! Error types for the ambient surfaces — fixture loading and CLI argument
//! handling. The core propagate/solve/remove path never produces one of
//! these: contradictions are signaled with a plain `bool`, per spec.md §7.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced at the crate's external boundaries.
#[derive(Debug)]
pub enum SolverError {
    /// A fixture file could not be read.
    Fixture { path: PathBuf, source: io::Error },
    /// A puzzle dimension was invalid for the requested domain.
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Fixture { path, source } => {
                write!(f, "failed to read fixture {}: {source}", path.display())
            }
            SolverError::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Fixture { source, .. } => Some(source),
            SolverError::InvalidDimensions { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_error_mentions_the_path() {
        let err = SolverError::Fixture {
            path: PathBuf::from("puzzles/easy.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("puzzles/easy.txt"));
    }
}
