//! Error type shared by estimation, decoding and the file loaders.
//!
//! Every failure is fatal for the operation that raised it: there are no
//! retries and no partial results.

use crate::labels::Label;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, estimating or decoding.
#[derive(Debug, Error)]
pub enum HmmError {
    /// Malformed corpus or job file. `line` is 1-based.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Structurally invalid corpus (empty runs, mismatched lengths).
    #[error("invalid corpus: {0}")]
    Corpus(String),

    /// An observation label never seen during estimation.
    #[error("observation {label} at position {position} is not in the training alphabet")]
    UnknownObservation { label: Label, position: usize },

    /// Decoding was asked for a zero-length observation sequence.
    #[error("cannot decode an empty observation sequence")]
    EmptySequence,

    /// The state space holds nothing besides the start pseudo-state.
    #[error("model has no candidate hidden states besides the start state")]
    NoCandidateStates,

    /// The configured start pseudo-state is not part of the state space.
    #[error("start state {0} does not occur in the training corpus")]
    MissingStartState(Label),

    /// The start pseudo-state also appears as an ordinary hidden state.
    #[error("start state {label} occurs {interior} time(s) inside training runs")]
    StartStateCollision { label: Label, interior: u64 },

    /// A hand-built model violates the matrix shape or value invariants.
    #[error("malformed model: {0}")]
    Shape(String),

    /// Underlying file access failure.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HmmError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Attach the path being read or written to an I/O failure.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_reports_line() {
        let err = HmmError::parse(3, "expected integer, found `x`");
        assert_eq!(
            err.to_string(),
            "parse error at line 3: expected integer, found `x`"
        );
    }

    #[test]
    fn io_error_keeps_path_and_source() {
        use std::error::Error as _;
        let err = HmmError::io(
            "data/missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().starts_with("data/missing.txt: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn unknown_observation_names_label_and_position() {
        let err = HmmError::UnknownObservation {
            label: 42,
            position: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("position 7"));
    }
}
