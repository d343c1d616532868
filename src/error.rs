//! Error types
//!
//! Every failure in the core is deterministic: the same input and state fail
//! the same way, so none of these carry retry hints.

use thiserror::Error;

/// A token whose letter demands a number carried something else
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("invalid command code in token '{token}'")]
    InvalidCommand { token: String },

    #[error("invalid number for '{letter}' in token '{token}'")]
    InvalidNumber { letter: char, token: String },
}

/// Machine modes the minifier refuses to approximate
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum UnsupportedMode {
    #[error("linear move issued before the machine was homed")]
    NotHomed,

    #[error("linear moves in relative coordinate mode are not supported")]
    RelativeCoordinates,

    #[error("extra parameters on a linear move are not supported")]
    ExtendedMoveParameters,

    #[error("print moves require relative extrusion")]
    AbsoluteExtrusionPrintMove,
}

/// Failure while minifying a single line
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MinifyError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    UnsupportedMode(#[from] UnsupportedMode),

    #[error("unknown command: {line}")]
    UnknownCommand { line: String },
}

/// Failure of a whole minification pass
#[derive(Debug, Error)]
pub enum PassError {
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: MinifyError,
    },

    #[error("line {line}: failed to read: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PassError {
    /// 1-based number of the failing input line, if the failure came from one
    pub fn line_number(&self) -> Option<usize> {
        match self {
            PassError::Line { line, .. } | PassError::Read { line, .. } => Some(*line),
            PassError::Io(_) => None,
        }
    }
}
