use std::{io, path::PathBuf, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read map file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = result::Result<T, Error>;

/// Reasons a plane line is rejected.
/// A rejected line is skipped, the rest of the brush is still parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaneError {
    #[error("expected at least {expected} tokens, got {found}")]
    TooFewTokens { expected: usize, found: usize },
    #[error("expected `{expected}` at token {index}, got `{found}`")]
    UnexpectedToken {
        index: usize,
        expected: &'static str,
        found: String,
    },
    #[error("{field} at token {index} is not a valid number: `{found}`")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        found: String,
    },
    #[error("plane points are collinear")]
    Degenerate,
}
