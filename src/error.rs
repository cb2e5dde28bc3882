use std::path::PathBuf;

use thiserror::Error;

use crate::config::{EXIT_FAILED, EXIT_UNMATCHED};
use crate::parser::traits::ParseError;
use crate::version::error::MatchError;

/// Fatal outcome of a matrix run
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration
    #[error("{0}")]
    Input(String),

    #[error("Failed to load config {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Failed to read case versions file {path:?}: {source}")]
    ReadRules {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse case versions rules failed: {path:?}: {source}")]
    Rules { path: PathBuf, source: ParseError },

    #[error(transparent)]
    Candidates(ParseError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Write version matrix failed: {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// True when the run failed because nothing matched
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Error::Match(e) if e.is_unmatched())
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        if self.is_unmatched() {
            EXIT_UNMATCHED
        } else {
            EXIT_FAILED
        }
    }
}
