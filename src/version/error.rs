use thiserror::Error;

use crate::version::matcher::UnmatchedComponent;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version segment '{segment}' in '{version}'")]
    InvalidSegment { version: String, segment: String },

    #[error("Comparison operator is invalid: {0}")]
    InvalidOperator(String),
}

/// Failures of the matching and expansion stages
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid candidate version: {0}")]
    InvalidVersion(#[from] VersionError),

    #[error("{}", format_unmatched(.0))]
    Unmatched(Vec<UnmatchedComponent>),

    #[error("Version matrix is empty")]
    EmptyMatrix,
}

impl MatchError {
    /// True when the failure means "nothing matched" rather than broken input
    pub fn is_unmatched(&self) -> bool {
        matches!(self, MatchError::Unmatched(_) | MatchError::EmptyMatrix)
    }
}

fn format_unmatched(components: &[UnmatchedComponent]) -> String {
    components
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
