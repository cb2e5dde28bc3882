//! Parser trait definition

/// Trait for parsing the textual inputs of a matrix run
pub trait Parser {
    type Output;

    /// Parse the whole content; the first error aborts with no partial result
    fn parse(&self, content: &str) -> Result<Self::Output, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Malformed rule grammar
    #[error("Version match rule is invalid (line {line}): {message}")]
    InvalidRule { line: usize, message: String },

    /// Malformed range expression such as `>=` or `>1 <2 <3`
    #[error("Parse range match rule failed (line {line}): {message}")]
    InvalidRange { line: usize, message: String },

    /// Malformed candidate version list
    #[error("Invalid candidate versions: {0}")]
    InvalidCandidates(String),
}
