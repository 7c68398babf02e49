//! Error types for USON parsing.

use thiserror::Error;

/// Errors that can occur while parsing USON or working with parsed values.
#[derive(Error, Debug)]
pub enum UsonError {
    /// The input was not valid USON. Carries the furthest position the parser
    /// reached and what it expected there.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Brace, bracket or assignment nesting went deeper than the configured limit.
    #[error("nesting depth exceeds limit of {limit} at offset {offset}")]
    DepthLimit { limit: usize, offset: usize },

    /// The input is longer than the configured maximum.
    #[error("input of {len} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { len: usize, limit: usize },

    /// A pattern literal could not be compiled into a regular expression.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A malformed or incomplete USON document.
///
/// `offset` is a byte offset into the input; `line` and `column` are 1-based
/// and count characters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SyntaxError {
    /// Human-readable summary, e.g. `Expected ":" or "]" but "}" found.`
    pub message: String,
    /// Descriptions of the tokens that would have been accepted at `offset`,
    /// sorted and deduplicated.
    pub expected: Vec<String>,
    /// The character at `offset`, or `None` at end of input.
    pub found: Option<char>,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Convenience alias used throughout uson-core.
pub type Result<T> = std::result::Result<T, UsonError>;
