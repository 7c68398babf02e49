//! Parse options.

use serde::{Deserialize, Serialize};

/// Default limit on brace, bracket and assignment nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Controls how a document is parsed and reduced.
///
/// ```
/// use uson_core::ParseOptions;
///
/// let opts = ParseOptions::new().object_mode(true).max_depth(32);
/// assert!(opts.object_mode);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Merge the top-level items into one map instead of returning a sequence.
    pub object_mode: bool,
    /// Deepest nesting accepted before failing with `UsonError::DepthLimit`.
    pub max_depth: usize,
    /// Reject inputs longer than this many bytes. `None` means unlimited.
    pub max_input_len: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            object_mode: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_mode(mut self, enabled: bool) -> Self {
        self.object_mode = enabled;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_input_len(mut self, len: Option<usize>) -> Self {
        self.max_input_len = len;
        self
    }
}
