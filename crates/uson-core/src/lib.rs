//! # uson-core
//!
//! Pure-Rust parser for **USON**, a compact notation for structured data where
//! items are separated by whitespace or commas and keys need no quoting.
//!
//! A document is a list of items. Each item is a scalar (`42`, `hello`,
//! `"quoted text"`, `true`, `null`, `undefined`, `/pattern/i`), a container
//! (`{...}` or `[...]`), an assignment (`key: item`), or a `#` comment.
//!
//! ## Quick start
//!
//! ```rust
//! use serde_json::json;
//! use uson_core::{parse, parse_object};
//!
//! // Default mode: the document is a sequence of items.
//! let value = parse("a: 1, b: [2 3]").unwrap();
//! assert_eq!(value.to_json(), json!([{"a": 1}, {"b": [2, 3]}]));
//!
//! // Object mode: the items are merged into one map.
//! let value = parse_object("a: 1, b: {c: true} # trailing comment").unwrap();
//! assert_eq!(value.to_json(), json!({"a": 1, "b": {"c": true}}));
//! ```
//!
//! ## Modules
//!
//! - `grammar` (internal) — notation text → parse tree
//! - [`interpreter`] — parse tree → [`Value`], including merge-fold
//! - [`tree`] — [`ParseNode`] parse tree types
//! - [`value`] — [`Value`] dynamic value model and JSON projection
//! - [`options`] — [`ParseOptions`]
//! - [`error`] — error types

mod grammar;
pub mod error;
pub mod interpreter;
pub mod options;
pub mod tree;
pub mod value;

pub use error::{Result, SyntaxError, UsonError};
pub use interpreter::{reduce, reduce_document};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use tree::{Document, KeyPath, KeySegment, ParseNode};
pub use value::{Map, Pattern, Value};

/// Parse a document into a sequence of its top-level items.
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, &ParseOptions::default())
}

/// Parse a document and merge its top-level items into a single map.
pub fn parse_object(text: &str) -> Result<Value> {
    parse_with(text, &ParseOptions::default().object_mode(true))
}

/// Parse with explicit options.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Value> {
    let document = tokenize_with(text, options)?;
    Ok(reduce_document(&document, options.object_mode))
}

/// Parse a document into its raw parse tree without reducing it.
pub fn tokenize(text: &str) -> Result<Document> {
    tokenize_with(text, &ParseOptions::default())
}

/// [`tokenize`] with explicit options. Only the limits apply; `object_mode`
/// affects reduction, not the tree.
pub fn tokenize_with(text: &str, options: &ParseOptions) -> Result<Document> {
    if let Some(limit) = options.max_input_len {
        if text.len() > limit {
            return Err(UsonError::InputTooLarge {
                len: text.len(),
                limit,
            });
        }
    }

    log::debug!(
        "parsing {} bytes (object_mode={}, max_depth={})",
        text.len(),
        options.object_mode,
        options.max_depth
    );
    match grammar::parse_document(text, options.max_depth) {
        Ok(document) => {
            log::debug!("parsed {} top-level items", document.len());
            Ok(document)
        }
        Err(e) => {
            log::debug!("parse failed: {e}");
            Err(e)
        }
    }
}
