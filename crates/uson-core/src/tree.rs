//! Parse tree produced by the grammar and consumed by the interpreter.
//!
//! Trees are available directly through [`crate::tokenize`] for diagnostics;
//! most callers want [`crate::parse`], which reduces the tree to a [`Value`].
//! Every node type serializes to JSON, tagged by `"type"`.

use serde::{Serialize, Serializer};

use crate::value::Value;

/// One item of a document or container body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParseNode {
    /// `key: value`. The value side may itself be another assignment.
    Assign { path: KeyPath, value: Box<ParseNode> },
    /// `{ ... }`
    Object { body: Vec<ParseNode> },
    /// `[ ... ]`
    Array { body: Vec<ParseNode> },
    /// `# ...` up to the end of the line.
    Comment,
    /// Any scalar: number, text, boolean, null, undefined or pattern.
    Leaf { value: Value },
}

impl ParseNode {
    pub fn leaf(value: impl Into<Value>) -> Self {
        ParseNode::Leaf {
            value: value.into(),
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, ParseNode::Comment)
    }
}

/// The key side of an assignment: `name` optionally followed by `[seg]` or `[]`
/// suffixes, as in `list[items][]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    pub head: String,
    pub segments: Vec<KeySegment>,
}

impl KeyPath {
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            segments: Vec::new(),
        }
    }

    /// The key an assignment is stored under. Bracket segments do not take part.
    pub fn key(&self) -> &str {
        &self.head
    }
}

/// Serialized as `[head, seg, ...]`.
impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.segments.len() + 1))?;
        seq.serialize_element(&self.head)?;
        for segment in &self.segments {
            seq.serialize_element(segment)?;
        }
        seq.end()
    }
}

/// A bracketed suffix of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySegment {
    /// `[name]`
    Name(String),
    /// `[]`, serialized as `true`.
    Empty,
}

impl Serialize for KeySegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            KeySegment::Name(name) => serializer.serialize_str(name),
            KeySegment::Empty => serializer.serialize_bool(true),
        }
    }
}

/// A whole parsed document: the top-level items in source order. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    pub items: Vec<ParseNode>,
}

impl Document {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
