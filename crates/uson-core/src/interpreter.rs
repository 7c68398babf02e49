//! Tree interpreter — reduces a parse tree to a [`Value`].
//!
//! Dispatch is an exhaustive match on [`ParseNode`]:
//!
//! | Node | Result |
//! |---|---|
//! | `Leaf` | the value itself |
//! | `Object` | body merge-folded into a `Map` |
//! | `Array` | body reduced item by item into a `Sequence` |
//! | `Assign` | one-entry `Map` keyed by the head of the key path |
//! | `Comment` | dropped by whichever container holds it |
//!
//! # Merge-fold
//!
//! Folding walks the reduced items in order with a positional counter starting
//! at 0. Maps are merged in (later keys overwrite earlier ones, the counter is
//! untouched); every other value is stored under the counter's decimal string
//! and bumps the counter. So `{a: 1, x, [2]}` folds to
//! `{"a": 1, "0": "x", "1": [2]}`.

use crate::tree::{Document, ParseNode};
use crate::value::{Map, Value};

/// Result of reducing one node. Comments reduce to `Drop`, which containers
/// filter out, so it never reaches a returned `Value`.
#[derive(Debug)]
enum Reduced {
    Drop,
    Value(Value),
}

/// Reduce a single node.
///
/// A bare comment has no value of its own and reduces to [`Value::Absent`].
pub fn reduce(node: &ParseNode, object_mode: bool) -> Value {
    match reduce_node(node, object_mode) {
        Reduced::Value(value) => value,
        Reduced::Drop => Value::Absent,
    }
}

/// Reduce a whole document: a `Sequence` of its items, or in object mode one
/// merge-folded `Map`.
pub fn reduce_document(document: &Document, object_mode: bool) -> Value {
    if object_mode {
        Value::Map(merge_fold(&document.items, object_mode))
    } else {
        Value::Sequence(reduce_sequence(&document.items, object_mode))
    }
}

fn reduce_node(node: &ParseNode, object_mode: bool) -> Reduced {
    match node {
        ParseNode::Leaf { value } => Reduced::Value(value.clone()),
        ParseNode::Object { body } => Reduced::Value(Value::Map(merge_fold(body, object_mode))),
        ParseNode::Array { body } => Reduced::Value(Value::Sequence(reduce_sequence(body, object_mode))),
        ParseNode::Assign { path, value } => match reduce_node(value, object_mode) {
            // `key: # note` assigns nothing.
            Reduced::Drop => Reduced::Drop,
            Reduced::Value(value) => {
                let mut map = Map::with_capacity(1);
                map.insert(path.key().to_string(), value);
                Reduced::Value(Value::Map(map))
            }
        },
        ParseNode::Comment => Reduced::Drop,
    }
}

fn reduce_sequence(items: &[ParseNode], object_mode: bool) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| match reduce_node(item, object_mode) {
            Reduced::Drop => None,
            Reduced::Value(value) => Some(value),
        })
        .collect()
}

fn merge_fold(items: &[ParseNode], object_mode: bool) -> Map {
    let mut out = Map::new();
    let mut position: usize = 0;
    for item in items {
        match reduce_node(item, object_mode) {
            Reduced::Drop => {}
            Reduced::Value(Value::Map(entries)) => {
                for (key, value) in entries {
                    out.insert(key, value);
                }
            }
            Reduced::Value(value) => {
                out.insert(position.to_string(), value);
                position += 1;
            }
        }
    }
    out
}
