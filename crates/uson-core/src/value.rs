//! The dynamic value model produced by parsing.
//!
//! A parsed document is a tree of [`Value`]s. `Map` and `Sequence` are the only
//! composite variants; everything else is a scalar. Maps preserve insertion order,
//! and writing an existing key replaces its value in place.

use std::fmt;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::Result;

/// Insertion-ordered map from key to value.
pub type Map = IndexMap<String, Value>;

/// A parsed USON value.
///
/// `Null` and `Absent` are two distinct "no value" markers: `null` and
/// `undefined` in the notation respectively.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Any numeral. Malformed numerals such as `--` become NaN.
    Number(f64),
    /// Quoted or bare text, stored verbatim.
    Text(String),
    Boolean(bool),
    Null,
    Absent,
    Pattern(Pattern),
    Sequence(Vec<Value>),
    Map(Map),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` if this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// `true` for `Map` and `Sequence`.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Sequence(_))
    }

    /// Project this value onto JSON.
    ///
    /// Integral numbers become JSON integers, non-finite numbers become `null`,
    /// `Absent` becomes `null`, and patterns become their `/source/flags` text.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(n) => number_to_json(*n),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Null | Value::Absent => serde_json::Value::Null,
            Value::Pattern(p) => serde_json::Value::String(p.to_string()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Numbers with no fractional part that fit in an `i64` are emitted as integers
/// so `1` does not print as `1.0`.
fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
        Some(n as i64)
    } else {
        None
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if let Some(i) = integral(n) {
        return serde_json::Value::Number(i.into());
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None if n.is_finite() => serializer.serialize_f64(*n),
                None => serializer.serialize_unit(),
            },
            Value::Text(s) => serializer.serialize_str(s),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Null | Value::Absent => serializer.serialize_unit(),
            Value::Pattern(p) => serializer.collect_str(p),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Pattern(p)
    }
}

/// A `/source/` or `/source/i` pattern literal.
///
/// The source is kept exactly as written between the slashes. It is compiled
/// on demand, so an unusual pattern never makes a document fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub source: String,
    pub case_insensitive: bool,
}

impl Pattern {
    pub fn new(source: impl Into<String>, case_insensitive: bool) -> Self {
        Self {
            source: source.into(),
            case_insensitive,
        }
    }

    /// Compile into a regular expression honoring the case-insensitive flag.
    pub fn compile(&self) -> Result<Regex> {
        Ok(RegexBuilder::new(&self.source)
            .case_insensitive(self.case_insensitive)
            .build()?)
    }

    /// Compile and test `text` in one step.
    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.compile()?.is_match(text))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)?;
        if self.case_insensitive {
            f.write_str("i")?;
        }
        Ok(())
    }
}
