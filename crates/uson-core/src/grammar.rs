//! USON grammar — recursive-descent parser from notation text to a parse tree.
//!
//! ```text
//! document     := ws control expr
//! expr         := ws (control ws)* ws
//! control      := assign | value | comment
//! assign       := keyPath ws ':' ws control
//! keyPath      := key ('[' key? ']')*
//! value        := number | object | array | boolean | undefined | null
//!               | pattern | quotedString | bareString
//! ```
//!
//! # Key design decisions
//!
//! - **Ordered choice**: every alternative saves the cursor and restores it on
//!   failure; the first alternative that matches wins and is never revisited.
//!   `assign` is tried before `value`, so anything followed by `:` is a key, and
//!   the keywords shadow bare strings only because they are tried first.
//! - **Furthest-failure reporting**: each failed primitive match records what it
//!   expected. Only failures at the furthest position seen so far are kept, so
//!   the final error points at the deepest point the parser reached rather than
//!   wherever the last alternative happened to give up.
//! - **Two failure channels**: rule functions return `Ok(None)` for "did not
//!   match here" and `Err(_)` only for conditions that abort the whole parse
//!   (the nesting limit).

use crate::error::{Result, SyntaxError, UsonError};
use crate::tree::{Document, KeyPath, KeySegment, ParseNode};
use crate::value::{Pattern, Value};

// Token descriptions reported in `SyntaxError::expected`.
const KEY_CHAR: &str = r"[\-_a-zA-Z0-9]";
const NUMBER_CHAR: &str = r"[0-9.\-]";
const SEPARATOR: &str = r"[\r\t\n, ]";
const COMMENT_CHAR: &str = r"[^\r\n]";
const PATTERN_CHAR: &str = r"[^\/]";
const QUOTED_CHAR: &str = r#"[^"]"#;
const PATTERN_FLAG: &str = "[i]";
const END_OF_INPUT: &str = "end of input";

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

fn is_separator(c: char) -> bool {
    matches!(c, '\r' | '\t' | '\n' | ',' | ' ')
}

/// Parse a complete document. Fails unless the whole input is consumed.
pub(crate) fn parse_document(input: &str, max_depth: usize) -> Result<Document> {
    Parser::new(input, max_depth).document()
}

/// Cursor plus furthest-failure bookkeeping for a single parse call.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
    max_fail_pos: usize,
    max_fail_expected: Vec<&'static str>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, max_depth: usize) -> Self {
        Self {
            input,
            pos: 0,
            max_fail_pos: 0,
            max_fail_expected: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Record a failed match at the current position.
    fn fail(&mut self, expected: &'static str) {
        if self.pos < self.max_fail_pos {
            return;
        }
        if self.pos > self.max_fail_pos {
            self.max_fail_pos = self.pos;
            self.max_fail_expected.clear();
        }
        self.max_fail_expected.push(expected);
    }

    fn literal(&mut self, lit: &'static str, description: &'static str) -> bool {
        if self.input[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            self.fail(description);
            false
        }
    }

    fn class(&mut self, pred: fn(char) -> bool, description: &'static str) -> bool {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                true
            }
            _ => {
                self.fail(description);
                false
            }
        }
    }

    /// Zero or more characters of a class.
    fn many0(&mut self, pred: fn(char) -> bool, description: &'static str) -> &'a str {
        let start = self.pos;
        while self.class(pred, description) {}
        &self.input[start..self.pos]
    }

    /// One or more characters of a class.
    fn many1(&mut self, pred: fn(char) -> bool, description: &'static str) -> Option<&'a str> {
        let run = self.many0(pred, description);
        if run.is_empty() {
            None
        } else {
            Some(run)
        }
    }

    fn ws(&mut self) {
        self.many0(is_separator, SEPARATOR);
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(UsonError::DepthLimit {
                limit: self.max_depth,
                offset: self.pos,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    fn document(mut self) -> Result<Document> {
        self.ws();
        let Some(head) = self.control()? else {
            return Err(self.error().into());
        };
        let mut items = vec![head];
        items.extend(self.expr()?);

        if self.pos < self.input.len() {
            self.fail(END_OF_INPUT);
            return Err(self.error().into());
        }
        Ok(Document { items })
    }

    /// Never fails: an empty body is valid.
    fn expr(&mut self) -> Result<Vec<ParseNode>> {
        let mut items = Vec::new();
        self.ws();
        while let Some(node) = self.control()? {
            items.push(node);
            self.ws();
        }
        self.ws();
        Ok(items)
    }

    fn control(&mut self) -> Result<Option<ParseNode>> {
        if let Some(node) = self.assign()? {
            return Ok(Some(node));
        }
        if let Some(node) = self.value()? {
            return Ok(Some(node));
        }
        Ok(self.comment())
    }

    fn assign(&mut self) -> Result<Option<ParseNode>> {
        let start = self.pos;
        let Some(path) = self.key_path() else {
            return Ok(None);
        };
        self.ws();
        if !self.literal(":", "\":\"") {
            self.pos = start;
            return Ok(None);
        }
        self.ws();

        self.enter()?;
        let value = self.control()?;
        self.leave();

        match value {
            Some(value) => Ok(Some(ParseNode::Assign {
                path,
                value: Box::new(value),
            })),
            None => {
                self.pos = start;
                Ok(None)
            }
        }
    }

    fn key_path(&mut self) -> Option<KeyPath> {
        let head = self.many1(is_key_char, KEY_CHAR)?;
        let mut path = KeyPath::new(head);
        loop {
            let save = self.pos;
            if !self.literal("[", "\"[\"") {
                break;
            }
            let inner = self.many1(is_key_char, KEY_CHAR);
            if !self.literal("]", "\"]\"") {
                self.pos = save;
                break;
            }
            path.segments.push(match inner {
                Some(name) => KeySegment::Name(name.to_string()),
                None => KeySegment::Empty,
            });
        }
        Some(path)
    }

    fn comment(&mut self) -> Option<ParseNode> {
        if !self.literal("#", "\"#\"") {
            return None;
        }
        self.many0(|c| c != '\r' && c != '\n', COMMENT_CHAR);
        Some(ParseNode::Comment)
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    fn value(&mut self) -> Result<Option<ParseNode>> {
        if let Some(n) = self.number() {
            return Ok(Some(n));
        }
        if let Some(body) = self.container(("{", "\"{\""), ("}", "\"}\""))? {
            return Ok(Some(ParseNode::Object { body }));
        }
        if let Some(body) = self.container(("[", "\"[\""), ("]", "\"]\""))? {
            return Ok(Some(ParseNode::Array { body }));
        }
        let scalar = self
            .boolean()
            .or_else(|| self.keyword("undefined", "\"undefined\"", Value::Absent))
            .or_else(|| self.keyword("null", "\"null\"", Value::Null))
            .or_else(|| self.pattern())
            .or_else(|| self.quoted_string())
            .or_else(|| self.bare_string());
        Ok(scalar.map(|value| ParseNode::Leaf { value }))
    }

    fn number(&mut self) -> Option<ParseNode> {
        let numeral = self.many1(is_number_char, NUMBER_CHAR)?;
        Some(ParseNode::leaf(parse_numeral(numeral)))
    }

    /// `open expr close`, shared by object and array literals.
    /// Each delimiter is given as `(literal, description)`.
    fn container(
        &mut self,
        (open, open_desc): (&'static str, &'static str),
        (close, close_desc): (&'static str, &'static str),
    ) -> Result<Option<Vec<ParseNode>>> {
        let start = self.pos;
        if !self.literal(open, open_desc) {
            return Ok(None);
        }

        self.enter()?;
        let body = self.expr()?;
        self.leave();

        if !self.literal(close, close_desc) {
            self.pos = start;
            return Ok(None);
        }
        Ok(Some(body))
    }

    fn boolean(&mut self) -> Option<Value> {
        if self.literal("true", "\"true\"") {
            Some(Value::Boolean(true))
        } else if self.literal("false", "\"false\"") {
            Some(Value::Boolean(false))
        } else {
            None
        }
    }

    fn keyword(&mut self, word: &'static str, description: &'static str, value: Value) -> Option<Value> {
        self.literal(word, description).then_some(value)
    }

    fn pattern(&mut self) -> Option<Value> {
        let start = self.pos;
        if !self.literal("/", "\"/\"") {
            return None;
        }
        let source = self.many0(|c| c != '/', PATTERN_CHAR);
        if !self.literal("/", "\"/\"") {
            self.pos = start;
            return None;
        }
        let case_insensitive = self.class(|c| c == 'i', PATTERN_FLAG);
        Some(Value::Pattern(Pattern::new(source, case_insensitive)))
    }

    fn quoted_string(&mut self) -> Option<Value> {
        let start = self.pos;
        if !self.literal("\"", "\"\\\"\"") {
            return None;
        }
        let text = self.many0(|c| c != '"', QUOTED_CHAR);
        if !self.literal("\"", "\"\\\"\"") {
            self.pos = start;
            return None;
        }
        Some(Value::Text(text.to_string()))
    }

    fn bare_string(&mut self) -> Option<Value> {
        self.many1(is_key_char, KEY_CHAR)
            .map(|text| Value::Text(text.to_string()))
    }

    // ------------------------------------------------------------------
    // Error construction
    // ------------------------------------------------------------------

    fn error(&self) -> SyntaxError {
        let offset = self.max_fail_pos;
        let found = self.input[offset..].chars().next();

        let mut expected: Vec<String> = self
            .max_fail_expected
            .iter()
            .map(|s| s.to_string())
            .collect();
        expected.sort();
        expected.dedup();

        let (line, column) = line_column(self.input, offset);
        SyntaxError {
            message: build_message(&expected, found),
            expected,
            found,
            offset,
            line,
            column,
        }
    }
}

/// Convert a run of `[0-9.-]` into a number using its longest valid leading
/// numeral (`-12.5x` → `-12.5`). A run with no leading numeral is NaN.
fn parse_numeral(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut i = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        i = 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_part = &text[int_start..i];

    let mut frac_part = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_part = &text[frac_start..j];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return f64::NAN;
    }

    let mut literal = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }
    literal.parse().unwrap_or(f64::NAN)
}

/// 1-based line and column of byte `offset`. `\n`, `\r`, U+2028 and U+2029
/// each end a line, except that `\r\n` counts once.
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    let mut seen_cr = false;
    for c in input[..offset].chars() {
        match c {
            '\n' => {
                if !seen_cr {
                    line += 1;
                }
                column = 1;
                seen_cr = false;
            }
            '\r' | '\u{2028}' | '\u{2029}' => {
                line += 1;
                column = 1;
                seen_cr = true;
            }
            _ => {
                column += 1;
                seen_cr = false;
            }
        }
    }
    (line, column)
}

fn build_message(expected: &[String], found: Option<char>) -> String {
    let found = match found {
        Some(c) => format!("\"{}\"", escape_char(c)),
        None => END_OF_INPUT.to_string(),
    };
    match expected.split_last() {
        None => format!("Unexpected {found}."),
        Some((only, [])) => format!("Expected {only} but {found} found."),
        Some((last, rest)) => format!("Expected {} or {last} but {found} found.", rest.join(", ")),
    }
}

fn escape_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '"' => "\\\"".to_string(),
        '\u{8}' => "\\b".to_string(),
        '\t' => "\\t".to_string(),
        '\n' => "\\n".to_string(),
        '\u{c}' => "\\f".to_string(),
        '\r' => "\\r".to_string(),
        c if c.is_control() => format!("\\x{:02X}", c as u32),
        c => c.to_string(),
    }
}
