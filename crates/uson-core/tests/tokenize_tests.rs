/// Tests for `tokenize`: the raw parse tree before reduction, and its JSON form.
use serde_json::json;
use uson_core::{tokenize, KeyPath, KeySegment, ParseNode, Value};

fn items(text: &str) -> Vec<ParseNode> {
    tokenize(text)
        .unwrap_or_else(|e| panic!("tokenize failed for {text:?}: {e}"))
        .items
}

// ============================================================================
// Node shapes
// ============================================================================

#[test]
fn tokenize_scalars_are_leaves() {
    assert_eq!(
        items("1 two \"three\""),
        vec![
            ParseNode::leaf(1.0),
            ParseNode::leaf("two"),
            ParseNode::leaf("three"),
        ]
    );
}

#[test]
fn tokenize_assignment() {
    assert_eq!(
        items("a: 1"),
        vec![ParseNode::Assign {
            path: KeyPath::new("a"),
            value: Box::new(ParseNode::leaf(1.0)),
        }]
    );
}

#[test]
fn tokenize_key_path_segments_are_retained() {
    let nodes = items("a[b][]: 1");
    let ParseNode::Assign { path, .. } = &nodes[0] else {
        panic!("expected assignment, got {:?}", nodes[0]);
    };
    assert_eq!(path.head, "a");
    assert_eq!(
        path.segments,
        vec![KeySegment::Name("b".to_string()), KeySegment::Empty]
    );
    assert_eq!(path.key(), "a");
}

#[test]
fn tokenize_comment_is_a_node() {
    assert_eq!(
        items("1 # one\n2"),
        vec![ParseNode::leaf(1.0), ParseNode::Comment, ParseNode::leaf(2.0)]
    );
}

#[test]
fn tokenize_comment_stops_at_carriage_return() {
    assert_eq!(
        items("# note\r3"),
        vec![ParseNode::Comment, ParseNode::leaf(3.0)]
    );
}

#[test]
fn tokenize_bare_hash_is_a_comment() {
    assert_eq!(items("#\n1"), vec![ParseNode::Comment, ParseNode::leaf(1.0)]);
}

#[test]
fn tokenize_assignment_to_comment() {
    let nodes = items("a: # nothing here\n");
    assert_eq!(
        nodes,
        vec![ParseNode::Assign {
            path: KeyPath::new("a"),
            value: Box::new(ParseNode::Comment),
        }]
    );
}

#[test]
fn tokenize_containers_keep_body_order() {
    assert_eq!(
        items("{b: 2, x} [y # c\n]"),
        vec![
            ParseNode::Object {
                body: vec![
                    ParseNode::Assign {
                        path: KeyPath::new("b"),
                        value: Box::new(ParseNode::leaf(2.0)),
                    },
                    ParseNode::leaf("x"),
                ],
            },
            ParseNode::Array {
                body: vec![ParseNode::leaf("y"), ParseNode::Comment],
            },
        ]
    );
}

#[test]
fn tokenize_keywords() {
    assert_eq!(
        items("true false null undefined"),
        vec![
            ParseNode::leaf(true),
            ParseNode::leaf(false),
            ParseNode::Leaf { value: Value::Null },
            ParseNode::Leaf {
                value: Value::Absent
            },
        ]
    );
}

#[test]
fn tokenize_leading_and_trailing_separators() {
    assert_eq!(items(" ,\n\t1,\r\n"), vec![ParseNode::leaf(1.0)]);
}

// ============================================================================
// JSON projection
// ============================================================================

#[test]
fn tokenize_serializes_tagged_nodes() {
    let document = tokenize("a[b][]: 1 # c\n[x] {}").unwrap();
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(
        value,
        json!([
            {
                "type": "assign",
                "path": ["a", "b", true],
                "value": {"type": "leaf", "value": 1}
            },
            {"type": "comment"},
            {"type": "array", "body": [{"type": "leaf", "value": "x"}]},
            {"type": "object", "body": []}
        ])
    );
}

#[test]
fn tokenize_serializes_patterns_as_text() {
    let document = tokenize("/a+b/i").unwrap();
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value, json!([{"type": "leaf", "value": "/a+b/i"}]));
}
