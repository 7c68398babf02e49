/// Property-based tests for the parser and interpreter.
///
/// Documents are generated from a small vocabulary that is always valid USON:
/// integers, bare words, and `key: integer` assignments. Bare words start with
/// a letter in `g..=m` so they never begin with a keyword (`true`, `false`,
/// `null`, `undefined`), which would split the token.
use indexmap::IndexMap;
use proptest::prelude::*;
use uson_core::{parse, parse_object, UsonError, Value};

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum Item {
    Int(i32),
    Word(String),
    Assign(String, i32),
}

impl Item {
    fn render(&self) -> String {
        match self {
            Item::Int(n) => n.to_string(),
            Item::Word(w) => w.clone(),
            Item::Assign(k, n) => format!("{k}: {n}"),
        }
    }
}

fn arb_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[g-m][a-z0-9_-]{0,8}").unwrap()
}

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]").unwrap()
}

fn arb_item() -> impl Strategy<Value = Item> {
    prop_oneof![
        (-10_000i32..10_000).prop_map(Item::Int),
        arb_word().prop_map(Item::Word),
        (arb_key(), -100i32..100).prop_map(|(k, n)| Item::Assign(k, n)),
    ]
}

/// Comment text never contains a line break.
fn arb_comment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ,:#{}\\[\\]\"/]{0,20}").unwrap()
}

fn render(items: &[Item]) -> String {
    items.iter().map(Item::render).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn comments_are_no_ops(
        items in prop::collection::vec(arb_item(), 1..8),
        comments in prop::collection::vec(prop::option::of(arb_comment()), 8),
    ) {
        let plain = render(&items);

        let mut commented = String::new();
        for (i, item) in items.iter().enumerate() {
            commented.push_str(&item.render());
            match &comments[i] {
                Some(text) => {
                    commented.push_str(" #");
                    commented.push_str(text);
                    commented.push('\n');
                }
                None => commented.push_str(", "),
            }
        }

        prop_assert_eq!(parse(&plain).unwrap(), parse(&commented).unwrap());
        prop_assert_eq!(parse_object(&plain).unwrap(), parse_object(&commented).unwrap());
    }

    #[test]
    fn trailing_garbage_is_reported_at_its_offset(
        items in prop::collection::vec(arb_item(), 1..8),
    ) {
        let text = format!("{}}}", render(&items));
        match parse(&text) {
            Err(UsonError::Syntax(e)) => {
                prop_assert_eq!(e.offset, text.len() - 1);
                prop_assert_eq!(e.found, Some('}'));
            }
            other => prop_assert!(false, "expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn array_and_object_literals_agree_positionally(
        numbers in prop::collection::vec(-1000i32..1000, 0..12),
    ) {
        let body = numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        let array = parse(&format!("[{body}]")).unwrap();
        let object = parse(&format!("{{{body}}}")).unwrap();

        let seq = array.as_sequence().unwrap()[0].as_sequence().unwrap().to_vec();
        let map = object.as_sequence().unwrap()[0].as_map().unwrap().clone();

        prop_assert_eq!(seq.len(), map.len());
        for (i, (key, value)) in map.iter().enumerate() {
            prop_assert_eq!(key, &i.to_string());
            prop_assert_eq!(value, &seq[i]);
        }
    }

    #[test]
    fn numeral_runs_always_parse_to_one_number(text in "[0-9.\\-]{1,12}") {
        let value = parse(&text).unwrap();
        let items = value.as_sequence().unwrap();
        prop_assert_eq!(items.len(), 1);
        let n = items[0].as_f64().unwrap();
        if let Ok(expected) = text.parse::<f64>() {
            prop_assert_eq!(n, expected);
        }
    }

    #[test]
    fn object_mode_later_assignment_wins(
        pairs in prop::collection::vec((arb_key(), -100i32..100), 1..16),
    ) {
        let text = pairs
            .iter()
            .map(|(k, n)| format!("{k}: {n}"))
            .collect::<Vec<_>>()
            .join("\n");

        let mut expected: IndexMap<String, Value> = IndexMap::new();
        for (k, n) in &pairs {
            expected.insert(k.clone(), Value::Number(f64::from(*n)));
        }

        prop_assert_eq!(parse_object(&text).unwrap(), Value::Map(expected));
    }
}
