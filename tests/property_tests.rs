//! Property-based tests for the traversal guarantees
//!
//! Random object graphs (cycles, shared children, mixed composite kinds) are
//! built in a realm and tokenized under random limits. The stream must stay
//! balanced and bounded, and re-parsing must be deterministic.

use dumper::{tokenize_with_options, to_value, Object, Parser, ParserOptions, Realm, Token, Value};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Object,
    Array,
    Map,
    Set,
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Object),
        Just(Kind::Array),
        Just(Kind::Map),
        Just(Kind::Set),
    ]
}

/// Node kinds plus directed edges between node indices.
fn graph() -> impl Strategy<Value = (Vec<Kind>, Vec<(usize, usize)>)> {
    prop::collection::vec(kind(), 1..8).prop_flat_map(|kinds| {
        let n = kinds.len();
        (Just(kinds), prop::collection::vec((0..n, 0..n), 0..24))
    })
}

fn build(realm: &Realm, kinds: &[Kind], edges: &[(usize, usize)]) -> Vec<Object> {
    let nodes: Vec<Object> = kinds
        .iter()
        .map(|kind| match kind {
            Kind::Object => realm.object(),
            Kind::Array => realm.array(Vec::<Value>::new()),
            Kind::Map => realm.map(Vec::<(Value, Value)>::new()),
            Kind::Set => realm.set(Vec::<Value>::new()),
        })
        .collect();

    for (i, (from, to)) in edges.iter().enumerate() {
        let child = &nodes[*to];
        match kinds[*from] {
            Kind::Object => nodes[*from].insert(format!("k{i}"), child),
            Kind::Array => nodes[*from].push(child),
            Kind::Map => nodes[*from].map_insert(format!("k{i}"), child),
            Kind::Set => nodes[*from].set_add(child),
        }
    }
    nodes
}

fn is_composite_start(token: &Token) -> bool {
    matches!(
        token,
        Token::ObjectStart { .. }
            | Token::ArrayStart { .. }
            | Token::MapStart { .. }
            | Token::SetStart { .. }
    )
}

fn is_composite_end(token: &Token) -> bool {
    matches!(
        token,
        Token::ObjectEnd | Token::ArrayEnd { .. } | Token::MapEnd { .. } | Token::SetEnd { .. }
    )
}

fn is_member(token: &Token) -> bool {
    matches!(
        token,
        Token::ArrayValueStart { .. }
            | Token::ArrayValueHole { .. }
            | Token::MapRowStart { .. }
            | Token::SetValueStart { .. }
    )
}

fn is_balanced(tokens: &[Token]) -> bool {
    let mut stack: Vec<&'static str> = Vec::new();
    for token in tokens {
        let kind = token.kind();
        if let Some(prefix) = kind.strip_suffix("-start") {
            stack.push(prefix);
        } else if let Some(prefix) = kind.strip_suffix("-end") {
            if stack.pop() != Some(prefix) {
                return false;
            }
        }
    }
    stack.is_empty()
}

/// Deepest composite nesting and widest array/map/set in the stream.
fn extent(tokens: &[Token]) -> (usize, usize) {
    let mut members: Vec<usize> = Vec::new();
    let mut deepest = 0;
    let mut widest = 0;
    for token in tokens {
        if is_composite_start(token) {
            members.push(0);
            deepest = deepest.max(members.len());
        } else if is_composite_end(token) {
            if let Some(count) = members.pop() {
                widest = widest.max(count);
            }
        } else if is_member(token) {
            if let Some(count) = members.last_mut() {
                *count += 1;
            }
        }
    }
    (deepest, widest)
}

proptest! {
    #[test]
    fn prop_streams_are_balanced_and_bounded(
        (kinds, edges) in graph(),
        depth in 0usize..6,
        max_array_length in 0usize..4,
    ) {
        let realm = Realm::new();
        let nodes = build(&realm, &kinds, &edges);
        let options = ParserOptions::new()
            .with_depth(depth)
            .with_max_array_length(max_array_length);

        let tokens = tokenize_with_options(&Value::from(&nodes[0]), options);
        prop_assert!(is_balanced(&tokens));

        let (deepest, widest) = extent(&tokens);
        prop_assert!(deepest <= depth);
        prop_assert!(widest <= max_array_length);
    }

    #[test]
    fn prop_reentry_matches_fresh_parser(
        (kinds, edges) in graph(),
        depth in 1usize..6,
    ) {
        let realm = Realm::new();
        let nodes = build(&realm, &kinds, &edges);
        let value = Value::from(&nodes[0]);
        let options = ParserOptions::new().with_depth(depth);

        let mut parser = Parser::new(options.clone());
        parser.parse(&value);
        let first = parser.flush();
        parser.parse(&value);
        let second = parser.flush();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &tokenize_with_options(&value, options));
    }

    #[test]
    fn prop_strings_are_quoted_or_truncated(text in ".{0,40}", max in 0usize..20) {
        let tokens = tokenize_with_options(
            &Value::from(text.as_str()),
            ParserOptions::new().with_max_string_length(max),
        );
        prop_assert_eq!(tokens.len(), 1);
        let Token::String { value } = &tokens[0] else {
            return Err(TestCaseError::fail("expected a string token"));
        };
        if text.chars().count() > max {
            prop_assert!(value.contains(" more character"));
        } else {
            let last = value.chars().last();
            prop_assert!(matches!(last, Some('\'' | '"' | '`')));
        }
    }

    #[test]
    fn prop_serialized_lists_respect_max_length(
        items in prop::collection::vec(any::<i64>(), 0..150),
    ) {
        let realm = Realm::new();
        let value = to_value(&realm, &items).unwrap();
        let tokens = dumper::tokenize(&value);

        let visited = tokens
            .iter()
            .filter(|t| matches!(t, Token::ArrayValueStart { .. }))
            .count();
        prop_assert_eq!(visited, items.len().min(100));
        prop_assert_eq!(
            tokens.contains(&Token::ArrayMaxLengthRef { limit: 100, size: items.len() }),
            items.len() > 100
        );
    }
}
