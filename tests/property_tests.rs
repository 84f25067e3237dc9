//! Property-based tests for the round-trip guarantees of `dumps` and `loads`.
//!
//! Documents are generated from the same building blocks the grammar
//! allows: identifiers, every literal kind, positional and named
//! arguments, chained filters and nested selections.

use gqlmark::{
    dumps, dumps_compact, dumps_with_options, loads, ArgMap, Document, DumpOptions, Literal,
    Property, Selection, Value,
};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_/]{0,8}"
}

fn literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        Just(Literal::Null),
        any::<bool>().prop_map(Literal::Bool),
        any::<i64>().prop_map(Literal::Int),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Literal::Float),
        any::<String>().prop_map(Literal::String),
    ]
}

fn arg_map(min: usize) -> impl Strategy<Value = ArgMap> {
    prop::collection::vec((identifier(), literal()), min..4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Params never hold an empty mapping, since `()` parses to no params.
fn params() -> impl Strategy<Value = Option<Value>> {
    prop::option::of(prop_oneof![
        literal().prop_map(Value::Literal),
        arg_map(1).prop_map(Value::Mapping),
    ])
}

fn filter_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        literal().prop_map(Value::Literal),
        arg_map(0).prop_map(Value::Mapping),
    ]
}

fn selection() -> impl Strategy<Value = Selection> {
    let leaf = (identifier(), params(), prop::collection::vec((identifier(), filter_value()), 0..3))
        .prop_map(|(name, params, filters)| {
            let mut selection = Selection::new(name);
            selection.params = params;
            for (filter, value) in filters {
                selection = selection.with_filter(filter, value);
            }
            selection
        })
        .boxed();

    let field = identifier().prop_map(Property::field).boxed();

    (leaf.clone(), prop::collection::vec(field.clone(), 1..4))
        .prop_map(|(mut selection, fields)| {
            selection.properties = fields;
            selection
        })
        .prop_recursive(3, 24, 4, move |inner| {
            (
                leaf.clone(),
                prop::collection::vec(
                    prop_oneof![field.clone(), inner.prop_map(Property::Selection)],
                    1..4,
                ),
            )
                .prop_map(|(mut selection, properties)| {
                    selection.properties = properties;
                    selection
                })
        })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(selection(), 1..4).prop_map(Document::from)
}

proptest! {
    #[test]
    fn prop_compact_round_trip(doc in document()) {
        let text = dumps_compact(&doc).unwrap();
        prop_assert!(!text.contains('\n'));
        prop_assert_eq!(loads(&text).unwrap(), doc);
    }

    #[test]
    fn prop_indented_round_trip(doc in document(), indent in 1usize..6) {
        let text = dumps_with_options(&doc, &DumpOptions::new().with_indent(indent)).unwrap();
        prop_assert_eq!(loads(&text).unwrap(), doc);
    }

    #[test]
    fn prop_dumps_is_deterministic(doc in document()) {
        prop_assert_eq!(dumps(&doc).unwrap(), dumps(&doc).unwrap());
        prop_assert_eq!(dumps_compact(&doc).unwrap(), dumps_compact(&doc).unwrap());
    }

    #[test]
    fn prop_reformatting_is_stable(doc in document()) {
        let pretty = dumps(&doc).unwrap();
        let compact = dumps_compact(&loads(&pretty).unwrap()).unwrap();
        prop_assert_eq!(compact, dumps_compact(&doc).unwrap());
    }

    #[test]
    fn prop_string_literals_round_trip(s in any::<String>()) {
        let doc = Document::from(vec![Selection::new("q").with_params(s.clone()).with_field("x")]);
        let parsed = loads(&dumps_compact(&doc).unwrap()).unwrap();
        prop_assert_eq!(parsed[0].params.as_ref().and_then(Value::as_literal), Some(&Literal::String(s)));
    }

    #[test]
    fn prop_loads_never_panics(text in "[{}(),.:a-z0-9 \"'\\-\n]{0,40}") {
        let _ = loads(&text);
    }
}
