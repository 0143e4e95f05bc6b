//! Property-based tests for the describer's structural guarantees.

use proptest::prelude::*;
use var_type::{describe, to_type_string, Key, KeyedArray, Number, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::Integer(i))),
        any::<f64>().prop_map(|f| Value::Number(Number::Float(f))),
        ".*".prop_map(Value::String),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::from),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..6).prop_map(|entries| {
                let array: KeyedArray = entries
                    .into_iter()
                    .map(|(key, value)| (Key::from(key), value))
                    .collect();
                Value::from(array)
            }),
        ]
    })
}

fn dedupe(types: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for ty in types {
        if !seen.contains(&ty) {
            seen.push(ty);
        }
    }
    seen
}

proptest! {
    #[test]
    fn prop_scalars_have_one_of_five_types(value in scalar()) {
        let ty = describe(&value);
        prop_assert!(["int", "float", "bool", "string", "null"].contains(&ty.as_str()));
    }

    #[test]
    fn prop_describe_is_deterministic(value in value()) {
        prop_assert_eq!(describe(&value), describe(&value.clone()));
    }

    #[test]
    fn prop_list_is_deduplicated_union(elements in prop::collection::vec(value(), 1..8)) {
        let expected = format!(
            "array<{}>",
            dedupe(elements.iter().map(describe).collect()).join("|")
        );
        prop_assert_eq!(describe(&Value::from(elements)), expected);
    }

    #[test]
    fn prop_vec_of_i64_is_int_list(v in prop::collection::vec(any::<i64>(), 1..20)) {
        prop_assert_eq!(to_type_string(&v).unwrap(), "array<int>");
    }

    #[test]
    fn prop_shifted_keys_are_not_a_list(
        elements in prop::collection::vec(scalar(), 1..8),
        offset in 1i64..100,
    ) {
        let array: KeyedArray = elements
            .into_iter()
            .enumerate()
            .map(|(i, value)| (Key::Index(i as i64 + offset), value))
            .collect();
        prop_assert!(!array.is_list());
        prop_assert!(describe(&Value::from(array)).starts_with("array{"), "describe should start with array{{");
    }

    #[test]
    fn prop_text_indexes_match_integer_indexes(elements in prop::collection::vec(scalar(), 1..8)) {
        let textual: KeyedArray = elements
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, value)| (Key::from(i.to_string()), value))
            .collect();
        let native = Value::from(elements);
        prop_assert_eq!(describe(&Value::from(textual)), describe(&native));
    }

    #[test]
    fn prop_option_is_null_or_inner(opt in proptest::option::of(any::<i32>())) {
        let expected = if opt.is_some() { "int" } else { "null" };
        prop_assert_eq!(to_type_string(&opt).unwrap(), expected);
    }
}
