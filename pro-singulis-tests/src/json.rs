use proptest::prelude::*;
use serde_json::Value;

use crate::mapping::arb_mapping;
use crate::sequence::arb_sequence;

/// every value `each` must leave alone
pub fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::from),
        ".{0,16}".prop_map(Value::from),
    ]
}

pub fn halve_evens(n: i64) -> Option<i64> {
    (n % 2 == 0).then_some(n / 2)
}

pub fn halve_evens_json(_: &Value, args: &[&Value]) -> Option<Value> {
    args[0].as_i64().and_then(halve_evens).map(Value::from)
}

#[cfg(test)]
proptest! {
    #[test]
    fn typed_and_dynamic_agree_on_arrays(items in arb_sequence()) {
        crate::init_tracing();
        let typed = pro_singulis::each(items.clone(), |n, _| halve_evens(n as i64));
        let dynamic = pro_singulis_json::each(&Value::from(items), halve_evens_json, &Value::Null, None);

        prop_assert_eq!(serde_json::to_value(typed).unwrap(), dynamic.unwrap());
    }

    #[test]
    fn typed_and_dynamic_agree_on_objects(entries in arb_mapping()) {
        let typed = pro_singulis::each(&entries, |n, _| halve_evens(*n as i64));
        let dynamic = pro_singulis_json::each(
            &serde_json::to_value(&entries).unwrap(),
            halve_evens_json,
            &Value::Null,
            None,
        );

        // compare entry by entry so key order is checked too
        let typed: Vec<(String, Value)> = typed
            .unwrap()
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect();
        let dynamic: Vec<(String, Value)> = match dynamic {
            Some(Value::Object(map)) => map.into_iter().collect(),
            other => panic!("expected an object, got {:?}", other),
        };
        prop_assert_eq!(typed, dynamic);
    }

    #[test]
    fn scalars_are_never_visited(input in arb_scalar(), more in arb_scalar()) {
        let mut calls = 0;
        let out = pro_singulis_json::each(
            &input,
            |_, _| {
                calls += 1;
                Some(Value::Null)
            },
            &Value::Null,
            Some(&more),
        );
        prop_assert_eq!(out, None);
        prop_assert_eq!(calls, 0);
    }

    #[test]
    fn scalar_extra_arg_is_appended_once(items in arb_sequence(), more in arb_scalar()) {
        let out = pro_singulis_json::each(
            &Value::from(items.clone()),
            |_, args| Some(Value::from(args.len())),
            &Value::Null,
            Some(&more),
        );
        let expected: Vec<Value> = items.iter().map(|_| Value::from(3)).collect();
        prop_assert_eq!(out, Some(Value::Array(expected)));
    }

    #[test]
    fn deserialized_scalars_are_never_visited(value in arb_scalar()) {
        use pro_singulis::{each, Input};

        let input: Input<i64> = serde_json::from_value(value).unwrap();
        prop_assert_eq!(&input, &Input::Other);
        prop_assert_eq!(each(input, |n, _| Some(n)), None);
    }

    #[test]
    fn deserialized_input_matches_dynamic(entries in arb_mapping()) {
        use pro_singulis::{each, Input};

        let value = serde_json::to_value(&entries).unwrap();
        let input: Input<i64> = serde_json::from_value(value.clone()).unwrap();
        let typed = each(input, |n, _| halve_evens(n));
        let dynamic = pro_singulis_json::each(&value, halve_evens_json, &Value::Null, None);

        prop_assert_eq!(serde_json::to_value(typed).unwrap(), dynamic.unwrap());
    }
}
