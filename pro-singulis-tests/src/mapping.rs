use indexmap::IndexMap;
use proptest::prelude::*;

pub fn arb_mapping() -> impl Strategy<Value = IndexMap<String, i32>> {
    prop::collection::vec(("[a-z]{1,6}", any::<i32>()), 0..32)
        .prop_map(|entries| entries.into_iter().collect())
}

pub fn keep_small(n: &i32, bound: i32) -> Option<String> {
    (n.unsigned_abs() < bound.unsigned_abs()).then(|| n.to_string())
}

#[cfg(test)]
proptest! {
    #[test]
    fn keeps_exactly_the_defined_keys(entries in arb_mapping(), bound in any::<i32>()) {
        crate::init_tracing();
        use pro_singulis::each;

        let out = each(&entries, |n, _| keep_small(n, bound)).unwrap();

        let expected_keys: Vec<&String> = entries
            .iter()
            .filter(|(_, n)| keep_small(n, bound).is_some())
            .map(|(k, _)| k)
            .collect();
        let out_keys: Vec<&String> = out.keys().collect();
        prop_assert_eq!(out_keys, expected_keys);

        for (key, value) in &out {
            prop_assert_eq!(Some(value.clone()), keep_small(&entries[key], bound));
        }
    }

    #[test]
    fn key_is_passed_with_value(entries in arb_mapping()) {
        use pro_singulis::each;

        let out = each(entries.clone(), |n, key| Some((key, n))).unwrap();
        prop_assert_eq!(out.len(), entries.len());
        for (key, (seen_key, n)) in &out {
            prop_assert_eq!(key, seen_key);
            prop_assert_eq!(entries[key], *n);
        }
    }

    #[test]
    fn tagged_and_borrowed_mappings_agree(entries in arb_mapping(), bound in any::<i32>()) {
        use pro_singulis::{each, Input, Output};

        let borrowed = each(&entries, |n, _| keep_small(n, bound));
        let tagged = each(Input::from(entries), |n, key| {
            assert!(key.as_name().is_some());
            keep_small(&n, bound)
        });
        prop_assert_eq!(borrowed.map(Output::Mapping), tagged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pro_singulis::{bind, each, each_with, Input, Key};

    fn entries(pairs: &[(&str, i32)]) -> IndexMap<String, i32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn doubles_values() {
        let out = each(entries(&[("foo", 1), ("bar", 2)]), |n, _| Some(2 * n));
        assert_eq!(out, Some(entries(&[("foo", 2), ("bar", 4)])));
    }

    #[test]
    fn filters_uneven() {
        let out = each(entries(&[("foo", 1), ("bar", 2), ("baz", 3)]), |n, _| {
            (n % 2 != 0).then_some(n)
        });
        assert_eq!(out, Some(entries(&[("foo", 1), ("baz", 3)])));
    }

    #[test]
    fn scope_and_extra_args_reach_mapping_callbacks() {
        let mut calls = Vec::new();
        each_with(
            entries(&[("key0", 0), ("key1", 1), ("key2", 2)]),
            |scope: &str, n, key, more: &[&str]| {
                calls.push(format!("{} {} {} {}", scope, key, n, more.join(",")));
                Some(())
            },
            "scope",
            &["foo", "bar", "baz"],
        );
        assert_eq!(
            calls,
            vec![
                "scope key0 0 foo,bar,baz",
                "scope key1 1 foo,bar,baz",
                "scope key2 2 foo,bar,baz",
            ]
        );
    }

    #[test]
    fn bound_over_tagged_inputs() {
        let mut keys = bind(
            |prefix: &String, _: i32, key: Key, _: &[()]| match key {
                Key::Name(name) if name.starts_with(prefix.as_str()) => Some(name),
                _ => None,
            },
            "k".to_string(),
        );
        let mapped = keys.call(Input::from(entries(&[("ka", 1), ("xb", 2), ("kc", 3)])), &[]);
        assert_eq!(mapped.map(|out| out.len()), Some(2));
        assert_eq!(keys.call(Input::Sequence(vec![1, 2]), &[]).map(|out| out.len()), Some(0));
        assert_eq!(keys.call(Input::<i32>::Other, &[]), None);
    }
}
