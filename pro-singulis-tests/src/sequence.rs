use proptest::prelude::*;

pub fn arb_sequence() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..64)
}

/// plain indexed loop, the behaviour `each` is checked against
pub fn naive_keep<T, B>(items: &[T], mut f: impl FnMut(&T, usize) -> Option<B>) -> Vec<B> {
    let mut kept = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if let Some(out) = f(item, i) {
            kept.push(out);
        }
    }
    kept
}

pub fn keep_multiples(n: &i32, index: usize, of: i32) -> Option<i64> {
    (n % of == 0).then(|| *n as i64 * 2 + index as i64)
}

#[cfg(test)]
proptest! {
    #[test]
    fn total_callback_keeps_every_position(items in arb_sequence()) {
        crate::init_tracing();
        use pro_singulis::each;

        let out = each(&items, |n, i| Some((*n as i64) - i as i64)).unwrap();
        prop_assert_eq!(out.len(), items.len());
        for (i, n) in items.iter().enumerate() {
            prop_assert_eq!(out[i], (*n as i64) - i as i64);
        }
    }

    #[test]
    fn partial_callback_compacts(items in arb_sequence(), of in 1..7i32) {
        use pro_singulis::each;

        let expected = naive_keep(&items, |n, i| keep_multiples(n, i, of));
        let out = each(items.clone(), |n, i| keep_multiples(&n, i, of)).unwrap();
        let defined = items.iter().filter(|n| *n % of == 0).count();

        prop_assert_eq!(out.len(), defined);
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn every_invocation_gets_scope_and_extra_args(
        items in arb_sequence(),
        more in prop::collection::vec(any::<u8>(), 0..5),
        scope in any::<u64>(),
    ) {
        use pro_singulis::each_with;

        let mut calls = Vec::new();
        let out = each_with(
            &items,
            |s: &u64, n, i, extra: &[u8]| {
                calls.push((*s, *n, i, extra.to_vec()));
                None::<()>
            },
            &scope,
            &more,
        );

        prop_assert_eq!(out, Some(vec![]));
        let expected: Vec<_> = items
            .iter()
            .enumerate()
            .map(|(i, n)| (scope, *n, i, more.clone()))
            .collect();
        prop_assert_eq!(calls, expected);
    }

    #[test]
    fn bound_call_is_each_with(items in arb_sequence(), of in 1..7i32) {
        use pro_singulis::{bind, each_with};

        let f = |of: &i32, n: &i32, i: usize, more: &[i64]| {
            keep_multiples(n, i, *of).map(|v| v + more.iter().sum::<i64>())
        };
        let more = [3, -1];
        prop_assert_eq!(
            bind(f, of).call(&items, &more),
            each_with(&items, f, &of, &more)
        );
    }

    #[test]
    fn first_error_ends_traversal(items in arb_sequence(), pivot in any::<i32>()) {
        use pro_singulis::try_each;

        let mut visited = 0;
        let out = try_each(&items, |n, i| {
            visited += 1;
            if *n > pivot { Err(i) } else { Ok(Some(*n)) }
        });

        match items.iter().position(|n| *n > pivot) {
            Some(failed_at) => {
                prop_assert_eq!(out, Err(failed_at));
                prop_assert_eq!(visited, failed_at + 1);
            }
            None => {
                prop_assert_eq!(out, Ok(Some(items.clone())));
                prop_assert_eq!(visited, items.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pro_singulis::{each, Input, Output};

    #[test]
    fn evens() {
        let out = each(vec![1, 2, 3, 4], |n, _| (n % 2 == 0).then_some(n));
        assert_eq!(out, Some(vec![2, 4]));
    }

    #[test]
    fn runtime_tagged_sequence() {
        let input = Input::from(vec!["a", "bb", "ccc"]);
        assert!(input.is_iterable());
        assert_eq!(input.len(), 3);

        let out = each(input, |s, key| (s.len() != 2).then(|| format!("{}={}", key, s)));
        assert_eq!(
            out.and_then(Output::into_sequence),
            Some(vec!["0=a".to_string(), "2=ccc".to_string()])
        );
    }
}
