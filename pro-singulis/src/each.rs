//! Free-standing traversal entry points.
//!
//! All of these, and the [`Iterable::each`] method, funnel into [`try_each`], which
//! is where a traversal is logged.
use std::convert::Infallible;

use tracing::trace;

use crate::iterable::{Iterable, Shape};

/// Invoke `f` for each element of `iterable` with the element and its index (or key),
/// keeping every `Some` result in a structure shaped like the input.
///
/// Sequences compact their output, mappings keep the original keys. Inputs that are
/// neither yield `None` and `f` is never called.
///
/// ```rust
/// use indexmap::IndexMap;
/// use pro_singulis::each;
///
/// let evens = each(vec![1, 2, 3, 4], |n, _| (n % 2 == 0).then_some(n));
/// assert_eq!(evens, Some(vec![2, 4]));
///
/// let mut prices = IndexMap::new();
/// prices.insert("foo".to_string(), 1);
/// prices.insert("bar".to_string(), 2);
/// let doubled = each(prices, |n, _| Some(2 * n)).unwrap();
/// assert_eq!(doubled["foo"], 2);
/// assert_eq!(doubled["bar"], 4);
/// ```
pub fn each<I: Iterable, B>(
    iterable: I,
    mut f: impl FnMut(I::Item, I::Key) -> Option<B>,
) -> Option<I::Collected<B>> {
    match try_each(iterable, |item, key| Ok::<_, Infallible>(f(item, key))) {
        Ok(collected) => collected,
        Err(never) => match never {},
    }
}

/// Like [`each`], but `f` additionally receives an execution scope and a list of
/// extra arguments, handed unchanged to every invocation after the index or key.
///
/// ```rust
/// use pro_singulis::each_with;
///
/// struct Threshold(u32);
///
/// let kept = each_with(
///     vec![3, 8, 5, 13],
///     |min: &Threshold, n, index, more: &[u32]| {
///         (n >= min.0).then(|| n * more[0] + index as u32)
///     },
///     &Threshold(5),
///     &[10],
/// );
/// assert_eq!(kept, Some(vec![81, 52, 133]));
/// ```
pub fn each_with<I: Iterable, S: ?Sized, A, B>(
    iterable: I,
    mut f: impl FnMut(&S, I::Item, I::Key, &[A]) -> Option<B>,
    scope: &S,
    more: &[A],
) -> Option<I::Collected<B>> {
    each(iterable, |item, key| f(scope, item, key, more))
}

/// Fallible traversal: the first `Err` returned by `f` ends the traversal and is
/// returned as-is. Elements after the failing one are never visited.
pub fn try_each<I: Iterable, B, E>(
    iterable: I,
    mut f: impl FnMut(I::Item, I::Key) -> Result<Option<B>, E>,
) -> Result<Option<I::Collected<B>>, E> {
    let shape = iterable.shape();
    if shape == Shape::Other {
        trace!("skipping non-iterable input");
        return Ok(None);
    }

    let mut visited = 0usize;
    let mut kept = 0usize;
    let collected = Iterable::try_each(iterable, |item, key| {
        visited += 1;
        let out = f(item, key)?;
        if out.is_some() {
            kept += 1;
        }
        Ok(out)
    })?;

    trace!(?shape, visited, kept, "traversal complete");
    Ok(collected)
}

/// Fallible version of [`each_with`].
pub fn try_each_with<I: Iterable, S: ?Sized, A, B, E>(
    iterable: I,
    mut f: impl FnMut(&S, I::Item, I::Key, &[A]) -> Result<Option<B>, E>,
    scope: &S,
    more: &[A],
) -> Result<Option<I::Collected<B>>, E> {
    try_each(iterable, |item, key| f(scope, item, key, more))
}
