use crate::each::{each_with, try_each_with};
use crate::iterable::Iterable;

/// A callback with its execution scope fixed ahead of time, see [`bind`].
#[derive(Clone, Debug)]
pub struct Bound<F, S> {
    f: F,
    scope: S,
}

/// Fix `f` and `scope` now, supply the data and extra arguments later.
///
/// `bind(f, scope).call(iterable, more)` behaves exactly like
/// `each_with(iterable, f, &scope, more)`.
///
/// ```rust
/// use pro_singulis::bind;
///
/// let mut tagged = bind(
///     |tag: &String, word: &str, index: usize, more: &[&str]| {
///         (!word.is_empty()).then(|| format!("{}{}:{}{}", tag, index, word, more.concat()))
///     },
///     "#".to_string(),
/// );
///
/// let out = tagged.call(vec!["a", "", "c"], &["!"]);
/// assert_eq!(out, Some(vec!["#0:a!".to_string(), "#2:c!".to_string()]));
/// ```
pub fn bind<F, S>(f: F, scope: S) -> Bound<F, S> {
    Bound { f, scope }
}

impl<F, S> Bound<F, S> {
    pub fn call<I, A, B>(&mut self, iterable: I, more: &[A]) -> Option<I::Collected<B>>
    where
        I: Iterable,
        F: FnMut(&S, I::Item, I::Key, &[A]) -> Option<B>,
    {
        each_with(iterable, &mut self.f, &self.scope, more)
    }

    pub fn try_call<I, A, B, E>(
        &mut self,
        iterable: I,
        more: &[A],
    ) -> Result<Option<I::Collected<B>>, E>
    where
        I: Iterable,
        F: FnMut(&S, I::Item, I::Key, &[A]) -> Result<Option<B>, E>,
    {
        try_each_with(iterable, &mut self.f, &self.scope, more)
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn into_inner(self) -> (F, S) {
        (self.f, self.scope)
    }
}
