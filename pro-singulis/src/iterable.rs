use std::fmt;

use indexmap::IndexMap;

/// The runtime shape of some input: what [`crate::each`] will do with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Sequence,
    Mapping,
    /// null, primitives, functions... anything that can't be traversed
    Other,
}

/// Something that can be traversed element by element, with the defined results
/// collected into a structure of the same shape.
///
/// # Implementing this trait
///
/// `Collected<B>` is the input's shape holding `B`s instead of `Item`s. Sequences
/// compact their output (dropped elements leave no hole), mappings keep the key of
/// every retained entry.
///
/// ```rust
/// # use pro_singulis::{Iterable, Shape};
/// struct Pair<T>(T, T);
///
/// impl<T> Iterable for Pair<T> {
///     type Item = T;
///     type Key = usize;
///     type Collected<B> = Vec<B>;
///
///     fn shape(&self) -> Shape {
///         Shape::Sequence
///     }
///
///     fn try_each<B, E>(
///         self,
///         mut f: impl FnMut(T, usize) -> Result<Option<B>, E>,
///     ) -> Result<Option<Vec<B>>, E> {
///         let first = f(self.0, 0)?;
///         let second = f(self.1, 1)?;
///         Ok(Some(first.into_iter().chain(second).collect()))
///     }
/// }
///
/// let kept = Pair(3, 4).each(|n, _| (n % 2 == 0).then_some(n));
/// assert_eq!(kept, Some(vec![4]));
/// ```
pub trait Iterable: Sized {
    /// the value handed to the callback for each element
    type Item;
    /// the position of each element: an index or a key
    type Key;
    /// the same-shaped output holding callback results
    type Collected<B>;

    fn shape(&self) -> Shape;

    /// Invoke `f` once per element, in order, stopping at the first error.
    /// Returns `Ok(None)` without invoking `f` if `self` is not traversable.
    fn try_each<B, E>(
        self,
        f: impl FnMut(Self::Item, Self::Key) -> Result<Option<B>, E>,
    ) -> Result<Option<Self::Collected<B>>, E>;

    /// Infallible version of [`Iterable::try_each`], same as [`crate::each`].
    fn each<B>(
        self,
        f: impl FnMut(Self::Item, Self::Key) -> Option<B>,
    ) -> Option<Self::Collected<B>> {
        crate::each(self, f)
    }
}

fn collect_sequence<X, B, E>(
    items: impl Iterator<Item = X>,
    mut f: impl FnMut(X, usize) -> Result<Option<B>, E>,
) -> Result<Vec<B>, E> {
    let mut collected = Vec::new();
    for (index, item) in items.enumerate() {
        if let Some(out) = f(item, index)? {
            collected.push(out);
        }
    }
    Ok(collected)
}

impl<T> Iterable for Vec<T> {
    type Item = T;
    type Key = usize;
    type Collected<B> = Vec<B>;

    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn try_each<B, E>(
        self,
        f: impl FnMut(T, usize) -> Result<Option<B>, E>,
    ) -> Result<Option<Vec<B>>, E> {
        collect_sequence(self.into_iter(), f).map(Some)
    }
}

impl<'a, T> Iterable for &'a [T] {
    type Item = &'a T;
    type Key = usize;
    type Collected<B> = Vec<B>;

    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn try_each<B, E>(
        self,
        f: impl FnMut(&'a T, usize) -> Result<Option<B>, E>,
    ) -> Result<Option<Vec<B>>, E> {
        collect_sequence(self.iter(), f).map(Some)
    }
}

impl<'a, T> Iterable for &'a Vec<T> {
    type Item = &'a T;
    type Key = usize;
    type Collected<B> = Vec<B>;

    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn try_each<B, E>(
        self,
        f: impl FnMut(&'a T, usize) -> Result<Option<B>, E>,
    ) -> Result<Option<Vec<B>>, E> {
        self.as_slice().try_each(f)
    }
}

impl<T> Iterable for IndexMap<String, T> {
    type Item = T;
    type Key = String;
    type Collected<B> = IndexMap<String, B>;

    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn try_each<B, E>(
        self,
        mut f: impl FnMut(T, String) -> Result<Option<B>, E>,
    ) -> Result<Option<IndexMap<String, B>>, E> {
        let mut collected = IndexMap::new();
        for (key, value) in self {
            if let Some(out) = f(value, key.clone())? {
                collected.insert(key, out);
            }
        }
        Ok(Some(collected))
    }
}

impl<'a, T> Iterable for &'a IndexMap<String, T> {
    type Item = &'a T;
    type Key = &'a str;
    type Collected<B> = IndexMap<String, B>;

    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn try_each<B, E>(
        self,
        mut f: impl FnMut(&'a T, &'a str) -> Result<Option<B>, E>,
    ) -> Result<Option<IndexMap<String, B>>, E> {
        let mut collected = IndexMap::new();
        for (key, value) in self {
            if let Some(out) = f(value, key.as_str())? {
                collected.insert(key.clone(), out);
            }
        }
        Ok(Some(collected))
    }
}

/// Position of an element inside an [`Input`].
///
/// Owned traversals hand out `Key<String>`, borrowed ones `Key<&str>` pointing at
/// the mapping's own key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key<N = String> {
    Index(usize),
    Name(N),
}

impl<N: AsRef<str>> Key<N> {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(name.as_ref()),
        }
    }
}

impl<N: fmt::Display> fmt::Display for Key<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => name.fmt(f),
        }
    }
}

/// Input whose shape is only known at runtime.
///
/// `Other` stands in for every value that is neither a sequence nor a mapping;
/// traversing it is a no-op. With the `serde` feature, any such value
/// deserializes to `Other` (and `Other` serializes as a unit).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Input<T> {
    Sequence(Vec<T>),
    Mapping(IndexMap<String, T>),
    Other,
}

impl<T> Input<T> {
    pub fn is_iterable(&self) -> bool {
        !matches!(self, Input::Other)
    }

    /// number of elements a traversal would visit
    pub fn len(&self) -> usize {
        match self {
            Input::Sequence(items) => items.len(),
            Input::Mapping(entries) => entries.len(),
            Input::Other => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> From<Vec<T>> for Input<T> {
    fn from(items: Vec<T>) -> Self {
        Input::Sequence(items)
    }
}

impl<T> From<IndexMap<String, T>> for Input<T> {
    fn from(entries: IndexMap<String, T>) -> Self {
        Input::Mapping(entries)
    }
}

impl<T> FromIterator<(String, T)> for Input<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Input::Mapping(iter.into_iter().collect())
    }
}

/// The collected results of traversing an [`Input`], in the input's shape.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Output<B> {
    Sequence(Vec<B>),
    Mapping(IndexMap<String, B>),
}

impl<B> Output<B> {
    pub fn len(&self) -> usize {
        match self {
            Output::Sequence(items) => items.len(),
            Output::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_sequence(self) -> Option<Vec<B>> {
        match self {
            Output::Sequence(items) => Some(items),
            Output::Mapping(_) => None,
        }
    }

    pub fn into_mapping(self) -> Option<IndexMap<String, B>> {
        match self {
            Output::Sequence(_) => None,
            Output::Mapping(entries) => Some(entries),
        }
    }
}

impl<T> Iterable for Input<T> {
    type Item = T;
    type Key = Key;
    type Collected<B> = Output<B>;

    fn shape(&self) -> Shape {
        match self {
            Input::Sequence(_) => Shape::Sequence,
            Input::Mapping(_) => Shape::Mapping,
            Input::Other => Shape::Other,
        }
    }

    fn try_each<B, E>(
        self,
        mut f: impl FnMut(T, Key) -> Result<Option<B>, E>,
    ) -> Result<Option<Output<B>>, E> {
        match self {
            Input::Sequence(items) => Ok(items
                .try_each(|item, index| f(item, Key::Index(index)))?
                .map(Output::Sequence)),
            Input::Mapping(entries) => Ok(entries
                .try_each(|value, key| f(value, Key::Name(key)))?
                .map(Output::Mapping)),
            Input::Other => Ok(None),
        }
    }
}

impl<'a, T> Iterable for &'a Input<T> {
    type Item = &'a T;
    type Key = Key<&'a str>;
    type Collected<B> = Output<B>;

    fn shape(&self) -> Shape {
        <Input<T> as Iterable>::shape(*self)
    }

    fn try_each<B, E>(
        self,
        mut f: impl FnMut(&'a T, Key<&'a str>) -> Result<Option<B>, E>,
    ) -> Result<Option<Output<B>>, E> {
        match self {
            Input::Sequence(items) => Ok(items
                .try_each(|item, index| f(item, Key::Index(index)))?
                .map(Output::Sequence)),
            Input::Mapping(entries) => Ok(entries
                .try_each(|value, key| f(value, Key::Name(key)))?
                .map(Output::Mapping)),
            Input::Other => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_output_is_compacted() {
        let kept = vec![10, 11, 12, 13].each(|n, index| (n % 2 == 1).then_some((index, n)));
        assert_eq!(kept, Some(vec![(1, 11), (3, 13)]));
    }

    #[test]
    fn mapping_output_keeps_keys_in_order() {
        let mut entries = IndexMap::new();
        entries.insert("zeta".to_string(), 1);
        entries.insert("alpha".to_string(), 2);
        entries.insert("mu".to_string(), 3);

        let kept = (&entries).each(|n, _| (*n != 2).then_some(n * 10)).unwrap();
        let keys: Vec<_> = kept.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "mu"]);
        assert_eq!(kept["mu"], 30);
    }

    #[test]
    fn other_is_never_visited() {
        let mut calls = 0;
        let out = Input::<i32>::Other.each(|n, _| {
            calls += 1;
            Some(n)
        });
        assert_eq!(out, None);
        assert_eq!(calls, 0);
    }

    #[test]
    fn empty_inputs_yield_empty_outputs() {
        let out = Input::<u8>::Sequence(vec![]).each(|n, _| Some(n));
        assert_eq!(out, Some(Output::Sequence(vec![])));
        let out = Input::<u8>::Mapping(IndexMap::new()).each(|n, _| Some(n)).unwrap();
        assert!(out.is_empty());
        assert!(out.into_mapping().is_some());
    }

    #[test]
    fn try_each_stops_at_first_error() {
        let mut visited = Vec::new();
        let res = vec!["1", "2", "x", "4"].try_each(|s, index| {
            visited.push(index);
            s.parse::<u32>().map(Some)
        });
        assert!(res.is_err());
        assert_eq!(visited, vec![0, 1, 2]);
    }

    #[test]
    fn input_keys() {
        let input: Input<char> = vec![("a".to_string(), 'x'), ("b".to_string(), 'y')]
            .into_iter()
            .collect();
        let keys = (&input).each(|_, key| Some(key.to_string())).unwrap();
        assert_eq!(
            keys,
            Output::Mapping(
                [("a", "a"), ("b", "b")]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            )
        );
        assert_eq!(Key::<String>::Index(3).as_index(), Some(3));
        assert_eq!(Key::Name("k").as_name(), Some("k"));
        assert_eq!(Key::Name("k".to_string()).to_string(), "k");
    }

    #[test]
    fn borrowed_input_lends_its_keys() {
        let input: Input<u8> = vec![("left".to_string(), 1), ("right".to_string(), 2)]
            .into_iter()
            .collect();
        let lent = (&input)
            .each(|_, key| key.as_name().map(|name| name.as_ptr() as usize))
            .and_then(Output::into_mapping)
            .unwrap();
        let owned = match &input {
            Input::Mapping(entries) => entries,
            other => panic!("expected a mapping, got {:?}", other),
        };
        for (key, ptr) in &lent {
            let (stored, _) = owned.get_key_value(key).unwrap();
            assert_eq!(stored.as_ptr() as usize, *ptr);
        }
    }

    #[test]
    fn method_traversals_are_logged() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert_eq!(vec![1, 2, 3].each(|n, _| (n != 2).then_some(n)), Some(vec![1, 3]));
            assert_eq!(Input::<u8>::Other.each(|n, _| Some(n)), None);
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("traversal complete"), "{}", logs);
        assert!(logs.contains("visited=3"), "{}", logs);
        assert!(logs.contains("kept=2"), "{}", logs);
        assert!(logs.contains("skipping non-iterable input"), "{}", logs);
    }
}
