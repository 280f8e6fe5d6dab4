use std::convert::Infallible;

use indexmap::IndexMap;
use pro_singulis::{Iterable, Key, Output, Shape};
use serde_json::Value;
use tracing::debug;

/// A borrowed JSON value viewed through its runtime shape: arrays are sequences,
/// objects are mappings, every other value is left alone.
#[derive(Clone, Copy, Debug)]
pub struct Json<'a>(pub &'a Value);

impl<'a> Iterable for Json<'a> {
    type Item = &'a Value;
    type Key = Key<&'a str>;
    type Collected<B> = Output<B>;

    fn shape(&self) -> Shape {
        match self.0 {
            Value::Array(_) => Shape::Sequence,
            Value::Object(_) => Shape::Mapping,
            _ => Shape::Other,
        }
    }

    fn try_each<B, E>(
        self,
        mut f: impl FnMut(&'a Value, Key<&'a str>) -> Result<Option<B>, E>,
    ) -> Result<Option<Output<B>>, E> {
        match self.0 {
            Value::Array(items) => Ok(items
                .try_each(|item, index| f(item, Key::Index(index)))?
                .map(Output::Sequence)),
            Value::Object(entries) => {
                let mut collected = IndexMap::new();
                for (key, value) in entries {
                    if let Some(out) = f(value, Key::Name(key))? {
                        collected.insert(key.clone(), out);
                    }
                }
                Ok(Some(Output::Mapping(collected)))
            }
            _ => Ok(None),
        }
    }
}

/// Invoke `f` for every element of `input`, keeping each `Some` result.
///
/// `f` receives the scope and the argument list `[element, index or key, ...more]`.
/// The list borrows the element and the extra arguments; only the index or key is
/// materialized as a fresh `Value`. An array `more` is spread into the argument
/// list, any other value is appended as a single argument; `None` leaves the list
/// at two arguments.
///
/// Arrays produce a compacted array, objects produce an object keyed like the input,
/// anything else produces `None` without calling `f`.
///
/// ```rust
/// use pro_singulis_json::each;
/// use serde_json::{json, Value};
///
/// let halve = |_: &Value, args: &[&Value]| {
///     let n = args[0].as_i64()?;
///     (n % 2 == 0).then(|| json!(n / 2))
/// };
///
/// assert_eq!(each(&json!([1, 2, 3, 4]), halve, &Value::Null, None), Some(json!([1, 2])));
/// assert_eq!(each(&json!({"a": 6, "b": 7}), halve, &Value::Null, None), Some(json!({"a": 3})));
/// assert_eq!(each(&json!("nope"), halve, &Value::Null, None), None);
/// ```
pub fn each<F>(input: &Value, mut f: F, scope: &Value, more: Option<&Value>) -> Option<Value>
where
    F: FnMut(&Value, &[&Value]) -> Option<Value>,
{
    match try_each(input, |scope, args| Ok::<_, Infallible>(f(scope, args)), scope, more) {
        Ok(collected) => collected,
        Err(never) => match never {},
    }
}

/// Fallible version of [`each`]: the first error returned by `f` stops the
/// traversal and is handed back untouched.
pub fn try_each<F, E>(
    input: &Value,
    mut f: F,
    scope: &Value,
    more: Option<&Value>,
) -> Result<Option<Value>, E>
where
    F: FnMut(&Value, &[&Value]) -> Result<Option<Value>, E>,
{
    let extra = extra_arguments(more);
    let collected = pro_singulis::try_each(Json(input), |item, key| {
        let position = match key {
            Key::Index(index) => Value::from(index),
            Key::Name(name) => Value::from(name),
        };
        let mut args = Vec::with_capacity(2 + extra.len());
        args.push(item);
        args.push(&position);
        args.extend(extra);
        f(scope, args.as_slice())
    })?;
    Ok(collected.map(into_value))
}

/// Parse `input` as JSON text, then [`each`] over it.
pub fn each_str<F>(
    input: &str,
    f: F,
    scope: &Value,
    more: Option<&Value>,
) -> crate::Result<Option<Value>>
where
    F: FnMut(&Value, &[&Value]) -> Option<Value>,
{
    let input: Value = serde_json::from_str(input).map_err(|err| {
        debug!(%err, "rejecting malformed input");
        err
    })?;
    Ok(each(&input, f, scope, more))
}

fn extra_arguments(more: Option<&Value>) -> &[Value] {
    match more {
        None => &[],
        Some(Value::Array(extra)) => extra.as_slice(),
        Some(extra) => std::slice::from_ref(extra),
    }
}

fn into_value(output: Output<Value>) -> Value {
    match output {
        Output::Sequence(items) => Value::Array(items),
        Output::Mapping(entries) => Value::Object(entries.into_iter().collect()),
    }
}
