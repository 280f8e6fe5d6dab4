use serde_json::Value;

use crate::each::{each, each_str, try_each};

/// A callback with its scope fixed, waiting for input. See [`bind`].
#[derive(Clone, Debug)]
pub struct Bound<F> {
    f: F,
    scope: Value,
}

/// Fix `f` and `scope` now; `bind(f, scope).call(input, more)` is
/// `each(input, f, &scope, more)`.
///
/// ```rust
/// use pro_singulis_json::bind;
/// use serde_json::{json, Value};
///
/// let mut scaled = bind(
///     |scope: &Value, args: &[&Value]| Some(json!(args[0].as_f64()? * scope["factor"].as_f64()?)),
///     json!({"factor": 1.5}),
/// );
/// assert_eq!(scaled.call(&json!({"w": 2.0, "h": 4.0}), None), Some(json!({"w": 3.0, "h": 6.0})));
/// ```
pub fn bind<F, R>(f: F, scope: Value) -> Bound<F>
where
    F: FnMut(&Value, &[&Value]) -> R,
{
    Bound { f, scope }
}

impl<F> Bound<F> {
    pub fn call(&mut self, input: &Value, more: Option<&Value>) -> Option<Value>
    where
        F: FnMut(&Value, &[&Value]) -> Option<Value>,
    {
        each(input, &mut self.f, &self.scope, more)
    }

    pub fn try_call<E>(&mut self, input: &Value, more: Option<&Value>) -> Result<Option<Value>, E>
    where
        F: FnMut(&Value, &[&Value]) -> Result<Option<Value>, E>,
    {
        try_each(input, &mut self.f, &self.scope, more)
    }

    pub fn call_str(&mut self, input: &str, more: Option<&Value>) -> crate::Result<Option<Value>>
    where
        F: FnMut(&Value, &[&Value]) -> Option<Value>,
    {
        each_str(input, &mut self.f, &self.scope, more)
    }

    pub fn scope(&self) -> &Value {
        &self.scope
    }
}
