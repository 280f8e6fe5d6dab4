//! [`pro_singulis`] traversal for `serde_json::Value`, where the shape of the
//! input is only known at runtime.
//!
//! Arrays are traversed as sequences, objects as mappings (in insertion order),
//! and every other value is ignored. Callbacks receive the scope plus the full
//! argument list `[element, index or key, ...extra]`.
mod bind;
mod each;
mod error;

pub use bind::{bind, Bound};
pub use each::{each, each_str, try_each, Json};
pub use error::{Error, Result};
