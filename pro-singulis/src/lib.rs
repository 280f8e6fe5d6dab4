//! Traverse a sequence or a mapping, invoking a callback per element and keeping
//! every defined (`Some`) result in a structure shaped like the input.
//!
//! Sequences yield a compacted `Vec`: dropped elements leave no gap. Mappings yield
//! a mapping that keeps the key of every retained entry, in insertion order. Any
//! other input is left alone and yields `None`.
mod bind;
#[cfg(feature = "serde")]
mod de;
mod each;
mod iterable;

pub use bind::{bind, Bound};
pub use each::{each, each_with, try_each, try_each_with};
pub use iterable::{Input, Iterable, Key, Output, Shape};
