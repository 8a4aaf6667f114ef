//! Value-level boundary used by a host execution engine.
//!
//! The host holds dynamically typed [`Value`]s. This module lets it call
//! `iter`, `range`, `map`, `filter`, `list` and `len` on them, backed by the
//! same statically typed sources and adapters as the rest of the crate. Type
//! erasure happens here and nowhere else.

pub mod builtins;
mod list_cursor;
mod value;

pub use list_cursor::ListCursor;
pub use value::{Callable, IterHandle, Value};
