//! Adapters wrapping exactly one inner iterator.
//!
//! Both own their inner iterator and preserve its order, so they compose to
//! any depth (`filter(map(range))`) without buffering.

mod filter;
mod map;

pub use filter::Filter;
pub use map::Map;
