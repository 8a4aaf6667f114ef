//! # Lazy pull iteration
//!
//! A consumer asks a source for an iterator, then pulls one value at a time
//! until the iterator reports exhaustion. Sources compose through adapters
//! without materializing anything in between.
//!
//! ## Components
//!
//! 1. **Counting source** ([`Counter`]): integers in a half-open range
//! 2. **Sequence cursor** ([`SliceCursor`]): elements of a borrowed slice, by position
//! 3. **Transform adapter** ([`Map`]): fallible function over each value
//! 4. **Filter adapter** ([`Filter`]): keeps values passing a fallible predicate
//!
//! Exhaustion is [`Step::Exhausted`], a value. Failing callbacks surface as
//! [`IterError`], a separate channel that is never mistaken for "done".
//!
//! ## Usage Example
//!
//! ```
//! use sluice::{drive, range_between, Advance, IterError};
//!
//! let evens = range_between(1, 10)
//!     .map(|x| Ok(x))
//!     .filter(|x| Ok(x % 2 == 0));
//! assert_eq!(drive::materialize(evens)?, vec![2, 4, 6, 8]);
//! # Ok::<(), IterError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod protocol;   // Sequence / Advance contract
pub mod source;     // Counting source and sequence cursor
pub mod adapter;    // Transform and filter adapters
pub mod drive;      // Materialization and loop driving
pub mod bridge;     // std::iter interop
pub mod dynamic;    // Value-level host boundary
pub mod pipeline;   // Configured pipelines

// Re-exports for convenience
pub use protocol::{Advance, BoxedIter, IterError, Sequence, Step};
pub use source::{range, range_between, Counter, SliceCursor};
pub use adapter::{Filter, Map};
pub use drive::{for_each, materialize, LoopExit, LoopSummary};
pub use bridge::{lift, Lift, Pull};
pub use pipeline::{FilterKind, PipelineConfig, TransformKind};
