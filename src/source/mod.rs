//! Leaf sources: integer ranges and positional cursors.

mod counter;
mod cursor;

pub use counter::{range, range_between, Counter};
pub use cursor::SliceCursor;
