//! Consumers that drive a [`Sequence`] to completion.
//!
//! These are the entry points a host engine uses: [`for_each`] is the
//! for-construct, [`materialize`] is `list(...)`.

use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::protocol::{Advance, IterError, Sequence, Step};

/// Upper bound on up-front allocation from a size hint.
const MAX_PREALLOCATION: usize = 1 << 16;

/// How a [`for_each`] loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The iterator signalled exhaustion.
    Exhausted,
    /// The body asked to break out early.
    Broken,
}

/// Outcome of a completed [`for_each`] loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    /// Number of values bound to the loop body.
    pub iterations: usize,
    /// Why the loop stopped.
    pub exit: LoopExit,
}

impl LoopSummary {
    /// Whether the loop ran until the iterator was exhausted.
    pub fn ran_to_exhaustion(&self) -> bool {
        self.exit == LoopExit::Exhausted
    }
}

/// Collect every value of `seq` into a `Vec`, in emission order.
pub fn materialize<S: Sequence>(seq: S) -> Result<Vec<S::Item>, IterError> {
    let mut iter = seq.produce_iterator();
    let mut values = Vec::with_capacity(iter.size_hint().0.min(MAX_PREALLOCATION));

    while let Step::Value(value) = iter.advance()? {
        values.push(value);
    }

    debug!(len = values.len(), "materialized sequence");
    Ok(values)
}

/// Run `body` once per value of `seq`.
///
/// `produce_iterator` is called exactly once, then `advance` until the
/// iterator is exhausted or `body` returns [`ControlFlow::Break`]. Errors from
/// either side end the loop immediately.
pub fn for_each<S, B>(seq: S, mut body: B) -> Result<LoopSummary, IterError>
where
    S: Sequence,
    B: FnMut(S::Item) -> Result<ControlFlow<()>, IterError>,
{
    let mut iter = seq.produce_iterator();
    let mut iterations = 0usize;

    let exit = loop {
        let value = match iter.advance()? {
            Step::Value(value) => value,
            Step::Exhausted => {
                trace!(iterations, "loop iterator exhausted");
                break LoopExit::Exhausted;
            }
        };
        iterations += 1;
        if body(value)?.is_break() {
            break LoopExit::Broken;
        }
    };

    debug!(iterations, ?exit, "loop finished");
    Ok(LoopSummary { iterations, exit })
}

/// Number of values `seq` produces.
pub fn count<S: Sequence>(seq: S) -> Result<usize, IterError> {
    let mut iter = seq.produce_iterator();
    let mut n = 0usize;
    while let Step::Value(_) = iter.advance()? {
        n += 1;
    }
    Ok(n)
}
