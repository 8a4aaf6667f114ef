use std::fmt;

use crate::protocol::{Advance, IterError, Step};

/// Applies a fallible function to every value pulled from `inner`.
///
/// The function is never called once `inner` reports exhaustion. A failing
/// call is a hard failure and is returned as-is; the value is not skipped.
pub struct Map<I, F> {
    inner: I,
    f: F,
}

impl<I, F> Map<I, F> {
    /// Wrap `inner`, transforming each value with `f`.
    pub fn new(f: F, inner: I) -> Self {
        Self { inner, f }
    }

    /// Unwrap the adapter, returning the inner iterator.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: fmt::Debug, F> fmt::Debug for Map<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("inner", &self.inner).finish()
    }
}

impl<U, I, F> Advance for Map<I, F>
where
    I: Advance,
    F: FnMut(I::Item) -> Result<U, IterError>,
{
    type Item = U;

    fn advance(&mut self) -> Result<Step<U>, IterError> {
        match self.inner.advance()? {
            Step::Value(value) => (self.f)(value).map(Step::Value),
            Step::Exhausted => Ok(Step::Exhausted),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
