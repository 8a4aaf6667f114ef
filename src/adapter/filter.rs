use std::fmt;

use tracing::trace;

use crate::protocol::{Advance, IterError, Step};

/// Forwards only the values of `inner` that satisfy a fallible predicate.
///
/// One call to [`Advance::advance`] may pull any number of values from
/// `inner`. The search stops the moment `inner` reports exhaustion, so an
/// exhausted inner iterator is never advanced in a loop.
pub struct Filter<I, P> {
    inner: I,
    predicate: P,
}

impl<I, P> Filter<I, P> {
    /// Wrap `inner`, keeping values for which `predicate` returns `true`.
    pub fn new(predicate: P, inner: I) -> Self {
        Self { inner, predicate }
    }

    /// Unwrap the adapter, returning the inner iterator.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: fmt::Debug, P> fmt::Debug for Filter<I, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("inner", &self.inner).finish()
    }
}

impl<I, P> Advance for Filter<I, P>
where
    I: Advance,
    P: FnMut(&I::Item) -> Result<bool, IterError>,
{
    type Item = I::Item;

    fn advance(&mut self) -> Result<Step<I::Item>, IterError> {
        let mut rejected = 0usize;
        loop {
            let value = match self.inner.advance()? {
                Step::Value(value) => value,
                Step::Exhausted => {
                    if rejected > 0 {
                        trace!(rejected, "filter reached exhaustion while searching");
                    }
                    return Ok(Step::Exhausted);
                }
            };
            if (self.predicate)(&value)? {
                return Ok(Step::Value(value));
            }
            rejected += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
