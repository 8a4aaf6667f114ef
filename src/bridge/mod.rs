//! Conversions between the pull protocol and `std::iter::Iterator`.

use std::iter::{Fuse, FusedIterator};

use crate::protocol::{Advance, IterError, Step};

/// `std` view of an [`Advance`]: yields `Ok(value)` until exhaustion.
///
/// A hard failure is yielded once as `Err`, after which the adapter ends; the
/// failed iterator is not advanced again.
#[derive(Debug)]
pub struct Pull<I> {
    inner: I,
    done: bool,
}

impl<I> Pull<I> {
    /// Wrap an [`Advance`] for use with `std` iterator combinators.
    pub fn new(inner: I) -> Self {
        Self { inner, done: false }
    }
}

impl<I: Advance> Iterator for Pull<I> {
    type Item = Result<I::Item, IterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.advance() {
            Ok(Step::Value(value)) => Some(Ok(value)),
            Ok(Step::Exhausted) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (_, upper) = self.inner.size_hint();
        // A trailing error may add one item, so only the upper bound survives.
        (0, upper.and_then(|n| n.checked_add(1)))
    }
}

impl<I: Advance> FusedIterator for Pull<I> {}

/// Protocol view of any `std` iterator. Never fails.
///
/// Fused, so exhaustion is sticky even when the wrapped iterator is not.
#[derive(Debug, Clone)]
pub struct Lift<I> {
    inner: Fuse<I>,
}

impl<I: Iterator> Lift<I> {
    /// Wrap a `std` iterator.
    pub fn new(inner: I) -> Self {
        Self {
            inner: inner.fuse(),
        }
    }
}

impl<I: Iterator> Advance for Lift<I> {
    type Item = I::Item;

    fn advance(&mut self) -> Result<Step<I::Item>, IterError> {
        Ok(self.inner.next().into())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Lift anything iterable into the protocol.
pub fn lift<T: IntoIterator>(iterable: T) -> Lift<T::IntoIter> {
    Lift::new(iterable.into_iter())
}
