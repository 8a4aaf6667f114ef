//! The two-operation iteration contract
//!
//! - [`Sequence`]: anything that can produce an iterator
//! - [`Advance`]: a stateful cursor yielding one [`Step`] per call
//!
//! Exhaustion is a value ([`Step::Exhausted`]), not an error. Hard failures
//! travel separately as [`IterError`].

mod error;

pub use error::IterError;

use crate::adapter::{Filter, Map};
use crate::bridge::Pull;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a single [`Advance::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step<T> {
    /// The next value in emission order.
    Value(T),
    /// The iterator has no more values. Sticky.
    Exhausted,
}

impl<T> Step<T> {
    /// Whether this step is the exhaustion signal.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Step::Exhausted)
    }

    /// Apply `f` to the carried value, leaving exhaustion untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<U> {
        match self {
            Step::Value(value) => Step::Value(f(value)),
            Step::Exhausted => Step::Exhausted,
        }
    }

    /// Convert into an `Option`, mapping exhaustion to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Step::Value(value) => Some(value),
            Step::Exhausted => None,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Step::Value(value),
            None => Step::Exhausted,
        }
    }
}

/// A stateful cursor over a logical source of values.
///
/// Implementations must keep returning [`Step::Exhausted`] once they have
/// returned it; adapters rely on this instead of tracking it themselves.
pub trait Advance {
    /// Type of the values produced.
    type Item;

    /// Produce the next value, the exhaustion signal, or a hard failure.
    fn advance(&mut self) -> Result<Step<Self::Item>, IterError>;

    /// Bounds on the number of values left, as in `Iterator::size_hint`.
    ///
    /// Only used to pre-size buffers; callers must not trust it for
    /// correctness.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }

    /// Wrap `self` in a transform adapter.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> Result<U, IterError>,
    {
        Map::new(f, self)
    }

    /// Wrap `self` in a filter adapter.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> Result<bool, IterError>,
    {
        Filter::new(predicate, self)
    }

    /// Erase the concrete type for dynamic composition.
    fn boxed<'a>(self) -> BoxedIter<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    /// View as a `std::iter::Iterator` of `Result`s.
    fn into_std(self) -> Pull<Self>
    where
        Self: Sized,
    {
        Pull::new(self)
    }
}

/// Type-erased iterator used at dynamic composition boundaries.
pub type BoxedIter<'a, T> = Box<dyn Advance<Item = T> + 'a>;

impl<I: Advance + ?Sized> Advance for &mut I {
    type Item = I::Item;

    fn advance(&mut self) -> Result<Step<Self::Item>, IterError> {
        (**self).advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}

impl<I: Advance + ?Sized> Advance for Box<I> {
    type Item = I::Item;

    fn advance(&mut self) -> Result<Step<Self::Item>, IterError> {
        (**self).advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}

/// Anything that can produce an [`Advance`] over its values.
///
/// May be called on a fresh source any number of times. For an iterator it
/// hands back the iterator itself, with whatever state it has left.
pub trait Sequence {
    /// Type of the values produced.
    type Item;
    /// Iterator returned by [`Sequence::produce_iterator`].
    type Iter: Advance<Item = Self::Item>;

    /// Produce an iterator over this sequence.
    fn produce_iterator(self) -> Self::Iter;
}

impl<I: Advance> Sequence for I {
    type Item = I::Item;
    type Iter = I;

    fn produce_iterator(self) -> I {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Counter;

    #[test]
    fn test_step_helpers() {
        let step: Step<i64> = Step::Value(2);
        assert_eq!(step.map(|x| x * 3), Step::Value(6));
        assert_eq!(Step::<i64>::Exhausted.map(|x| x * 3), Step::Exhausted);
        assert!(Step::<()>::Exhausted.is_exhausted());
        assert_eq!(Step::from(Some(4)).into_option(), Some(4));
        assert_eq!(Step::<u8>::from(None), Step::Exhausted);
    }

    #[test]
    fn test_produce_iterator_on_iterator_keeps_state() {
        let mut counter = Counter::new(4);
        assert_eq!(counter.advance(), Ok(Step::Value(0)));

        // Re-requesting through a borrow continues where we left off.
        let mut again = (&mut counter).produce_iterator();
        assert_eq!(again.advance(), Ok(Step::Value(1)));
        assert_eq!(counter.advance(), Ok(Step::Value(2)));

        let mut moved = counter.produce_iterator();
        assert_eq!(moved.advance(), Ok(Step::Value(3)));
        assert_eq!(moved.advance(), Ok(Step::Exhausted));
    }

    #[test]
    fn test_boxed_iterator_delegates() {
        let mut boxed: BoxedIter<'_, i64> = Counter::between(5, 7).boxed();
        assert_eq!(boxed.size_hint(), (2, Some(2)));
        assert_eq!(boxed.advance(), Ok(Step::Value(5)));
        assert_eq!(boxed.advance(), Ok(Step::Value(6)));
        assert_eq!(boxed.advance(), Ok(Step::Exhausted));
    }
}
