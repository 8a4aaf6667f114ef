//! Counting source over a half-open integer range

use crate::protocol::{Advance, IterError, Step};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Produces `start, start + 1, ..., stop - 1`.
///
/// A reversed range (`start >= stop`) is simply empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Counter {
    current: i64,
    bound: i64,
}

impl Counter {
    /// Count from 0 up to (not including) `bound`.
    pub fn new(bound: i64) -> Self {
        Self::between(0, bound)
    }

    /// Count from `start` up to (not including) `stop`.
    pub fn between(start: i64, stop: i64) -> Self {
        Self {
            current: start,
            bound: stop,
        }
    }

    /// Next value to be produced, if any remain.
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Exclusive upper bound.
    pub fn bound(&self) -> i64 {
        self.bound
    }

    /// Number of values left.
    pub fn remaining(&self) -> u64 {
        if self.current >= self.bound {
            0
        } else {
            self.bound.abs_diff(self.current)
        }
    }
}

impl Advance for Counter {
    type Item = i64;

    fn advance(&mut self) -> Result<Step<i64>, IterError> {
        if self.current >= self.bound {
            return Ok(Step::Exhausted);
        }
        let value = self.current;
        // `value < bound <= i64::MAX`, so this cannot overflow.
        self.current += 1;
        Ok(Step::Value(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// `range(stop)`: count from 0 to `stop`.
pub fn range(stop: i64) -> Counter {
    Counter::new(stop)
}

/// `range(start, stop)`: count from `start` to `stop`.
pub fn range_between(start: i64, stop: i64) -> Counter {
    Counter::between(start, stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut counter: Counter) -> Vec<i64> {
        let mut out = Vec::new();
        while let Ok(Step::Value(v)) = counter.advance() {
            out.push(v);
        }
        out
    }

    #[test]
    fn test_single_bound_starts_at_zero() {
        assert_eq!(drain(range(4)), vec![0, 1, 2, 3]);
        assert!(drain(range(0)).is_empty());
        assert!(drain(range(-3)).is_empty());
    }

    #[test]
    fn test_explicit_start() {
        assert_eq!(drain(range_between(1, 4)), vec![1, 2, 3]);
        assert_eq!(drain(range_between(-2, 1)), vec![-2, -1, 0]);
    }

    #[test]
    fn test_reversed_range_is_immediately_exhausted() {
        let mut counter = range_between(10, 3);
        assert_eq!(counter.remaining(), 0);
        assert_eq!(counter.advance(), Ok(Step::Exhausted));
    }

    #[test]
    fn test_exhaustion_is_sticky() {
        let mut counter = range(1);
        assert_eq!(counter.advance(), Ok(Step::Value(0)));
        for _ in 0..5 {
            assert_eq!(counter.advance(), Ok(Step::Exhausted));
        }
        assert_eq!(counter.current(), counter.bound());
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let mut counter = range_between(i64::MAX - 2, i64::MAX);
        assert_eq!(counter.size_hint(), (2, Some(2)));
        assert_eq!(counter.advance(), Ok(Step::Value(i64::MAX - 2)));
        assert_eq!(counter.advance(), Ok(Step::Value(i64::MAX - 1)));
        assert_eq!(counter.advance(), Ok(Step::Exhausted));

        let wide = range_between(i64::MIN, i64::MAX);
        assert_eq!(wide.remaining(), u64::MAX);
    }
}
