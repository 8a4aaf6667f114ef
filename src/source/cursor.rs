//! Positional cursor over a borrowed sequence

use crate::protocol::{Advance, IterError, Sequence, Step};

/// Walks a slice front to back, yielding references to its elements.
///
/// The cursor borrows the slice, so the sequence cannot shrink or be
/// replaced while the cursor is alive.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a, T> {
    items: &'a [T],
    position: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Cursor positioned at the first element of `items`.
    pub fn new(items: &'a [T]) -> Self {
        Self { items, position: 0 }
    }

    /// Index of the next element to be produced.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Elements not yet produced.
    pub fn remaining(&self) -> &'a [T] {
        self.items.get(self.position..).unwrap_or(&[])
    }
}

impl<'a, T> Advance for SliceCursor<'a, T> {
    type Item = &'a T;

    fn advance(&mut self) -> Result<Step<&'a T>, IterError> {
        match self.items.get(self.position) {
            Some(item) => {
                self.position += 1;
                Ok(Step::Value(item))
            }
            None => Ok(Step::Exhausted),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining().len();
        (n, Some(n))
    }
}

impl<'a, T> Sequence for &'a [T] {
    type Item = &'a T;
    type Iter = SliceCursor<'a, T>;

    fn produce_iterator(self) -> Self::Iter {
        SliceCursor::new(self)
    }
}

impl<'a, T> Sequence for &'a Vec<T> {
    type Item = &'a T;
    type Iter = SliceCursor<'a, T>;

    fn produce_iterator(self) -> Self::Iter {
        SliceCursor::new(self.as_slice())
    }
}

impl<'a, T, const N: usize> Sequence for &'a [T; N] {
    type Item = &'a T;
    type Iter = SliceCursor<'a, T>;

    fn produce_iterator(self) -> Self::Iter {
        SliceCursor::new(self.as_slice())
    }
}
