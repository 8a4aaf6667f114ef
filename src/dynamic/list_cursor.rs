use std::rc::Rc;

use crate::protocol::{Advance, IterError, Step};

use super::Value;

/// Positional cursor over a shared, immutable list value.
#[derive(Debug, Clone)]
pub struct ListCursor {
    items: Rc<[Value]>,
    position: usize,
}

impl ListCursor {
    /// Cursor at the start of `items`.
    pub fn new(items: Rc<[Value]>) -> Self {
        Self { items, position: 0 }
    }
}

impl Advance for ListCursor {
    type Item = Value;

    fn advance(&mut self) -> Result<Step<Value>, IterError> {
        if self.position >= self.items.len() {
            return Ok(Step::Exhausted);
        }
        let value = self.items[self.position].clone();
        self.position += 1;
        Ok(Step::Value(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.items.len().saturating_sub(self.position);
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_backing_list() {
        let items: Rc<[Value]> = Rc::from(vec![Value::Int(1), Value::Int(2)]);
        let mut cursor = ListCursor::new(Rc::clone(&items));
        assert_eq!(Rc::strong_count(&items), 2);
        assert_eq!(cursor.advance(), Ok(Step::Value(Value::Int(1))));
        assert_eq!(cursor.size_hint(), (1, Some(1)));
        assert_eq!(cursor.advance(), Ok(Step::Value(Value::Int(2))));
        assert_eq!(cursor.advance(), Ok(Step::Exhausted));
        assert_eq!(cursor.advance(), Ok(Step::Exhausted));
    }
}
