use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::protocol::{Advance, BoxedIter, IterError, Step};

/// Dynamically typed value as seen by a host engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    None,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Immutable string.
    Str(Rc<str>),
    /// Immutable list; cursors share it rather than copy it.
    List(Rc<[Value]>),
    /// Callable function.
    Func(Callable),
    /// Live iterator, shared by every copy of the value.
    Iter(IterHandle),
}

impl Value {
    /// Host-visible type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Func(_) => "function",
            Value::Iter(_) => "iterator",
        }
    }

    /// Check if value is truthy (for conditionals and `filter`)
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Func(_) | Value::Iter(_) => true,
        }
    }

    /// Build a list value.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::from(items))
    }

    /// The integer payload, or a type mismatch naming `self`.
    pub fn as_int(&self) -> Result<i64, IterError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(IterError::type_mismatch("int", other.type_name())),
        }
    }

    fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "'{s}'"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_repr(f)?;
                }
                f.write_str("]")
            }
            Value::Func(func) => write!(f, "<function {}>", func.name()),
            Value::Iter(_) => f.write_str("<iterator>"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

type NativeFn = dyn Fn(&[Value]) -> Result<Value, IterError>;

/// Named native function callable from the host.
///
/// Two callables are equal only if they are the same function object.
#[derive(Clone)]
pub struct Callable {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl Callable {
    /// Wrap a native function under `name`.
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, IterError> + 'static,
    {
        Self {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    /// Name the function was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function with positional arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value, IterError> {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callable").field(&self.name).finish()
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

/// Shared handle to a type-erased iterator of values.
///
/// Cloning the handle shares the iterator state, matching how a host passes
/// the same iterator object around by reference.
#[derive(Clone)]
pub struct IterHandle {
    inner: Rc<RefCell<BoxedIter<'static, Value>>>,
}

impl IterHandle {
    /// Share `iter` behind a new handle.
    pub fn new<I>(iter: I) -> Self
    where
        I: Advance<Item = Value> + 'static,
    {
        Self {
            inner: Rc::new(RefCell::new(Box::new(iter))),
        }
    }

    /// Whether both handles refer to the same iterator.
    pub fn same_as(&self, other: &IterHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Advance for IterHandle {
    type Item = Value;

    fn advance(&mut self) -> Result<Step<Value>, IterError> {
        let mut iter = self
            .inner
            .try_borrow_mut()
            .map_err(|_| IterError::Reentrant)?;
        iter.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.inner.try_borrow() {
            Ok(iter) => iter.size_hint(),
            Err(_) => (0, None),
        }
    }
}

impl fmt::Debug for IterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterHandle")
            .field("refs", &Rc::strong_count(&self.inner))
            .finish()
    }
}

impl PartialEq for IterHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}
