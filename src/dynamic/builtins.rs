//! Builtin functions over dynamic values.
//!
//! All builtins share the native calling convention
//! `fn(&[Value]) -> Result<Value, IterError>` so they can be registered as
//! [`Callable`]s with [`install`].

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::adapter::{Filter, Map};
use crate::drive;
use crate::protocol::{Advance, IterError};
use crate::source::Counter;

use super::{Callable, IterHandle, ListCursor, Value};

/// Native builtin signature.
pub type Builtin = fn(&[Value]) -> Result<Value, IterError>;

/// Every builtin, by the name the host looks it up under.
pub const BUILTINS: &[(&str, Builtin)] = &[
    ("iter", iter),
    ("range", range),
    ("map", map),
    ("filter", filter),
    ("list", list),
    ("len", len),
];

/// Register all builtins into a host environment.
pub fn install(env: &mut HashMap<String, Value>) {
    for (name, builtin) in BUILTINS {
        env.insert(name.to_string(), Value::Func(Callable::new(name, *builtin)));
    }
}

/// `produce_iterator` for dynamic values.
///
/// Lists get a fresh cursor each time; an iterator hands back the very same
/// handle. Anything else is not iterable.
pub fn produce_iterator(value: &Value) -> Result<IterHandle, IterError> {
    match value {
        Value::List(items) => Ok(IterHandle::new(ListCursor::new(Rc::clone(items)))),
        Value::Iter(handle) => Ok(handle.clone()),
        other => Err(IterError::NotIterable {
            type_name: other.type_name().to_string(),
        }),
    }
}

/// `iter(iterable)`
pub fn iter(args: &[Value]) -> Result<Value, IterError> {
    expect_arity("iter", args, 1, 1)?;
    produce_iterator(&args[0]).map(Value::Iter)
}

/// `range(stop)` or `range(start, stop)`
pub fn range(args: &[Value]) -> Result<Value, IterError> {
    let counter = match args {
        [stop] => Counter::new(stop.as_int()?),
        [start, stop] => Counter::between(start.as_int()?, stop.as_int()?),
        _ => return Err(arity_error("range", args, 1, 2)),
    };
    Ok(Value::Iter(IterHandle::new(
        counter.map(|n| Ok(Value::Int(n))),
    )))
}

/// `map(function, iterable)`
pub fn map(args: &[Value]) -> Result<Value, IterError> {
    expect_arity("map", args, 2, 2)?;
    let func = expect_callable(&args[0])?;
    let inner = produce_iterator(&args[1])?;
    trace!(function = func.name(), "building map adapter");
    let adapter = Map::new(move |value: Value| func.call(std::slice::from_ref(&value)), inner);
    Ok(Value::Iter(IterHandle::new(adapter)))
}

/// `filter(function, iterable)`
///
/// Keeps values for which `function` returns a truthy value. A `None`
/// function keeps values that are themselves truthy.
pub fn filter(args: &[Value]) -> Result<Value, IterError> {
    expect_arity("filter", args, 2, 2)?;
    let inner = produce_iterator(&args[1])?;
    let handle = match &args[0] {
        Value::None => IterHandle::new(Filter::new(
            |value: &Value| -> Result<bool, IterError> { Ok(value.is_truthy()) },
            inner,
        )),
        other => {
            let func = expect_callable(other)?;
            trace!(function = func.name(), "building filter adapter");
            IterHandle::new(Filter::new(
                move |value: &Value| -> Result<bool, IterError> {
                    Ok(func.call(std::slice::from_ref(value))?.is_truthy())
                },
                inner,
            ))
        }
    };
    Ok(Value::Iter(handle))
}

/// `list()` or `list(iterable)`: eager materialization.
pub fn list(args: &[Value]) -> Result<Value, IterError> {
    expect_arity("list", args, 0, 1)?;
    match args.first() {
        None => Ok(Value::list(Vec::new())),
        Some(iterable) => {
            let values = drive::materialize(produce_iterator(iterable)?)?;
            Ok(Value::list(values))
        }
    }
}

/// `len(value)` for lists and strings.
pub fn len(args: &[Value]) -> Result<Value, IterError> {
    expect_arity("len", args, 1, 1)?;
    let n = match &args[0] {
        Value::List(items) => items.len(),
        Value::Str(s) => s.chars().count(),
        other => return Err(IterError::type_mismatch("list or str", other.type_name())),
    };
    i64::try_from(n)
        .map(Value::Int)
        .map_err(|_| IterError::type_mismatch("length within int range", "oversized value"))
}

fn expect_arity(name: &str, args: &[Value], min: usize, max: usize) -> Result<(), IterError> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(arity_error(name, args, min, max))
    }
}

fn arity_error(name: &str, args: &[Value], min: usize, max: usize) -> IterError {
    let expected = if min == max {
        min.to_string()
    } else if max == min + 1 {
        format!("{min} or {max}")
    } else {
        format!("{min} to {max}")
    };
    IterError::Arity {
        name: name.to_string(),
        expected,
        found: args.len(),
    }
}

fn expect_callable(value: &Value) -> Result<Callable, IterError> {
    match value {
        Value::Func(func) => Ok(func.clone()),
        other => Err(IterError::NotCallable {
            type_name: other.type_name().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Advance, Step};

    fn is_even() -> Value {
        Value::Func(Callable::new("is_even", |args| {
            Ok(Value::Bool(args[0].as_int()? % 2 == 0))
        }))
    }

    fn ints(values: &[i64]) -> Value {
        Value::list(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn test_filter_then_list() {
        let evens = filter(&[is_even(), ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9])]).unwrap();
        let materialized = list(&[evens]).unwrap();
        assert_eq!(materialized, ints(&[2, 4, 6, 8]));
        assert_eq!(materialized.to_string(), "[2, 4, 6, 8]");
    }

    #[test]
    fn test_range_forms() {
        assert_eq!(list(&[range(&[Value::Int(3)]).unwrap()]).unwrap(), ints(&[0, 1, 2]));
        assert_eq!(
            list(&[range(&[Value::Int(2), Value::Int(5)]).unwrap()]).unwrap(),
            ints(&[2, 3, 4])
        );
        assert_eq!(
            range(&[Value::from("3")]).unwrap_err(),
            IterError::type_mismatch("int", "str")
        );
        assert!(matches!(range(&[]), Err(IterError::Arity { found: 0, .. })));
    }

    #[test]
    fn test_iter_on_iterator_returns_same_handle() {
        let it = range(&[Value::Int(3)]).unwrap();
        let again = iter(&[it.clone()]).unwrap();
        assert_eq!(again, it);

        let Value::Iter(mut handle) = again else {
            panic!("iter() should return an iterator");
        };
        assert_eq!(handle.advance(), Ok(Step::Value(Value::Int(0))));
        // The first handle observes the advance.
        assert_eq!(list(&[it]).unwrap(), ints(&[1, 2]));
    }

    #[test]
    fn test_not_iterable_and_not_callable() {
        assert_eq!(
            iter(&[Value::Int(5)]).unwrap_err(),
            IterError::NotIterable {
                type_name: "int".to_string()
            }
        );
        assert_eq!(
            map(&[Value::Int(1), ints(&[1])]).unwrap_err(),
            IterError::NotCallable {
                type_name: "int".to_string()
            }
        );
    }

    #[test]
    fn test_filter_with_none_uses_truthiness() {
        let mixed = Value::list(vec![Value::Int(0), Value::Int(3), Value::None, Value::from("x")]);
        let kept = list(&[filter(&[Value::None, mixed]).unwrap()]).unwrap();
        assert_eq!(kept, Value::list(vec![Value::Int(3), Value::from("x")]));
    }

    #[test]
    fn test_len() {
        assert_eq!(len(&[ints(&[1, 2, 3])]), Ok(Value::Int(3)));
        assert_eq!(len(&[Value::from("héllo")]), Ok(Value::Int(5)));
        assert!(len(&[Value::None]).is_err());
    }

    #[test]
    fn test_install_registers_every_builtin() {
        let mut env = HashMap::new();
        install(&mut env);
        assert_eq!(env.len(), BUILTINS.len());
        let Some(Value::Func(list_fn)) = env.get("list") else {
            panic!("list should be installed");
        };
        assert_eq!(list_fn.call(&[]), Ok(Value::list(vec![])));
    }
}
