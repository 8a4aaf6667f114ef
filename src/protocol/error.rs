use thiserror::Error;

/// Hard failures raised while producing or advancing an iterator.
///
/// Exhaustion is never an `IterError`; it is reported as
/// [`Step::Exhausted`](super::Step::Exhausted). Everything in here aborts the
/// enclosing computation and leaves the failing iterator in an unspecified
/// state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IterError {
    /// A transform function failed on one of its inputs.
    #[error("transform failed: {0}")]
    Transform(String),

    /// A predicate failed while being evaluated.
    #[error("predicate failed: {0}")]
    Predicate(String),

    /// The value cannot produce an iterator.
    #[error("'{type_name}' object is not iterable")]
    NotIterable {
        /// Type name of the offending value.
        type_name: String,
    },

    /// The value was used as a function but cannot be called.
    #[error("'{type_name}' object is not callable")]
    NotCallable {
        /// Type name of the offending value.
        type_name: String,
    },

    /// An argument had the wrong type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Type the callee accepts.
        expected: String,
        /// Type that was supplied.
        found: String,
    },

    /// A builtin was called with the wrong number of arguments.
    #[error("{name}() expected {expected} argument(s), got {found}")]
    Arity {
        /// Builtin name.
        name: String,
        /// Accepted argument count(s), e.g. `"1"` or `"1 or 2"`.
        expected: String,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A shared iterator was advanced from inside its own `advance`.
    #[error("iterator is already being advanced")]
    Reentrant,

    /// A pipeline configuration was rejected.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfiguration(String),
}

impl IterError {
    /// Helper for constructing transform-originated errors.
    pub fn transform_failure(msg: impl Into<String>) -> Self {
        IterError::Transform(msg.into())
    }

    /// Helper for constructing predicate-originated errors.
    pub fn predicate_failure(msg: impl Into<String>) -> Self {
        IterError::Predicate(msg.into())
    }

    /// Helper for type mismatches at the dynamic boundary.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        IterError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
