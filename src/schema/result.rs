//! Validation outcome types
//!
//! Every `validate` call produces a `ValidationResult`: either a resolved
//! value or a non-empty, ordered list of messages.

use thiserror::Error;

/// A successfully validated value.
///
/// `Null` and `Undefined` only appear when a modifier absorbed the input
/// (`nullable`/`nullish` and `optional` respectively).
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    /// A concrete value of the schema's output type
    Value(T),
    /// The input was accepted as null
    Null,
    /// The input was accepted as absent
    Undefined,
}

impl<T> Resolved<T> {
    /// Returns the concrete value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Resolved::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes self and returns the concrete value, if any
    pub fn into_value(self) -> Option<T> {
        match self {
            Resolved::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Resolved::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Resolved::Undefined)
    }

    /// Maps the concrete value, leaving `Null` and `Undefined` untouched
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolved<U> {
        match self {
            Resolved::Value(v) => Resolved::Value(f(v)),
            Resolved::Null => Resolved::Null,
            Resolved::Undefined => Resolved::Undefined,
        }
    }
}

impl Resolved<serde_json::Value> {
    /// Flattens into JSON; `Undefined` has no JSON form
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Resolved::Value(v) => Some(v),
            Resolved::Null => Some(serde_json::Value::Null),
            Resolved::Undefined => None,
        }
    }
}

/// Outcome of a single validation call
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T> {
    /// Validation passed
    Valid(T),
    /// Validation failed; never empty, in evaluation order
    Invalid(Vec<String>),
}

impl<T> ValidationResult<T> {
    /// Creates a failure with a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationResult::Invalid(vec![message.into()])
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Returns the value on success
    pub fn value(&self) -> Option<&T> {
        match self {
            ValidationResult::Valid(v) => Some(v),
            ValidationResult::Invalid(_) => None,
        }
    }

    /// Returns the messages on failure, empty on success
    pub fn errors(&self) -> &[String] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Invalid(errors) => errors,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ValidationResult<U> {
        match self {
            ValidationResult::Valid(v) => ValidationResult::Valid(f(v)),
            ValidationResult::Invalid(errors) => ValidationResult::Invalid(errors),
        }
    }

    /// Converts into a `Result` for `?`-style callers
    pub fn into_result(self) -> Result<T, ValidationFailure> {
        match self {
            ValidationResult::Valid(v) => Ok(v),
            ValidationResult::Invalid(errors) => Err(ValidationFailure { errors }),
        }
    }
}

/// Data errors from a failed validation, usable as a `std::error::Error`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", .errors.join("; "))]
pub struct ValidationFailure {
    errors: Vec<String>,
}

impl ValidationFailure {
    /// Returns the ordered messages
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}
