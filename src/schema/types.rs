//! Core schema traits and the input model
//!
//! Inputs are `serde_json::Value`s, with one extra state: `Undefined`,
//! for an absent object property or an explicitly missing argument.
//! JSON `null` is a value, not an absence.

use serde_json::{Map, Number, Value};

use super::modifiers::Modifiable;
use super::result::{Resolved, ValidationFailure, ValidationResult};

/// What a schema text-coerces plain objects to; never accepted as a string
pub(crate) const OBJECT_MARKER: &str = "[object Object]";

/// A borrowed, possibly absent input value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    /// No value at all
    Undefined,
    /// A JSON value, including `null`
    Value(&'a Value),
}

impl<'a> Input<'a> {
    /// Returns true for `null` and `Undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Input::Undefined | Input::Value(Value::Null))
    }

    /// Returns true only for JSON `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Input::Value(Value::Null))
    }

    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Input::Undefined => None,
            Input::Value(v) => Some(v),
        }
    }

    /// Returns the type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Input::Undefined => "undefined",
            Input::Value(Value::Null) => "null",
            Input::Value(Value::Bool(_)) => "boolean",
            Input::Value(Value::Number(_)) => "number",
            Input::Value(Value::String(_)) => "string",
            Input::Value(Value::Array(_)) => "array",
            Input::Value(Value::Object(_)) => "object",
        }
    }

    /// Truthiness under the generic truthy/falsy rule
    pub(crate) fn is_truthy(&self) -> bool {
        match self {
            Input::Undefined => false,
            Input::Value(Value::Null) => false,
            Input::Value(Value::Bool(b)) => *b,
            Input::Value(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Input::Value(Value::String(s)) => !s.is_empty(),
            Input::Value(Value::Array(_)) | Input::Value(Value::Object(_)) => true,
        }
    }

    /// Textual representation used by coercing schemas
    pub(crate) fn to_text(&self) -> String {
        match self {
            Input::Undefined => "undefined".to_string(),
            Input::Value(v) => value_to_text(v),
        }
    }
}

impl<'a> From<&'a Value> for Input<'a> {
    fn from(value: &'a Value) -> Self {
        Input::Value(value)
    }
}

impl<'a> From<Option<&'a Value>> for Input<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        match value {
            Some(v) => Input::Value(v),
            None => Input::Undefined,
        }
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_MARKER.to_string(),
    }
}

/// Formats a number the way it is echoed in messages: integral values
/// carry no fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

/// Converts a schema output into JSON for embedding in a parent result
pub trait IntoJson {
    fn into_json(self) -> Value;
}

impl IntoJson for Value {
    fn into_json(self) -> Value {
        self
    }
}

impl IntoJson for String {
    fn into_json(self) -> Value {
        Value::String(self)
    }
}

impl IntoJson for bool {
    fn into_json(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoJson for f64 {
    fn into_json(self) -> Value {
        // 2^53: beyond this integral f64 values lose precision as i64
        if self.fract() == 0.0 && self.abs() < 9_007_199_254_740_992.0 {
            Value::from(self as i64)
        } else {
            Number::from_f64(self).map(Value::Number).unwrap_or(Value::Null)
        }
    }
}

impl IntoJson for Map<String, Value> {
    fn into_json(self) -> Value {
        Value::Object(self)
    }
}

impl IntoJson for Vec<Value> {
    fn into_json(self) -> Value {
        Value::Array(self)
    }
}

/// A configured validation rule-set for one data shape.
pub trait Schema {
    /// The normalized value produced on success
    type Output: Clone;

    /// Runs the full pipeline against one input.
    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<Self::Output>>;

    /// Validates anything convertible into an `Input`.
    ///
    /// Never fails for data errors; those are returned as
    /// `ValidationResult::Invalid`.
    fn validate<'a, I: Into<Input<'a>>>(&self, input: I) -> ValidationResult<Resolved<Self::Output>> {
        self.validate_input(input.into())
    }

    /// Like `validate`, but as a `Result`.
    fn parse<'a, I: Into<Input<'a>>>(&self, input: I) -> Result<Resolved<Self::Output>, ValidationFailure> {
        self.validate_input(input.into()).into_result()
    }
}

/// Object-safe view of a schema used as a child of a composite.
///
/// Outputs are erased into JSON so heterogeneous children can share one
/// parent.
pub trait AnySchema: Send + Sync {
    fn validate_value(&self, input: Input<'_>) -> ValidationResult<Resolved<Value>>;

    /// Whether failures and absences collapse to `Undefined`
    fn is_optional(&self) -> bool;
}

impl<S> AnySchema for S
where
    S: Modifiable + Send + Sync,
    S::Output: IntoJson,
{
    fn validate_value(&self, input: Input<'_>) -> ValidationResult<Resolved<Value>> {
        self.validate_input(input)
            .map(|resolved| resolved.map(IntoJson::into_json))
    }

    fn is_optional(&self) -> bool {
        self.modifiers().is_optional()
    }
}
