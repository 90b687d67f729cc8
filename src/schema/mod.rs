//! Schema subsystem for shapeguard
//!
//! A schema is built once through a by-value builder chain and then only
//! read. Validation walks the schema graph once per call and never mutates
//! the schema or the input.
//!
//! # Pipeline
//!
//! - Modifiers first: default, nullish, nullable, catch, optional
//! - Type resolution, with coercion where enabled
//! - Transforms (strings only)
//! - Constraints, in a fixed order per kind
//! - Modifiers last: catch, optional
//!
//! Composites (object, array) validate every child and aggregate one
//! message per failing child, prefixed with its key or index.

mod array;
mod boolean;
mod config;
mod date;
mod errors;
mod literal;
mod modifiers;
mod number;
mod object;
mod result;
mod string;
mod types;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use config::BoolishConfig;
pub use date::{DateSchema, DateValue, IntoDateBound};
pub use errors::{SchemaError, SchemaResult};
pub use literal::{EnumSchema, LiteralSchema};
pub use modifiers::{Modifiable, Modifiers};
pub use number::NumberSchema;
pub use object::{ObjectSchema, Shape};
pub use result::{Resolved, ValidationFailure, ValidationResult};
pub use string::StringSchema;
pub use types::{AnySchema, Input, IntoJson, Schema};

use serde_json::Value;

pub fn string() -> StringSchema {
    StringSchema::new()
}

pub fn number() -> NumberSchema {
    NumberSchema::new()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

pub fn date() -> DateSchema {
    DateSchema::new()
}

/// Matches exactly `value`
pub fn literal(value: impl Into<Value>) -> LiteralSchema {
    LiteralSchema::new(value)
}

/// Matches any of `values`
pub fn enumeration<I>(values: I) -> EnumSchema
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    EnumSchema::new(values)
}

/// Arrays whose every element matches `element`
pub fn array<S: AnySchema + 'static>(element: S) -> ArraySchema {
    ArraySchema::new(element)
}

/// Objects matching `shape`
pub fn object(shape: Shape) -> ObjectSchema {
    ObjectSchema::new(shape)
}
