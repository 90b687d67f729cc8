//! Object schema
//!
//! The shape is an allow-list: declared keys are validated in declaration
//! order, undeclared keys are dropped without error. Optional children
//! that resolve to nothing (or fail) leave no key behind.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use super::modifiers::{Modifiable, Modifiers};
use super::result::{Resolved, ValidationResult};
use super::types::{AnySchema, Input, Schema};

const EMPTY_OBJECT: &str = "Object must not be empty";

/// Ordered key → child schema mapping
#[derive(Clone, Default)]
pub struct Shape {
    fields: Vec<(String, Arc<dyn AnySchema>)>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `key`. Re-declaring a key replaces its schema in place.
    pub fn field<S>(self, key: impl Into<String>, schema: S) -> Self
    where
        S: AnySchema + 'static,
    {
        self.field_shared(key, Arc::new(schema))
    }

    /// Declares `key` with a schema that may also be used elsewhere
    pub fn field_shared(mut self, key: impl Into<String>, schema: Arc<dyn AnySchema>) -> Self {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = schema,
            None => self.fields.push((key, schema)),
        }
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

/// Validates JSON objects against a shape.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    modifiers: Modifiers<Map<String, Value>>,
    shape: Shape,
    non_empty: bool,
}

impl ObjectSchema {
    pub fn new(shape: Shape) -> Self {
        Self {
            modifiers: Modifiers::default(),
            shape,
            non_empty: false,
        }
    }

    /// Rejects objects with no keys, before and after per-key validation
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl Schema for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<Map<String, Value>>> {
        self.modifiers.run(input, |input| {
            let object = match input {
                Input::Value(Value::Object(object)) => object,
                other => {
                    return ValidationResult::invalid(format!(
                        "Expected object, received {}",
                        other.type_name()
                    ))
                }
            };

            if self.non_empty && object.is_empty() {
                return ValidationResult::invalid(EMPTY_OBJECT);
            }

            let mut output = Map::new();
            let mut errors = Vec::new();

            for (key, child) in &self.shape.fields {
                match child.validate_value(Input::from(object.get(key))) {
                    ValidationResult::Valid(resolved) => {
                        if let Some(value) = resolved.into_json() {
                            output.insert(key.clone(), value);
                        }
                    }
                    ValidationResult::Invalid(_) if child.is_optional() => {}
                    ValidationResult::Invalid(child_errors) => {
                        errors.push(format!("{}: {}", key, child_errors.join("; ")));
                    }
                }
            }

            if !errors.is_empty() {
                trace!(failed = errors.len(), fields = self.shape.len(), "object fields failed");
                return ValidationResult::Invalid(errors);
            }
            if self.non_empty && output.is_empty() {
                return ValidationResult::invalid(EMPTY_OBJECT);
            }

            ValidationResult::Valid(Resolved::Value(output))
        })
    }
}

impl Modifiable for ObjectSchema {
    fn modifiers(&self) -> &Modifiers<Map<String, Value>> {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers<Map<String, Value>> {
        &mut self.modifiers
    }
}
