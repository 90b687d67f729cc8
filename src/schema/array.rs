//! Array schema
//!
//! Elements are validated in index order. Error labels use the original
//! index; length constraints count only the elements that survived
//! (optional elements that resolved to nothing are dropped).

use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

use super::modifiers::{Modifiable, Modifiers};
use super::result::{Resolved, ValidationResult};
use super::types::{AnySchema, Input, Schema};

/// Validates JSON arrays whose elements share one schema.
#[derive(Clone)]
pub struct ArraySchema {
    modifiers: Modifiers<Vec<Value>>,
    element: Arc<dyn AnySchema>,
    min: Option<usize>,
    max: Option<usize>,
}

impl ArraySchema {
    pub fn new<S>(element: S) -> Self
    where
        S: AnySchema + 'static,
    {
        Self::shared(Arc::new(element))
    }

    /// Uses an element schema that may also be used elsewhere
    pub fn shared(element: Arc<dyn AnySchema>) -> Self {
        Self {
            modifiers: Modifiers::default(),
            element,
            min: None,
            max: None,
        }
    }

    /// Minimum number of surviving elements
    pub fn min(mut self, count: usize) -> Self {
        self.min = Some(count);
        self
    }

    /// Maximum number of surviving elements
    pub fn max(mut self, count: usize) -> Self {
        self.max = Some(count);
        self
    }

    /// Minimum of 1, unless a stricter minimum is already set
    pub fn non_empty(mut self) -> Self {
        self.min = Some(self.min.unwrap_or(0).max(1));
        self
    }

    fn check_length(&self, count: usize) -> Option<String> {
        if let Some(min) = self.min {
            if count < min {
                return Some(format!(
                    "Array must contain at least {} element(s), received {}",
                    min, count
                ));
            }
        }
        if let Some(max) = self.max {
            if count > max {
                return Some(format!(
                    "Array must contain at most {} element(s), received {}",
                    max, count
                ));
            }
        }
        None
    }
}

impl std::fmt::Debug for ArraySchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArraySchema")
            .field("modifiers", &self.modifiers)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

impl Schema for ArraySchema {
    type Output = Vec<Value>;

    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<Vec<Value>>> {
        self.modifiers.run(input, |input| {
            let items = match input {
                Input::Value(Value::Array(items)) => items,
                other => {
                    return ValidationResult::invalid(format!(
                        "Expected array, received {}",
                        other.type_name()
                    ))
                }
            };

            let mut output = Vec::with_capacity(items.len());
            let mut errors = Vec::new();

            for (index, item) in items.iter().enumerate() {
                match self.element.validate_value(Input::Value(item)) {
                    ValidationResult::Valid(resolved) => {
                        if let Some(value) = resolved.into_json() {
                            output.push(value);
                        }
                    }
                    ValidationResult::Invalid(_) if self.element.is_optional() => {}
                    ValidationResult::Invalid(element_errors) => {
                        errors.push(format!("{}: {}", index, element_errors.join("; ")));
                    }
                }
            }

            if !errors.is_empty() {
                trace!(failed = errors.len(), elements = items.len(), "array elements failed");
                return ValidationResult::Invalid(errors);
            }

            match self.check_length(output.len()) {
                Some(message) => ValidationResult::invalid(message),
                None => ValidationResult::Valid(Resolved::Value(output)),
            }
        })
    }
}

impl Modifiable for ArraySchema {
    fn modifiers(&self) -> &Modifiers<Vec<Value>> {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers<Vec<Value>> {
        &mut self.modifiers
    }
}
