//! Boolean schema
//!
//! Coercion modes (last call wins):
//! - none: only JSON booleans pass
//! - native: generic truthiness
//! - boolish: text lookup in configurable truthy/falsy literal sets
//!
//! A polarity requirement, if set, is applied after coercion.

use serde_json::Value;
use tracing::trace;

use super::config::BoolishConfig;
use super::modifiers::{Modifiable, Modifiers};
use super::result::{Resolved, ValidationResult};
use super::types::{Input, Schema};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Coercion {
    None,
    Native,
    Boolish(BoolishConfig),
}

/// Validates boolean input.
#[derive(Debug, Clone)]
pub struct BooleanSchema {
    modifiers: Modifiers<bool>,
    coercion: Coercion,
    polarity: Option<bool>,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
            coercion: Coercion::None,
            polarity: None,
        }
    }

    /// Resolves any input by truthiness
    pub fn coerce(mut self) -> Self {
        self.coercion = Coercion::Native;
        self
    }

    /// Resolves text against the default truthy/falsy literal sets
    pub fn boolish(self) -> Self {
        self.boolish_with(BoolishConfig::default())
    }

    /// Resolves text against custom literal sets
    pub fn boolish_with(mut self, config: BoolishConfig) -> Self {
        self.coercion = Coercion::Boolish(config.normalized());
        self
    }

    /// Native coercion, and the result must be `true`
    pub fn truthy(mut self) -> Self {
        self.coercion = Coercion::Native;
        self.polarity = Some(true);
        self
    }

    /// Native coercion, and the result must be `false`
    pub fn falsy(mut self) -> Self {
        self.coercion = Coercion::Native;
        self.polarity = Some(false);
        self
    }

    /// Requires `true` without changing the coercion mode
    pub fn must_be_true(mut self) -> Self {
        self.polarity = Some(true);
        self
    }

    /// Requires `false` without changing the coercion mode
    pub fn must_be_false(mut self) -> Self {
        self.polarity = Some(false);
        self
    }

    fn resolve_type(&self, input: Input<'_>) -> Result<bool, String> {
        match &self.coercion {
            Coercion::None => match input {
                Input::Value(Value::Bool(b)) => Ok(*b),
                other => Err(format!("Expected boolean, received {}", other.type_name())),
            },
            Coercion::Native => Ok(input.is_truthy()),
            Coercion::Boolish(config) => {
                let literal = input.to_text().trim().to_lowercase();
                config.resolve(&literal).ok_or_else(|| {
                    trace!(literal = %literal, "boolish literal matched neither set");
                    format!("Cannot coerce \"{}\" to boolean", literal)
                })
            }
        }
    }
}

impl Schema for BooleanSchema {
    type Output = bool;

    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<bool>> {
        self.modifiers.run(input, |input| {
            let value = match self.resolve_type(input) {
                Ok(value) => value,
                Err(message) => return ValidationResult::invalid(message),
            };

            match self.polarity {
                Some(true) if !value => ValidationResult::invalid("Expected true, received false"),
                Some(false) if value => ValidationResult::invalid("Expected false, received true"),
                _ => ValidationResult::Valid(Resolved::Value(value)),
            }
        })
    }
}

impl Modifiable for BooleanSchema {
    fn modifiers(&self) -> &Modifiers<bool> {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers<bool> {
        &mut self.modifiers
    }
}
