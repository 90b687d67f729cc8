//! Number schema
//!
//! Constraint order: int, positive, negative, min, max, multiple_of.
//! Bounds are inclusive; positive/negative exclude zero.

use serde_json::Value;

use super::modifiers::{Modifiable, Modifiers};
use super::result::{Resolved, ValidationResult};
use super::types::{format_number, Input, Schema};

/// Validates numeric input as `f64`.
#[derive(Debug, Clone)]
pub struct NumberSchema {
    modifiers: Modifiers<f64>,
    coerce: bool,
    int: bool,
    positive: bool,
    negative: bool,
    min: Option<f64>,
    max: Option<f64>,
    multiple_of: Option<f64>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
            coerce: false,
            int: false,
            positive: false,
            negative: false,
            min: None,
            max: None,
            multiple_of: None,
        }
    }

    /// Accepts booleans (1/0) and numeric strings
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    pub fn int(mut self) -> Self {
        self.int = true;
        self
    }

    /// Strictly greater than zero
    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    /// Strictly less than zero
    pub fn negative(mut self) -> Self {
        self.negative = true;
        self
    }

    /// Inclusive lower bound
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Requires `value % of == 0`. A zero divisor disables the check.
    pub fn multiple_of(mut self, of: f64) -> Self {
        self.multiple_of = Some(of);
        self
    }

    /// Alias for `multiple_of`
    pub fn step(self, step: f64) -> Self {
        self.multiple_of(step)
    }

    fn resolve_type(&self, input: Input<'_>) -> Option<f64> {
        match input {
            Input::Value(Value::Number(n)) => n.as_f64(),
            Input::Value(Value::Bool(b)) if self.coerce => Some(if *b { 1.0 } else { 0.0 }),
            Input::Value(Value::String(s)) if self.coerce => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    fn check_constraints(&self, value: f64) -> Option<String> {
        if self.int && value.fract() != 0.0 {
            return Some(format!("Expected integer, received {}", format_number(value)));
        }
        if self.positive && value <= 0.0 {
            return Some(format!(
                "Number must be greater than 0, received {}",
                format_number(value)
            ));
        }
        if self.negative && value >= 0.0 {
            return Some(format!(
                "Number must be less than 0, received {}",
                format_number(value)
            ));
        }
        if let Some(min) = self.min {
            if value < min {
                return Some(format!(
                    "Number must be greater than or equal to {}, received {}",
                    format_number(min),
                    format_number(value)
                ));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(format!(
                    "Number must be less than or equal to {}, received {}",
                    format_number(max),
                    format_number(value)
                ));
            }
        }
        if let Some(of) = self.multiple_of.filter(|of| *of != 0.0) {
            if value % of != 0.0 {
                return Some(format!(
                    "Number must be a multiple of {}, received {}",
                    format_number(of),
                    format_number(value)
                ));
            }
        }

        None
    }
}

impl Schema for NumberSchema {
    type Output = f64;

    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<f64>> {
        self.modifiers.run(input, |input| {
            let value = match self.resolve_type(input) {
                Some(value) => value,
                None => {
                    return ValidationResult::invalid(format!(
                        "Expected number, received {}",
                        input.type_name()
                    ))
                }
            };

            match self.check_constraints(value) {
                Some(message) => ValidationResult::invalid(message),
                None => ValidationResult::Valid(Resolved::Value(value)),
            }
        })
    }
}

impl Modifiable for NumberSchema {
    fn modifiers(&self) -> &Modifiers<f64> {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers<f64> {
        &mut self.modifiers
    }
}
