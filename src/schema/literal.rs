//! Literal and enum schemas
//!
//! Both match by strict equality and never coerce. Numbers compare by
//! value, so `1` and `1.0` are the same literal.

use serde_json::Value;

use super::modifiers::{Modifiable, Modifiers};
use super::result::{Resolved, ValidationResult};
use super::types::{Input, Schema};

fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

fn describe(input: Input<'_>) -> String {
    match input {
        Input::Undefined => "undefined".to_string(),
        Input::Value(v) => v.to_string(),
    }
}

/// Accepts exactly one value.
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    modifiers: Modifiers<Value>,
    literal: Value,
}

impl LiteralSchema {
    pub fn new(literal: impl Into<Value>) -> Self {
        Self {
            modifiers: Modifiers::default(),
            literal: literal.into(),
        }
    }

    pub fn literal(&self) -> &Value {
        &self.literal
    }
}

impl Schema for LiteralSchema {
    type Output = Value;

    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<Value>> {
        self.modifiers.run(input, |input| match input.as_value() {
            Some(value) if strict_equals(value, &self.literal) => {
                ValidationResult::Valid(Resolved::Value(value.clone()))
            }
            _ => ValidationResult::invalid(format!(
                "Expected literal {}, received {}",
                self.literal,
                describe(input)
            )),
        })
    }
}

impl Modifiable for LiteralSchema {
    fn modifiers(&self) -> &Modifiers<Value> {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers<Value> {
        &mut self.modifiers
    }
}

/// Accepts any member of a fixed set of values.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    modifiers: Modifiers<Value>,
    members: Vec<Value>,
}

impl EnumSchema {
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            modifiers: Modifiers::default(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn members(&self) -> &[Value] {
        &self.members
    }
}

impl Schema for EnumSchema {
    type Output = Value;

    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<Value>> {
        self.modifiers.run(input, |input| {
            let found = input
                .as_value()
                .filter(|value| self.members.iter().any(|m| strict_equals(value, m)));

            match found {
                Some(value) => ValidationResult::Valid(Resolved::Value(value.clone())),
                None => {
                    let accepted = self
                        .members
                        .iter()
                        .map(Value::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    ValidationResult::invalid(format!(
                        "Expected one of: {}, received {}",
                        accepted,
                        describe(input)
                    ))
                }
            }
        })
    }
}

impl Modifiable for EnumSchema {
    fn modifiers(&self) -> &Modifiers<Value> {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers<Value> {
        &mut self.modifiers
    }
}
