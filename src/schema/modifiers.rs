//! Modifier pipeline shared by every schema kind
//!
//! Pre-validation handles null/absent input, first match wins:
//! 1. default
//! 2. nullish (null or absent)
//! 3. nullable (null only)
//! 4. catch
//! 5. optional
//!
//! Post-validation runs once on the final result. A failure becomes the
//! catch value if one is set, otherwise `Undefined` if optional.

use super::result::{Resolved, ValidationResult};
use super::types::{Input, Schema};

/// Absent/failed input policy carried by each schema.
#[derive(Debug, Clone)]
pub struct Modifiers<T> {
    nullable: bool,
    nullish: bool,
    optional: bool,
    default: Option<T>,
    catch: Option<T>,
}

impl<T> Default for Modifiers<T> {
    fn default() -> Self {
        Self {
            nullable: false,
            nullish: false,
            optional: false,
            default: None,
            catch: None,
        }
    }
}

/// Verdict of the pre-validation probe
pub(crate) enum Precheck<'a, T> {
    /// Run the type checks on this input
    Continue(Input<'a>),
    /// Short-circuit with this result
    Return(ValidationResult<Resolved<T>>),
}

impl<T: Clone> Modifiers<T> {
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_nullish(&self) -> bool {
        self.nullish
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn catch_value(&self) -> Option<&T> {
        self.catch.as_ref()
    }

    pub(crate) fn pre_validate<'a>(&self, input: Input<'a>) -> Precheck<'a, T> {
        if !input.is_nullish() {
            return Precheck::Continue(input);
        }

        if let Some(default) = &self.default {
            return Precheck::Return(ValidationResult::Valid(Resolved::Value(default.clone())));
        }
        if self.nullish || (self.nullable && input.is_null()) {
            return Precheck::Return(ValidationResult::Valid(Resolved::Null));
        }
        if let Some(catch) = &self.catch {
            return Precheck::Return(ValidationResult::Valid(Resolved::Value(catch.clone())));
        }
        if self.optional {
            return Precheck::Return(ValidationResult::Valid(Resolved::Undefined));
        }

        Precheck::Continue(input)
    }

    pub(crate) fn post_validate(
        &self,
        result: ValidationResult<Resolved<T>>,
    ) -> ValidationResult<Resolved<T>> {
        match result {
            ValidationResult::Valid(_) => result,
            ValidationResult::Invalid(_) => {
                if let Some(catch) = &self.catch {
                    ValidationResult::Valid(Resolved::Value(catch.clone()))
                } else if self.optional {
                    ValidationResult::Valid(Resolved::Undefined)
                } else {
                    result
                }
            }
        }
    }

    /// Wraps a type/constraint check with both pipeline phases.
    pub(crate) fn run<'a, F>(&self, input: Input<'a>, check: F) -> ValidationResult<Resolved<T>>
    where
        F: FnOnce(Input<'a>) -> ValidationResult<Resolved<T>>,
    {
        match self.pre_validate(input) {
            Precheck::Return(result) => result,
            Precheck::Continue(input) => self.post_validate(check(input)),
        }
    }
}

/// Chainable modifier configuration, available on every schema.
pub trait Modifiable: Schema + Sized {
    fn modifiers(&self) -> &Modifiers<Self::Output>;

    fn modifiers_mut(&mut self) -> &mut Modifiers<Self::Output>;

    /// Accepts `null` (but not an absent value) as `Resolved::Null`.
    fn nullable(mut self) -> Self {
        self.modifiers_mut().nullable = true;
        self
    }

    /// Accepts both `null` and absent values as `Resolved::Null`.
    fn nullish(mut self) -> Self {
        self.modifiers_mut().nullish = true;
        self
    }

    /// Accepts absent input, and turns failures into `Resolved::Undefined`.
    fn optional(mut self) -> Self {
        self.modifiers_mut().optional = true;
        self
    }

    /// Substitutes `value` for null/absent input. Wins over every other modifier.
    fn default(mut self, value: impl Into<Self::Output>) -> Self {
        self.modifiers_mut().default = Some(value.into());
        self
    }

    /// Substitutes `value` for failed input, and for null/absent input
    /// when no nullish policy applies.
    fn catch(mut self, value: impl Into<Self::Output>) -> Self {
        self.modifiers_mut().catch = Some(value.into());
        self
    }
}
