//! Schema configuration errors
//!
//! Error codes:
//! - SHAPE_UNKNOWN_LOCALE
//! - SHAPE_INVALID_DATE_BOUND
//!
//! These are raised by the configuration call that received the bad
//! argument. Data errors never surface here; they travel inside
//! `ValidationResult::Invalid`.

use thiserror::Error;

/// Result type for schema configuration calls
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while configuring a schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A locale- or country-keyed check was given a key with no table entry
    #[error("Unknown locale '{locale}' for {check} check")]
    UnknownLocale {
        /// Name of the check that consulted the table
        check: &'static str,
        /// The key that was not found
        locale: String,
    },

    /// A date bound literal was not a strict `YYYY-MM-DD` calendar date
    #[error("Invalid date bound '{0}': expected YYYY-MM-DD")]
    InvalidDateBound(String),
}

impl SchemaError {
    pub(crate) fn unknown_locale(check: &'static str, locale: impl Into<String>) -> Self {
        SchemaError::UnknownLocale {
            check,
            locale: locale.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownLocale { .. } => "SHAPE_UNKNOWN_LOCALE",
            SchemaError::InvalidDateBound(_) => "SHAPE_INVALID_DATE_BOUND",
        }
    }
}
