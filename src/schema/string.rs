//! String schema
//!
//! Pipeline: modifiers, type resolution (optionally coercing), transforms
//! in registration order, then constraints in a fixed order. The first
//! violated constraint is the only one reported.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::errors::{SchemaError, SchemaResult};
use super::modifiers::{Modifiable, Modifiers};
use super::result::{Resolved, ValidationResult};
use super::types::{Input, Schema, OBJECT_MARKER};
use crate::patterns::{self, IpVersion};

type TransformFn = Arc<dyn Fn(String) -> String + Send + Sync>;

#[derive(Clone)]
enum Transform {
    Trim,
    LowerCase,
    UpperCase,
    Capitalize,
    Custom(TransformFn),
}

impl Transform {
    fn apply(&self, value: String) -> String {
        match self {
            Transform::Trim => value.trim().to_string(),
            Transform::LowerCase => value.to_lowercase(),
            Transform::UpperCase => value.to_uppercase(),
            Transform::Capitalize => {
                let mut chars = value.chars();
                match chars.next() {
                    Some(first) => {
                        let rest = chars.as_str().to_lowercase();
                        let capitalized: String = first.to_uppercase().chain(rest.chars()).collect();
                        capitalized
                    }
                    None => value,
                }
            }
            Transform::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Trim => write!(f, "Trim"),
            Transform::LowerCase => write!(f, "LowerCase"),
            Transform::UpperCase => write!(f, "UpperCase"),
            Transform::Capitalize => write!(f, "Capitalize"),
            Transform::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A table pattern resolved at configuration time
#[derive(Debug, Clone)]
struct KeyedPattern {
    key: String,
    regex: &'static Regex,
}

impl KeyedPattern {
    fn lookup(
        check: &'static str,
        key: &str,
        table: fn(&str) -> Option<&'static Regex>,
    ) -> SchemaResult<Self> {
        let regex = table(key).ok_or_else(|| SchemaError::unknown_locale(check, key))?;
        Ok(Self {
            key: key.to_string(),
            regex,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum IbanCheck {
    AnyCountry,
    Country(String),
}

/// Validates text input.
#[derive(Debug, Clone)]
pub struct StringSchema {
    modifiers: Modifiers<String>,
    coerce: bool,
    transforms: Vec<Transform>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    exact_length: Option<usize>,
    starts_with: Option<String>,
    ends_with: Option<String>,
    email: bool,
    base64: bool,
    alpha: Option<KeyedPattern>,
    alphanumeric: Option<KeyedPattern>,
    numeric: bool,
    postal_code: Option<KeyedPattern>,
    iso_country: bool,
    iban: Option<IbanCheck>,
    bic: bool,
    ip: Option<IpVersion>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
            coerce: false,
            transforms: Vec::new(),
            min_length: None,
            max_length: None,
            exact_length: None,
            starts_with: None,
            ends_with: None,
            email: false,
            base64: false,
            alpha: None,
            alphanumeric: None,
            numeric: false,
            postal_code: None,
            iso_country: false,
            iban: None,
            bic: false,
            ip: None,
        }
    }

    /// Converts non-string input to its textual form before validating
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    pub fn trim(mut self) -> Self {
        self.transforms.push(Transform::Trim);
        self
    }

    pub fn to_lower_case(mut self) -> Self {
        self.transforms.push(Transform::LowerCase);
        self
    }

    pub fn to_upper_case(mut self) -> Self {
        self.transforms.push(Transform::UpperCase);
        self
    }

    /// Uppercases the first character and lowercases the rest
    pub fn capitalize(mut self) -> Self {
        self.transforms.push(Transform::Capitalize);
        self
    }

    /// Appends a custom transform; runs after type resolution, before constraints
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.transforms.push(Transform::Custom(Arc::new(f)));
        self
    }

    pub fn min(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.exact_length = Some(length);
        self
    }

    /// Minimum length of 1, unless a stricter minimum is already set
    pub fn non_empty(mut self) -> Self {
        self.min_length = Some(self.min_length.unwrap_or(0).max(1));
        self
    }

    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    pub fn ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.ends_with = Some(suffix.into());
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn base64(mut self) -> Self {
        self.base64 = true;
        self
    }

    /// Letters only, per the locale's alphabet (e.g. `"de-DE"`)
    pub fn alpha(mut self, locale: &str) -> SchemaResult<Self> {
        self.alpha = Some(KeyedPattern::lookup("alpha", locale, patterns::alpha)?);
        Ok(self)
    }

    /// Letters and digits only, per the locale's alphabet
    pub fn alphanumeric(mut self, locale: &str) -> SchemaResult<Self> {
        self.alphanumeric = Some(KeyedPattern::lookup(
            "alphanumeric",
            locale,
            patterns::alphanumeric,
        )?);
        Ok(self)
    }

    /// ASCII digits only
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Postal code format of an ISO 3166 alpha-2 country (e.g. `"US"`)
    pub fn postal_code(mut self, country: &str) -> SchemaResult<Self> {
        self.postal_code = Some(KeyedPattern::lookup(
            "postal code",
            country,
            patterns::postal_code,
        )?);
        Ok(self)
    }

    /// An assigned ISO 3166-1 alpha-2 country code
    pub fn iso_country(mut self) -> Self {
        self.iso_country = true;
        self
    }

    /// An IBAN issued in `country`
    pub fn iban(mut self, country: &str) -> SchemaResult<Self> {
        if patterns::iban_layout(country).is_none() {
            return Err(SchemaError::unknown_locale("IBAN", country));
        }
        self.iban = Some(IbanCheck::Country(country.to_string()));
        Ok(self)
    }

    /// An IBAN from any country with a known layout
    pub fn any_iban(mut self) -> Self {
        self.iban = Some(IbanCheck::AnyCountry);
        self
    }

    pub fn bic(mut self) -> Self {
        self.bic = true;
        self
    }

    pub fn ip(mut self, version: IpVersion) -> Self {
        self.ip = Some(version);
        self
    }

    fn resolve_type(&self, input: Input<'_>) -> Result<String, String> {
        if let Input::Value(serde_json::Value::String(s)) = input {
            return Ok(s.clone());
        }
        if self.coerce && !input.is_nullish() {
            let text = input.to_text();
            if text != OBJECT_MARKER {
                return Ok(text);
            }
        }
        Err(format!("Expected string, received {}", input.type_name()))
    }

    /// Returns the first violated constraint, if any
    fn check_constraints(&self, value: &str) -> Option<String> {
        let length = value.chars().count();

        if let Some(min) = self.min_length {
            if length < min {
                return Some(format!(
                    "String must contain at least {} character(s), received {}",
                    min, length
                ));
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return Some(format!(
                    "String must contain at most {} character(s), received {}",
                    max, length
                ));
            }
        }
        if let Some(exact) = self.exact_length {
            if length != exact {
                return Some(format!(
                    "String must contain exactly {} character(s), received {}",
                    exact, length
                ));
            }
        }
        if let Some(prefix) = &self.starts_with {
            if !value.starts_with(prefix.as_str()) {
                let actual: String = value.chars().take(prefix.chars().count()).collect();
                return Some(format!(
                    "String must start with \"{}\", received \"{}\"",
                    prefix, actual
                ));
            }
        }
        if let Some(suffix) = &self.ends_with {
            if !value.ends_with(suffix.as_str()) {
                let take = suffix.chars().count();
                let actual: String = value.chars().skip(length.saturating_sub(take)).collect();
                return Some(format!(
                    "String must end with \"{}\", received \"{}\"",
                    suffix, actual
                ));
            }
        }
        if self.email && !patterns::is_email(value) {
            return Some(format!("Invalid email address: \"{}\"", value));
        }
        if self.base64 && !patterns::is_base64(value) {
            return Some(format!("Invalid base64 string: \"{}\"", value));
        }
        if let Some(alpha) = &self.alpha {
            if !alpha.regex.is_match(value) {
                return Some(format!(
                    "String must contain only letters ({}): \"{}\"",
                    alpha.key, value
                ));
            }
        }
        if let Some(alnum) = &self.alphanumeric {
            if !alnum.regex.is_match(value) {
                return Some(format!(
                    "String must contain only letters and digits ({}): \"{}\"",
                    alnum.key, value
                ));
            }
        }
        if self.numeric && !patterns::is_numeric(value) {
            return Some(format!("String must contain only digits: \"{}\"", value));
        }
        if let Some(postal) = &self.postal_code {
            if !postal.regex.is_match(value) {
                return Some(format!("Invalid postal code ({}): \"{}\"", postal.key, value));
            }
        }
        if self.iso_country && !patterns::is_iso_country(value) {
            return Some(format!(
                "Invalid ISO 3166-1 alpha-2 country code: \"{}\"",
                value
            ));
        }
        if let Some(iban) = &self.iban {
            match iban {
                IbanCheck::AnyCountry if !patterns::is_valid_iban(value, None) => {
                    return Some(format!("Invalid IBAN: \"{}\"", value));
                }
                IbanCheck::Country(country)
                    if !patterns::is_valid_iban(value, Some(country.as_str())) => {
                    return Some(format!("Invalid IBAN ({}): \"{}\"", country, value));
                }
                _ => {}
            }
        }
        if self.bic && !patterns::is_bic(value) {
            return Some(format!("Invalid BIC: \"{}\"", value));
        }
        if let Some(version) = self.ip {
            if !patterns::is_ip(value, version) {
                return Some(format!("Invalid {} address: \"{}\"", version, value));
            }
        }

        None
    }
}

impl Schema for StringSchema {
    type Output = String;

    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<String>> {
        self.modifiers.run(input, |input| {
            let resolved = match self.resolve_type(input) {
                Ok(value) => value,
                Err(message) => return ValidationResult::invalid(message),
            };

            let value = self
                .transforms
                .iter()
                .fold(resolved, |value, transform| transform.apply(value));

            match self.check_constraints(&value) {
                Some(message) => ValidationResult::invalid(message),
                None => ValidationResult::Valid(Resolved::Value(value)),
            }
        })
    }
}

impl Modifiable for StringSchema {
    fn modifiers(&self) -> &Modifiers<String> {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers<String> {
        &mut self.modifiers
    }
}
