//! Date schema
//!
//! Input is constructed into a UTC timestamp: numbers are epoch
//! milliseconds, strings are RFC 3339 or ISO-like calendar forms (naive
//! forms are read as UTC). `null` never constructs.
//!
//! With `populate()`, an unconstructible input is replaced by a random
//! date drawn from a window derived from the configured bounds. Bound
//! violations are never replaced.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use rand::Rng;
use serde_json::Value;
use tracing::debug;

use super::errors::{SchemaError, SchemaResult};
use super::modifiers::{Modifiable, Modifiers};
use super::result::{Resolved, ValidationResult};
use super::types::{Input, IntoJson, Schema};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Output of a date schema
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    /// The constructed date (default mode)
    Parsed(DateTime<Utc>),
    /// The original input, unchanged (`raw()` mode)
    Raw(Value),
}

impl DateValue {
    /// Returns the constructed date, if this is one
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            DateValue::Parsed(d) => Some(d),
            DateValue::Raw(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(value: DateTime<Utc>) -> Self {
        DateValue::Parsed(value)
    }
}

impl From<Value> for DateValue {
    fn from(value: Value) -> Self {
        DateValue::Raw(value)
    }
}

impl IntoJson for DateValue {
    fn into_json(self) -> Value {
        match self {
            DateValue::Parsed(d) => Value::String(format_date(&d)),
            DateValue::Raw(v) => v,
        }
    }
}

/// Something usable as a `before`/`after` bound
pub trait IntoDateBound {
    fn into_date_bound(self) -> SchemaResult<DateTime<Utc>>;
}

impl IntoDateBound for DateTime<Utc> {
    fn into_date_bound(self) -> SchemaResult<DateTime<Utc>> {
        Ok(self)
    }
}

impl IntoDateBound for NaiveDate {
    fn into_date_bound(self) -> SchemaResult<DateTime<Utc>> {
        Ok(start_of_day(self))
    }
}

/// Only the strict `YYYY-MM-DD` form is accepted
impl IntoDateBound for &str {
    fn into_date_bound(self) -> SchemaResult<DateTime<Utc>> {
        parse_strict_date(self)
            .map(start_of_day)
            .ok_or_else(|| SchemaError::InvalidDateBound(self.to_string()))
    }
}

impl IntoDateBound for String {
    fn into_date_bound(self) -> SchemaResult<DateTime<Utc>> {
        self.as_str().into_date_bound()
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

fn parse_strict_date(s: &str) -> Option<NaiveDate> {
    let well_formed = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds a date from raw input, or `None` if it cannot be constructed
fn construct(input: Input<'_>) -> Option<DateTime<Utc>> {
    match input.as_value()? {
        Value::Number(n) => {
            let millis = n.as_f64().filter(|f| f.is_finite())?.trunc();
            Utc.timestamp_millis_opt(millis as i64).single()
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(d) = DateTime::parse_from_rfc3339(s) {
                return Some(d.with_timezone(&Utc));
            }
            if let Some(d) = parse_strict_date(s) {
                return Some(start_of_day(d));
            }
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        _ => None,
    }
}

/// Validates date input.
#[derive(Debug, Clone)]
pub struct DateSchema {
    modifiers: Modifiers<DateValue>,
    raw: bool,
    before: Option<DateTime<Utc>>,
    after: Option<DateTime<Utc>>,
    populate: bool,
}

impl DateSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
            raw: false,
            before: None,
            after: None,
            populate: false,
        }
    }

    /// Returns the original input instead of the constructed date
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    /// Exclusive upper bound
    pub fn before(mut self, bound: impl IntoDateBound) -> SchemaResult<Self> {
        self.before = Some(bound.into_date_bound()?);
        Ok(self)
    }

    /// Exclusive lower bound
    pub fn after(mut self, bound: impl IntoDateBound) -> SchemaResult<Self> {
        self.after = Some(bound.into_date_bound()?);
        Ok(self)
    }

    /// Replaces unconstructible input with a random date inside the bounds
    pub fn populate(mut self) -> Self {
        self.populate = true;
        self
    }

    /// Inclusive millisecond range fallback dates are drawn from.
    ///
    /// - before only: the year leading up to it
    /// - after only: the year following it
    /// - both: strictly between them
    /// - neither: the last 365 days
    fn fallback_window(&self, now: DateTime<Utc>) -> Option<(i64, i64)> {
        let (low, high) = match (self.after, self.before) {
            (None, Some(before)) => {
                let start = before.checked_sub_months(Months::new(12))?;
                (start.timestamp_millis(), before.timestamp_millis() - 1)
            }
            (Some(after), None) => {
                let end = after.checked_add_months(Months::new(12))?;
                (after.timestamp_millis() + 1, end.timestamp_millis())
            }
            (Some(after), Some(before)) => {
                (after.timestamp_millis() + 1, before.timestamp_millis() - 1)
            }
            (None, None) => {
                let start = now - Duration::days(365);
                (start.timestamp_millis(), now.timestamp_millis())
            }
        };
        (low <= high).then_some((low, high))
    }

    fn generate<R: Rng>(&self, rng: &mut R, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (low, high) = self.fallback_window(now)?;
        Utc.timestamp_millis_opt(rng.gen_range(low..=high)).single()
    }

    fn output(&self, input: Input<'_>, date: DateTime<Utc>) -> DateValue {
        match (self.raw, input.as_value()) {
            (true, Some(raw)) => DateValue::Raw(raw.clone()),
            _ => DateValue::Parsed(date),
        }
    }
}

fn describe(input: Input<'_>) -> String {
    match input {
        Input::Value(Value::String(s)) => format!("\"{}\"", s),
        other => other.type_name().to_string(),
    }
}

impl Schema for DateSchema {
    type Output = DateValue;

    fn validate_input(&self, input: Input<'_>) -> ValidationResult<Resolved<DateValue>> {
        self.modifiers.run(input, |input| {
            let date = match construct(input) {
                Some(date) => date,
                None if self.populate => {
                    return match self.generate(&mut rand::thread_rng(), Utc::now()) {
                        Some(generated) => {
                            debug!(
                                input = %describe(input),
                                generated = %format_date(&generated),
                                "replaced unconstructible date"
                            );
                            let value = if self.raw {
                                DateValue::Raw(Value::String(format_date(&generated)))
                            } else {
                                DateValue::Parsed(generated)
                            };
                            ValidationResult::Valid(Resolved::Value(value))
                        }
                        None => ValidationResult::invalid(format!(
                            "Invalid date, received {}; no date fits between the configured bounds",
                            describe(input)
                        )),
                    };
                }
                None => {
                    return ValidationResult::invalid(format!(
                        "Invalid date, received {}",
                        describe(input)
                    ))
                }
            };

            if let Some(before) = self.before {
                if date >= before {
                    return ValidationResult::invalid(format!(
                        "Date must be before {}, received {}",
                        format_date(&before),
                        format_date(&date)
                    ));
                }
            }
            if let Some(after) = self.after {
                if date <= after {
                    return ValidationResult::invalid(format!(
                        "Date must be after {}, received {}",
                        format_date(&after),
                        format_date(&date)
                    ));
                }
            }

            ValidationResult::Valid(Resolved::Value(self.output(input, date)))
        })
    }
}

impl Modifiable for DateSchema {
    fn modifiers(&self) -> &Modifiers<DateValue> {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers<DateValue> {
        &mut self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn parsed(result: ValidationResult<Resolved<DateValue>>) -> DateTime<Utc> {
        match result {
            ValidationResult::Valid(Resolved::Value(DateValue::Parsed(d))) => d,
            other => panic!("expected parsed date, got {:?}", other),
        }
    }

    #[test]
    fn test_constructs_from_strings_and_numbers() {
        let schema = DateSchema::new();
        assert_eq!(
            parsed(schema.validate(&json!("2024-03-01"))),
            utc("2024-03-01T00:00:00Z")
        );
        assert_eq!(
            parsed(schema.validate(&json!("2024-03-01T12:30:00+02:00"))),
            utc("2024-03-01T10:30:00Z")
        );
        assert_eq!(
            parsed(schema.validate(&json!("2024-03-01 08:00:00"))),
            utc("2024-03-01T08:00:00Z")
        );
        assert_eq!(parsed(schema.validate(&json!(0))), utc("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn test_null_is_invalid() {
        let result = DateSchema::new().validate(&json!(null));
        assert_eq!(result.errors(), &["Invalid date, received null".to_string()]);
    }

    #[test]
    fn test_unparseable_string() {
        let result = DateSchema::new().validate(&json!("not-a-date"));
        assert_eq!(
            result.errors(),
            &["Invalid date, received \"not-a-date\"".to_string()]
        );
        assert!(DateSchema::new().validate(&json!(true)).is_invalid());
    }

    #[test]
    fn test_raw_mode_returns_input() {
        let result = DateSchema::new().raw().validate(&json!("2024-03-01"));
        assert_eq!(
            result,
            ValidationResult::Valid(Resolved::Value(DateValue::Raw(json!("2024-03-01"))))
        );
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let schema = DateSchema::new()
            .after("2024-01-01")
            .unwrap()
            .before("2024-12-31")
            .unwrap();
        assert!(schema.validate(&json!("2024-06-15")).is_valid());
        assert!(schema.validate(&json!("2024-01-01")).is_invalid());
        assert!(schema.validate(&json!("2024-12-31")).is_invalid());
        assert!(schema.validate(&json!("2025-02-01")).is_invalid());
    }

    #[test]
    fn test_bound_literal_must_be_strict() {
        let err = DateSchema::new().before("2024-1-1").unwrap_err();
        assert_eq!(err, SchemaError::InvalidDateBound("2024-1-1".into()));
        assert!(DateSchema::new().after("2024-02-30").is_err());
        assert!(DateSchema::new()
            .before(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .is_ok());
    }

    #[test]
    fn test_populate_before_only() {
        let schema = DateSchema::new().before("2024-01-01").unwrap().populate();
        for _ in 0..50 {
            let date = parsed(schema.validate(&json!("not-a-date")));
            assert!(date < utc("2024-01-01T00:00:00Z"));
            assert!(date >= utc("2023-01-01T00:00:00Z"));
        }
    }

    #[test]
    fn test_populate_after_only() {
        let schema = DateSchema::new().after("2024-01-01").unwrap().populate();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let date = schema.generate(&mut rng, Utc::now()).unwrap();
            assert!(date > utc("2024-01-01T00:00:00Z"));
            assert!(date <= utc("2025-01-01T00:00:00Z"));
        }
    }

    #[test]
    fn test_populate_without_bounds_uses_last_year() {
        let now = utc("2024-06-01T00:00:00Z");
        let schema = DateSchema::new().populate();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let date = schema.generate(&mut rng, now).unwrap();
            assert!(date <= now);
            assert!(date >= now - Duration::days(365));
        }
    }

    #[test]
    fn test_populate_with_empty_window_fails() {
        let schema = DateSchema::new()
            .after("2024-01-01")
            .unwrap()
            .before("2024-01-01")
            .unwrap()
            .populate();
        assert!(schema.validate(&json!("garbage")).is_invalid());
    }

    #[test]
    fn test_populate_does_not_override_range_failures() {
        let schema = DateSchema::new().before("2024-01-01").unwrap().populate();
        assert!(schema.validate(&json!("2030-01-01")).is_invalid());
    }

    #[test]
    fn test_populate_in_raw_mode_returns_text() {
        let schema = DateSchema::new().raw().populate();
        match schema.validate(&json!({})) {
            ValidationResult::Valid(Resolved::Value(DateValue::Raw(Value::String(s)))) => {
                assert!(DateTime::parse_from_rfc3339(&s).is_ok());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_erased_output_is_rfc3339() {
        let value = DateValue::Parsed(utc("2024-03-01T10:30:00Z")).into_json();
        assert_eq!(value, json!("2024-03-01T10:30:00.000Z"));
    }
}
