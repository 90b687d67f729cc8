//! Modifier Pipeline Invariant Tests
//!
//! Tests for the shared pre/post validation pipeline:
//! - default wins over every other modifier for null/absent input
//! - nullable accepts null only, nullish accepts null and absent
//! - catch recovers absent and failed input
//! - optional collapses absence and failure to undefined
//! - validation is deterministic and never mutates the schema

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;
use shapeguard::prelude::*;
use shapeguard::schema::ValidationFailure;

// =============================================================================
// Nullable / Nullish Tests
// =============================================================================

/// nullable() accepts null as a null-typed value.
#[test]
fn test_nullable_accepts_null_for_every_kind() {
    let null = json!(null);

    assert_eq!(string().nullable().validate(&null), ValidationResult::Valid(Resolved::Null));
    assert_eq!(number().nullable().validate(&null), ValidationResult::Valid(Resolved::Null));
    assert_eq!(boolean().nullable().validate(&null), ValidationResult::Valid(Resolved::Null));
    assert_eq!(date().nullable().validate(&null), ValidationResult::Valid(Resolved::Null));
    assert_eq!(literal("a").nullable().validate(&null), ValidationResult::Valid(Resolved::Null));
    assert_eq!(
        array(number()).nullable().validate(&null),
        ValidationResult::Valid(Resolved::Null)
    );
    assert_eq!(
        object(Shape::new()).nullable().validate(&null),
        ValidationResult::Valid(Resolved::Null)
    );
}

/// nullable() alone does not cover undefined; type validation runs and fails.
#[test]
fn test_nullable_does_not_accept_undefined() {
    let result = string().nullable().validate(Input::Undefined);
    assert_eq!(result.errors(), &["Expected string, received undefined".to_string()]);

    let result = number().nullable().validate(Input::Undefined);
    assert!(result.is_invalid());
}

/// nullish() accepts both null and undefined.
#[test]
fn test_nullish_accepts_null_and_undefined() {
    let schema = number().nullish();
    assert_eq!(schema.validate(&json!(null)), ValidationResult::Valid(Resolved::Null));
    assert_eq!(schema.validate(Input::Undefined), ValidationResult::Valid(Resolved::Null));
    assert!(schema.validate(&json!("x")).is_invalid());
}

// =============================================================================
// Default / Catch / Optional Tests
// =============================================================================

/// default() wins over nullish for undefined input.
#[test]
fn test_default_wins_over_nullish() {
    let schema = string().default("d").nullish();
    assert_eq!(
        schema.validate(Input::Undefined),
        ValidationResult::Valid(Resolved::Value("d".to_string()))
    );
}

/// default() wins over nullable, catch and optional for null input.
#[test]
fn test_default_wins_over_every_modifier() {
    let schema = number().nullable().catch(1.0).optional().default(2.0);
    assert_eq!(schema.validate(&json!(null)), ValidationResult::Valid(Resolved::Value(2.0)));
    assert_eq!(schema.validate(Input::Undefined), ValidationResult::Valid(Resolved::Value(2.0)));
}

/// default() does not touch present, non-null input.
#[test]
fn test_default_ignored_for_present_input() {
    let schema = number().default(2.0);
    assert_eq!(schema.validate(&json!(0)), ValidationResult::Valid(Resolved::Value(0.0)));
    assert!(schema.validate(&json!("x")).is_invalid());
}

/// catch() recovers input that failed a constraint.
#[test]
fn test_catch_recovers_failed_input() {
    let schema = number().min(10.0).catch(0.0);
    assert_eq!(schema.validate(&json!(5)), ValidationResult::Valid(Resolved::Value(0.0)));
    assert_eq!(schema.validate(&json!(12)), ValidationResult::Valid(Resolved::Value(12.0)));
}

/// catch() recovers absent input when no nullish policy applies.
#[test]
fn test_catch_recovers_absent_input() {
    let schema = boolean().catch(false);
    assert_eq!(schema.validate(Input::Undefined), ValidationResult::Valid(Resolved::Value(false)));
    assert_eq!(schema.validate(&json!(null)), ValidationResult::Valid(Resolved::Value(false)));
}

/// nullish() outranks catch() for absent input.
#[test]
fn test_nullish_outranks_catch() {
    let schema = string().catch("fallback").nullish();
    assert_eq!(schema.validate(Input::Undefined), ValidationResult::Valid(Resolved::Null));
    assert_eq!(
        schema.validate(&json!(3)),
        ValidationResult::Valid(Resolved::Value("fallback".to_string()))
    );
}

/// optional() turns absence and failure into undefined.
#[test]
fn test_optional_collapses_absence_and_failure() {
    let schema = string().email().optional();
    assert_eq!(schema.validate(Input::Undefined), ValidationResult::Valid(Resolved::Undefined));
    assert_eq!(
        schema.validate(&json!("not-an-email")),
        ValidationResult::Valid(Resolved::Undefined)
    );
    assert!(schema.validate(&json!("ada@example.com")).is_valid());
}

/// Date defaults are returned as the configured instant.
#[test]
fn test_date_default_value() {
    let fallback = Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap();
    let schema = date().default(fallback);
    let result = schema.validate(Input::Undefined);
    assert_eq!(
        result.value().and_then(|r| r.value()).and_then(|d| d.as_datetime()),
        Some(&fallback)
    );
}

// =============================================================================
// Result Surface Tests
// =============================================================================

/// Failures always carry at least one message.
#[test]
fn test_failures_are_never_empty() {
    let inputs = [json!(null), json!(1), json!("x"), json!([]), json!({})];
    for input in &inputs {
        let result = boolean().validate(input);
        if result.is_invalid() {
            assert!(!result.errors().is_empty());
        }
    }
}

/// parse() surfaces failures as a std error.
#[test]
fn test_parse_returns_error_with_messages() {
    let err: ValidationFailure = number().int().parse(&json!(1.5)).unwrap_err();
    assert_eq!(err.errors(), &["Expected integer, received 1.5".to_string()]);
    assert_eq!(err.to_string(), "Validation failed: Expected integer, received 1.5");
}

// =============================================================================
// Transform Tests
// =============================================================================

/// Transforms apply in declaration order before constraints.
#[test]
fn test_trim_then_lower_case() {
    let schema = string().trim().to_lower_case();
    assert_eq!(
        schema.validate(&json!("  ABC  ")),
        ValidationResult::Valid(Resolved::Value("abc".to_string()))
    );
}

/// Length constraints see the transformed value.
#[test]
fn test_constraints_run_after_transforms() {
    let schema = string().trim().max(3);
    assert!(schema.validate(&json!("  abc  ")).is_valid());
    assert!(schema.validate(&json!("abcd")).is_invalid());
}

// =============================================================================
// Boundary Tests
// =============================================================================

/// min and max bounds are inclusive.
#[test]
fn test_numeric_bounds_inclusive() {
    let schema = number().min(5.0).max(5.0);
    assert!(schema.validate(&json!(5)).is_valid());
    assert_eq!(
        schema.validate(&json!(4)).errors(),
        &["Number must be greater than or equal to 5, received 4".to_string()]
    );
    assert_eq!(
        schema.validate(&json!(6)).errors(),
        &["Number must be less than or equal to 5, received 6".to_string()]
    );
}

/// A zero divisor disables the multiple-of check.
#[test]
fn test_multiple_of_zero_is_ignored() {
    assert!(number().multiple_of(0.0).validate(&json!(7)).is_valid());
    assert!(number().step(0.5).validate(&json!(1.5)).is_valid());
    assert!(number().step(0.5).validate(&json!(1.2)).is_invalid());
}

/// Later configuration calls overwrite earlier ones.
#[test]
fn test_last_write_wins() {
    let schema = number().min(10.0).min(1.0);
    assert!(schema.validate(&json!(2)).is_valid());

    let schema = string().starts_with("a").starts_with("b");
    assert!(schema.validate(&json!("bee")).is_valid());
    assert!(schema.validate(&json!("ant")).is_invalid());
}

// =============================================================================
// Date Fallback Tests
// =============================================================================

/// populate() draws a date inside the year before the upper bound.
#[test]
fn test_populate_respects_before_bound() {
    let schema = date().before("2024-01-01").unwrap().populate();
    let upper = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let lower = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();

    for _ in 0..50 {
        let result = schema.validate(&json!("not-a-date"));
        let generated = *result
            .value()
            .and_then(|r| r.value())
            .and_then(|d| d.as_datetime())
            .expect("populate always yields a date");
        assert!(generated < upper);
        assert!(generated >= lower);
    }
}

/// populate() with bounds that leave no room fails normally.
#[test]
fn test_populate_empty_window_fails() {
    let schema = date()
        .after("2024-01-01")
        .unwrap()
        .before("2024-01-01")
        .unwrap()
        .populate();
    let result = schema.validate(&json!("garbage"));
    assert!(result.is_invalid());
}

/// Malformed date bounds are configuration errors.
#[test]
fn test_bad_date_bound_is_schema_error() {
    let err = date().before("01/02/2024").unwrap_err();
    assert_eq!(err.code(), "SHAPE_INVALID_DATE_BOUND");
}

/// Unknown locale keys are configuration errors, not data errors.
#[test]
fn test_unknown_locale_is_schema_error() {
    let err = string().alpha("xx-XX").unwrap_err();
    assert_eq!(err.code(), "SHAPE_UNKNOWN_LOCALE");
    assert!(matches!(err, SchemaError::UnknownLocale { .. }));
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same input validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let schema = object(
        Shape::new()
            .field("name", string().trim().min(1))
            .field("tags", array(string().to_lower_case()).max(3)),
    );
    let input = json!({"name": "  Ada ", "tags": ["X", "Y"], "extra": 1});

    let first = schema.validate(&input);
    for _ in 0..100 {
        assert_eq!(schema.validate(&input), first);
    }
}

proptest! {
    /// Integers inside the bounds pass, outside fail.
    #[test]
    fn prop_numeric_bounds(value in -1000i64..1000, low in -500i64..0, high in 0i64..500) {
        let schema = number().int().min(low as f64).max(high as f64);
        let result = schema.validate(&json!(value));
        prop_assert_eq!(result.is_valid(), value >= low && value <= high);
    }

    /// Re-validating never changes the outcome.
    #[test]
    fn prop_string_validation_idempotent(input in ".{0,24}") {
        let schema = string().trim().to_upper_case().min(2).max(10);
        let value = json!(input);
        prop_assert_eq!(schema.validate(&value), schema.validate(&value));
    }

    /// Number coercion accepts every formatted finite float.
    #[test]
    fn prop_coerced_numbers_round_trip(n in -1.0e9f64..1.0e9) {
        let text = json!(format!(" {} ", n));
        prop_assert_eq!(
            number().coerce().validate(&text),
            ValidationResult::Valid(Resolved::Value(n))
        );
    }
}
