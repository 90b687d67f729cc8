//! Country-keyed postal code formats

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::{compile_table, Classes};

const POSTAL_CODES: &[(&str, &str)] = &[
    ("AT", r"^\d{4}$"),
    ("AU", r"^\d{4}$"),
    ("BE", r"^\d{4}$"),
    ("BR", r"^\d{5}-?\d{3}$"),
    ("CA", r"(?i)^[ABCEGHJKLMNPRSTVXY]\d[ABCEGHJ-NPRSTV-Z][\s\-]?\d[ABCEGHJ-NPRSTV-Z]\d$"),
    ("CH", r"^\d{4}$"),
    ("CN", r"^\d{6}$"),
    ("CZ", r"^\d{3}\s?\d{2}$"),
    ("DE", r"^\d{5}$"),
    ("DK", r"^\d{4}$"),
    ("ES", r"^(5[0-2]|[0-4]\d)\d{3}$"),
    ("FI", r"^\d{5}$"),
    ("FR", r"^\d{2}\s?\d{3}$"),
    ("GB", r"(?i)^(gir\s?0aa|[a-z]{1,2}\d[\da-z]?\s?(\d[a-z]{2})?)$"),
    ("IE", r"(?i)^[AC-FHKNPRTV-Y][0-9]{2}\s?[0-9AC-FHKNPRTV-Y]{4}$"),
    ("IN", r"^[1-9]\d{5}$"),
    ("IT", r"^\d{5}$"),
    ("JP", r"^\d{3}-\d{4}$"),
    ("LU", r"^\d{4}$"),
    ("NL", r"^\d{4}\s?[A-Za-z]{2}$"),
    ("NO", r"^\d{4}$"),
    ("NZ", r"^\d{4}$"),
    ("PL", r"^\d{2}-\d{3}$"),
    ("PT", r"^\d{4}-\d{3}?$"),
    ("RU", r"^\d{6}$"),
    ("SE", r"^[1-9]\d{2}\s?\d{2}$"),
    ("US", r"^\d{5}(-\d{4})?$"),
];

fn table() -> &'static HashMap<&'static str, Regex> {
    static TABLE: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();
    TABLE.get_or_init(|| compile_table(POSTAL_CODES, Classes::Ascii))
}

/// Postal code matcher for an ISO 3166 alpha-2 country
pub fn postal_code(country: &str) -> Option<&'static Regex> {
    table().get(country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_country_compiles() {
        for (key, _) in POSTAL_CODES {
            assert!(postal_code(key).is_some(), "postal {}", key);
        }
    }

    #[test]
    fn test_us_zip() {
        let re = postal_code("US").unwrap();
        assert!(re.is_match("94105"));
        assert!(re.is_match("94105-1234"));
        assert!(!re.is_match("9410"));
    }

    #[test]
    fn test_gb_and_nl() {
        assert!(postal_code("GB").unwrap().is_match("SW1A 1AA"));
        assert!(postal_code("NL").unwrap().is_match("1012 AB"));
        assert!(!postal_code("DE").unwrap().is_match("1012"));
    }

    #[test]
    fn test_digits_and_letters_are_ascii_only() {
        assert!(!postal_code("DE").unwrap().is_match("\u{0661}\u{0660}\u{0661}\u{0661}\u{0665}"));
        assert!(!postal_code("US").unwrap().is_match("\u{FF19}4105"));
        assert!(!postal_code("GB").unwrap().is_match("SW1A 1A\u{212A}"));
        assert!(!postal_code("FR").unwrap().is_match("75\u{3000}001"));
        assert!(postal_code("CA").unwrap().is_match("k1a 0b1"));
    }
}
