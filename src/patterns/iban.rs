//! Country-keyed IBAN layouts and the ISO 13616 checksum

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::{compile_table, Classes};

const IBAN_LAYOUTS: &[(&str, &str)] = &[
    ("AD", r"^AD\d{2}\d{8}[A-Z0-9]{12}$"),
    ("AE", r"^AE\d{2}\d{19}$"),
    ("AT", r"^AT\d{2}\d{16}$"),
    ("BE", r"^BE\d{2}\d{12}$"),
    ("BG", r"^BG\d{2}[A-Z]{4}\d{6}[A-Z0-9]{8}$"),
    ("CH", r"^CH\d{2}\d{5}[A-Z0-9]{12}$"),
    ("CY", r"^CY\d{2}\d{8}[A-Z0-9]{16}$"),
    ("CZ", r"^CZ\d{2}\d{20}$"),
    ("DE", r"^DE\d{2}\d{18}$"),
    ("DK", r"^DK\d{2}\d{14}$"),
    ("EE", r"^EE\d{2}\d{16}$"),
    ("ES", r"^ES\d{2}\d{20}$"),
    ("FI", r"^FI\d{2}\d{14}$"),
    ("FR", r"^FR\d{2}\d{10}[A-Z0-9]{11}\d{2}$"),
    ("GB", r"^GB\d{2}[A-Z]{4}\d{14}$"),
    ("GR", r"^GR\d{2}\d{7}[A-Z0-9]{16}$"),
    ("HR", r"^HR\d{2}\d{17}$"),
    ("HU", r"^HU\d{2}\d{24}$"),
    ("IE", r"^IE\d{2}[A-Z0-9]{4}\d{14}$"),
    ("IS", r"^IS\d{2}\d{22}$"),
    ("IT", r"^IT\d{2}[A-Z]\d{10}[A-Z0-9]{12}$"),
    ("LI", r"^LI\d{2}\d{5}[A-Z0-9]{12}$"),
    ("LT", r"^LT\d{2}\d{16}$"),
    ("LU", r"^LU\d{2}\d{3}[A-Z0-9]{13}$"),
    ("LV", r"^LV\d{2}[A-Z]{4}[A-Z0-9]{13}$"),
    ("MC", r"^MC\d{2}\d{10}[A-Z0-9]{11}\d{2}$"),
    ("MT", r"^MT\d{2}[A-Z]{4}\d{5}[A-Z0-9]{18}$"),
    ("NL", r"^NL\d{2}[A-Z]{4}\d{10}$"),
    ("NO", r"^NO\d{2}\d{11}$"),
    ("PL", r"^PL\d{2}\d{24}$"),
    ("PT", r"^PT\d{2}\d{21}$"),
    ("RO", r"^RO\d{2}[A-Z]{4}[A-Z0-9]{16}$"),
    ("SA", r"^SA\d{2}\d{2}[A-Z0-9]{18}$"),
    ("SE", r"^SE\d{2}\d{20}$"),
    ("SI", r"^SI\d{2}\d{15}$"),
    ("SK", r"^SK\d{2}\d{20}$"),
    ("SM", r"^SM\d{2}[A-Z]\d{10}[A-Z0-9]{12}$"),
    ("TR", r"^TR\d{2}\d{5}[A-Z0-9]{17}$"),
];

fn table() -> &'static HashMap<&'static str, Regex> {
    static TABLE: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();
    TABLE.get_or_init(|| compile_table(IBAN_LAYOUTS, Classes::Ascii))
}

/// IBAN layout matcher for an ISO 3166 alpha-2 country
pub fn iban_layout(country: &str) -> Option<&'static Regex> {
    table().get(country)
}

/// Checks layout and checksum. Spaces and hyphens are ignored, case is not.
///
/// With `country` set, the IBAN must also belong to that country.
pub fn is_valid_iban(value: &str, country: Option<&str>) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect::<String>()
        .to_uppercase();
    if !compact.is_ascii() {
        return false;
    }

    let prefix = match compact.get(..2) {
        Some(prefix) => prefix,
        None => return false,
    };
    if let Some(expected) = country {
        if prefix != expected {
            return false;
        }
    }

    match iban_layout(prefix) {
        Some(layout) if layout.is_match(&compact) => has_valid_checksum(&compact),
        _ => false,
    }
}

/// ISO 7064 mod 97-10 over the rearranged IBAN
fn has_valid_checksum(iban: &str) -> bool {
    let (head, tail) = iban.split_at(4);
    let mut remainder: u32 = 0;

    for c in tail.chars().chain(head.chars()) {
        let digits = match c.to_digit(36) {
            Some(d) => d,
            None => return false,
        };
        remainder = if digits >= 10 {
            (remainder * 100 + digits) % 97
        } else {
            (remainder * 10 + digits) % 97
        };
    }

    remainder == 1
}
