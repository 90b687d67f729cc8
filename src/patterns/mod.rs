//! Static reference data consulted by the string schema
//!
//! Tables are compiled once on first use and are read-only afterwards.
//! Lookups by locale/country key return `None` for unknown keys; callers
//! turn that into a configuration error.

mod countries;
mod iban;
mod locale;
mod network;
mod postal;

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

pub use countries::{is_iso_country, ISO_3166_ALPHA_2};
pub use iban::{iban_layout, is_valid_iban};
pub use locale::{alpha, alphanumeric};
pub use network::{is_base64, is_bic, is_email, is_ip, is_numeric, IpVersion};
pub use postal::postal_code;

/// Character semantics a table is compiled with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classes {
    /// `\d`, `\s` and `(?i)` cover ASCII only
    Ascii,
    /// Full Unicode classes and case folding
    Unicode,
}

/// Compiles a static `(key, pattern)` table.
///
/// Every entry is covered by the tests in this module, so a failure here
/// is a broken table, not bad input.
pub(crate) fn compile_table(
    entries: &[(&'static str, &'static str)],
    classes: Classes,
) -> HashMap<&'static str, Regex> {
    entries
        .iter()
        .map(|(key, pattern)| {
            let regex = RegexBuilder::new(pattern)
                .unicode(classes == Classes::Unicode)
                .build()
                .unwrap_or_else(|e| panic!("pattern for '{}' does not compile: {}", key, e));
            (*key, regex)
        })
        .collect()
}
