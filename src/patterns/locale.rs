//! Locale-keyed character classes
//!
//! Classes list both cases explicitly; matching is case-sensitive.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::{compile_table, Classes};

const ALPHA: &[(&str, &str)] = &[
    ("en-US", r"^[A-Za-z]+$"),
    ("en-GB", r"^[A-Za-z]+$"),
    ("en-AU", r"^[A-Za-z]+$"),
    ("da-DK", r"^[A-Za-zÆØÅæøå]+$"),
    ("de-DE", r"^[A-Za-zÄÖÜäöüß]+$"),
    ("de-AT", r"^[A-Za-zÄÖÜäöüß]+$"),
    ("de-CH", r"^[A-Za-zÄÖÜäöüß]+$"),
    ("es-ES", r"^[A-Za-zÁÉÍÑÓÚÜáéíñóúü]+$"),
    ("fr-FR", r"^[A-Za-zÀÂÆÇÉÈÊËÏÎÔŒÙÛÜŸàâæçéèêëïîôœùûüÿ]+$"),
    ("it-IT", r"^[A-Za-zÀÉÈÌÎÓÒÙàéèìîóòù]+$"),
    ("nl-NL", r"^[A-Za-zÁÉËÏÓÖÜÚáéëïóöüú]+$"),
    ("nb-NO", r"^[A-Za-zÆØÅæøå]+$"),
    ("pl-PL", r"^[A-Za-zĄĆĘŚŁŃÓŻŹąćęśłńóżź]+$"),
    ("pt-PT", r"^[A-Za-zÃÁÀÂÄÇÉÊËÍÏÕÓÔÖÚÜãáàâäçéêëíïõóôöúü]+$"),
    ("pt-BR", r"^[A-Za-zÃÁÀÂÄÇÉÊËÍÏÕÓÔÖÚÜãáàâäçéêëíïõóôöúü]+$"),
    ("ru-RU", r"^[А-ЯЁа-яё]+$"),
    ("sv-SE", r"^[A-Za-zÅÄÖåäö]+$"),
    ("tr-TR", r"^[A-Za-zÇĞİÖŞÜçğıöşü]+$"),
    ("cs-CZ", r"^[A-Za-zÁČĎÉĚÍŇÓŘŠŤÚŮÝŽáčďéěíňóřšťúůýž]+$"),
    ("hu-HU", r"^[A-Za-zÁÉÍÓÖŐÚÜŰáéíóöőúüű]+$"),
];

const ALPHANUMERIC: &[(&str, &str)] = &[
    ("en-US", r"^[0-9A-Za-z]+$"),
    ("en-GB", r"^[0-9A-Za-z]+$"),
    ("en-AU", r"^[0-9A-Za-z]+$"),
    ("da-DK", r"^[0-9A-Za-zÆØÅæøå]+$"),
    ("de-DE", r"^[0-9A-Za-zÄÖÜäöüß]+$"),
    ("de-AT", r"^[0-9A-Za-zÄÖÜäöüß]+$"),
    ("de-CH", r"^[0-9A-Za-zÄÖÜäöüß]+$"),
    ("es-ES", r"^[0-9A-Za-zÁÉÍÑÓÚÜáéíñóúü]+$"),
    ("fr-FR", r"^[0-9A-Za-zÀÂÆÇÉÈÊËÏÎÔŒÙÛÜŸàâæçéèêëïîôœùûüÿ]+$"),
    ("it-IT", r"^[0-9A-Za-zÀÉÈÌÎÓÒÙàéèìîóòù]+$"),
    ("nl-NL", r"^[0-9A-Za-zÁÉËÏÓÖÜÚáéëïóöüú]+$"),
    ("nb-NO", r"^[0-9A-Za-zÆØÅæøå]+$"),
    ("pl-PL", r"^[0-9A-Za-zĄĆĘŚŁŃÓŻŹąćęśłńóżź]+$"),
    ("pt-PT", r"^[0-9A-Za-zÃÁÀÂÄÇÉÊËÍÏÕÓÔÖÚÜãáàâäçéêëíïõóôöúü]+$"),
    ("pt-BR", r"^[0-9A-Za-zÃÁÀÂÄÇÉÊËÍÏÕÓÔÖÚÜãáàâäçéêëíïõóôöúü]+$"),
    ("ru-RU", r"^[0-9А-ЯЁа-яё]+$"),
    ("sv-SE", r"^[0-9A-Za-zÅÄÖåäö]+$"),
    ("tr-TR", r"^[0-9A-Za-zÇĞİÖŞÜçğıöşü]+$"),
    ("cs-CZ", r"^[0-9A-Za-zÁČĎÉĚÍŇÓŘŠŤÚŮÝŽáčďéěíňóřšťúůýž]+$"),
    ("hu-HU", r"^[0-9A-Za-zÁÉÍÓÖŐÚÜŰáéíóöőúüű]+$"),
];

fn alpha_table() -> &'static HashMap<&'static str, Regex> {
    static TABLE: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();
    TABLE.get_or_init(|| compile_table(ALPHA, Classes::Unicode))
}

fn alphanumeric_table() -> &'static HashMap<&'static str, Regex> {
    static TABLE: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();
    TABLE.get_or_init(|| compile_table(ALPHANUMERIC, Classes::Unicode))
}

/// Letters-only matcher for `locale`
pub fn alpha(locale: &str) -> Option<&'static Regex> {
    alpha_table().get(locale)
}

/// Letters-and-digits matcher for `locale`
pub fn alphanumeric(locale: &str) -> Option<&'static Regex> {
    alphanumeric_table().get(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_locale_compiles() {
        for (key, _) in ALPHA {
            assert!(alpha(key).is_some(), "alpha {}", key);
        }
        for (key, _) in ALPHANUMERIC {
            assert!(alphanumeric(key).is_some(), "alphanumeric {}", key);
        }
    }

    #[test]
    fn test_german_letters() {
        let re = alpha("de-DE").unwrap();
        assert!(re.is_match("Straße"));
        assert!(re.is_match("Müller"));
        assert!(!re.is_match("Müller1"));
        assert!(!alpha("en-US").unwrap().is_match("Müller"));
    }

    #[test]
    fn test_alphanumeric_allows_digits() {
        let re = alphanumeric("en-US").unwrap();
        assert!(re.is_match("abc123"));
        assert!(!re.is_match("abc 123"));
        assert!(!re.is_match(""));
    }

    #[test]
    fn test_no_case_folded_lookalikes() {
        // Kelvin sign and long s fold to k and s
        assert!(!alpha("en-US").unwrap().is_match("\u{212A}elvin"));
        assert!(!alpha("en-US").unwrap().is_match("\u{17F}un"));
        assert!(!alphanumeric("de-DE").unwrap().is_match("\u{212A}1"));
        assert!(alpha("en-US").unwrap().is_match("Kelvin"));
    }

    #[test]
    fn test_alphanumeric_rejects_non_ascii_digits() {
        assert!(!alphanumeric("en-US").unwrap().is_match("abc\u{0661}"));
    }
}
