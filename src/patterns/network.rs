//! Single-pattern formats: email, base64, digits, BIC, IP addresses

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use super::countries::is_iso_country;

const EMAIL: &str = r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";
const BIC: &str = r"^[A-Za-z]{6}[A-Za-z0-9]{2}([A-Za-z0-9]{3})?$";
const NUMERIC: &str = r"^[0-9]+$";

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|e| panic!("pattern '{}' does not compile: {}", pattern, e))
    })
}

/// Address family accepted by an IP check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
    Any,
}

impl std::fmt::Display for IpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
            IpVersion::Any => write!(f, "IP"),
        }
    }
}

pub fn is_email(value: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    value.len() <= 254 && compiled(&CELL, EMAIL).is_match(value)
}

/// Standard-alphabet, padded base64 with a non-empty payload
pub fn is_base64(value: &str) -> bool {
    !value.is_empty() && value.len() % 4 == 0 && STANDARD.decode(value).is_ok()
}

/// ASCII digits only
pub fn is_numeric(value: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, NUMERIC).is_match(value)
}

/// ISO 9362 business identifier code with a known country segment
pub fn is_bic(value: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    if !compiled(&CELL, BIC).is_match(value) {
        return false;
    }
    // Characters 5-6 are the country code
    is_iso_country(&value[4..6].to_uppercase())
}

pub fn is_ip(value: &str, version: IpVersion) -> bool {
    match version {
        IpVersion::V4 => value.parse::<Ipv4Addr>().is_ok(),
        IpVersion::V6 => value.parse::<Ipv6Addr>().is_ok(),
        IpVersion::Any => value.parse::<Ipv4Addr>().is_ok() || value.parse::<Ipv6Addr>().is_ok(),
    }
}
