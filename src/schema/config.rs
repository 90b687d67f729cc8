//! Boolish coercion configuration
//!
//! The accepted truthy/falsy literals can be loaded from any serde
//! source; missing fields fall back to the built-in sets.

use serde::{Deserialize, Serialize};

/// Literal sets used by boolish coercion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolishConfig {
    /// Strings that resolve to `true` (default: true, 1, yes, on, y, enabled, ja, j, wahr)
    #[serde(default = "default_truthy")]
    pub truthy: Vec<String>,

    /// Strings that resolve to `false` (default: false, 0, no, off, n, disabled, nein, falsch)
    #[serde(default = "default_falsy")]
    pub falsy: Vec<String>,
}

fn default_truthy() -> Vec<String> {
    ["true", "1", "yes", "on", "y", "enabled", "ja", "j", "wahr"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_falsy() -> Vec<String> {
    ["false", "0", "no", "off", "n", "disabled", "nein", "falsch"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for BoolishConfig {
    fn default() -> Self {
        Self {
            truthy: default_truthy(),
            falsy: default_falsy(),
        }
    }
}

impl BoolishConfig {
    /// Create a config with custom literal sets
    pub fn new<T, F>(truthy: T, falsy: F) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            truthy: truthy.into_iter().map(Into::into).collect(),
            falsy: falsy.into_iter().map(Into::into).collect(),
        }
    }

    /// Trims and lowercases every entry, matching how input is normalized
    pub(crate) fn normalized(mut self) -> Self {
        for entry in self.truthy.iter_mut().chain(self.falsy.iter_mut()) {
            *entry = entry.trim().to_lowercase();
        }
        self
    }

    /// Resolves an already-normalized literal
    pub(crate) fn resolve(&self, literal: &str) -> Option<bool> {
        if self.truthy.iter().any(|t| t == literal) {
            Some(true)
        } else if self.falsy.iter().any(|f| f == literal) {
            Some(false)
        } else {
            None
        }
    }
}
