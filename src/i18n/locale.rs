//! Locale type: validated locale representation.
//!
//! A `Locale` can only be built from a code present and enabled in the
//! registry, so every locale flowing through the routing and translation
//! code is a member of the supported set.

use crate::i18n::registry::{Direction, LocaleConfig, LocaleRegistry};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unknown locale code: '{0}'")]
    Unknown(String),

    #[error("Locale '{0}' is not enabled")]
    Disabled(String),
}

/// A validated, supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const ENGLISH: Locale = Locale { code: "en" };

    pub const FRENCH: Locale = Locale { code: "fr" };

    /// Create a Locale from an exact locale code ("en", "fr").
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is known and enabled
    /// * `Err(LocaleError)` otherwise
    pub fn from_code(code: &str) -> Result<Locale, LocaleError> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale { code: config.code }),
            Some(_) => Err(LocaleError::Disabled(code.to_string())),
            None => Err(LocaleError::Unknown(code.to_string())),
        }
    }

    /// Normalize a cookie value or language tag to a supported locale.
    ///
    /// The value is lower-cased and cut at the first `-`, so "fr-CA" and
    /// "FR" both map to French. Returns `None` for empty or unsupported
    /// values.
    pub fn normalize(value: &str) -> Option<Locale> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let lowered = value.to_lowercase();
        let base = lowered.split('-').next().unwrap_or_default();
        Locale::from_code(base).ok()
    }

    /// The default locale, served at unprefixed URLs.
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    /// Every enabled locale, default first.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a Locale built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn direction(&self) -> Direction {
        self.config().direction()
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::default_locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
