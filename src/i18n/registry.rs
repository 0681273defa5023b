//! Locale registry: single source of truth for all supported locales.
//!
//! The table is built once on first access (`OnceLock`) and never mutated,
//! so every request reads the same immutable set.

use regex::Regex;
use std::sync::OnceLock;

/// Text direction of a locale, rendered as the `dir` attribute of `<html>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 code used in URLs, cookies and bundle paths (e.g., "en", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "French")
    pub name: &'static str,

    /// Native name, shown in the locale switcher (e.g., "Français")
    pub native_name: &'static str,

    /// Whether this is the default locale (served without a path prefix)
    pub is_default: bool,

    /// Whether this locale is enabled for use
    pub enabled: bool,
}

impl LocaleConfig {
    pub fn direction(&self) -> Direction {
        if is_rtl(self.code) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

static RTL_REGEX: OnceLock<Regex> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its exact code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All enabled locales, default first, in declaration order otherwise.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        let mut enabled: Vec<_> = self.locales.iter().filter(|l| l.enabled).collect();
        enabled.sort_by_key(|l| !l.is_default);
        enabled
    }

    /// All locales, including disabled ones.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// The default locale configuration.
    ///
    /// # Panics
    /// Panics if the table does not declare exactly one default locale.
    /// The table is static, so this is a build defect caught by the tests.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self.locales.iter().filter(|l| l.is_default).collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// Membership test against the enabled locale set.
pub fn is_supported(code: &str) -> bool {
    LocaleRegistry::get().is_enabled(code)
}

/// Whether a language tag is written right-to-left (Arabic, Persian,
/// Hebrew, Urdu, ...). Accepts full tags such as "ar-EG".
pub fn is_rtl(code: &str) -> bool {
    let regex = RTL_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^(ar|fa|he|iw|ur|ps|sd|ug|yi|ckb|ku)(-|$)").unwrap()
    });
    regex.is_match(code)
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_default: false,
            enabled: true,
        },
    ]
}
