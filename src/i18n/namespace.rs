//! Translation namespaces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named partition of translation keys. One JSON bundle exists per
/// (locale, namespace) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Common,
    Home,
    About,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::Common, Namespace::Home, Namespace::About];

    /// Namespace used for keys without an explicit `ns:` qualifier.
    pub const DEFAULT: Namespace = Namespace::Common;

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Common => "common",
            Namespace::Home => "home",
            Namespace::About => "about",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.as_str() == s)
            .ok_or_else(|| format!("Unknown namespace: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_all() {
        for ns in Namespace::ALL {
            assert_eq!(ns.as_str().parse::<Namespace>(), Ok(ns));
        }
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("dashboard".parse::<Namespace>().is_err());
        assert!("Common".parse::<Namespace>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Namespace::About).unwrap();
        assert_eq!(json, "\"about\"");
    }
}
