//! Translation loading and lookup.
//!
//! A `Translator` is built per request by `TranslationLoader::load` and
//! owns the bundles it needs; nothing is cached across requests. Lookups
//! fall back to the fallback locale, then to the key itself (or an empty
//! string, depending on `MissingKey`).

use crate::i18n::bundles::{Bundle, BundleSource, LoadError};
use crate::i18n::locale::{Locale, LocaleError};
use crate::i18n::metrics::TranslationMetrics;
use crate::i18n::namespace::Namespace;
use futures::future::try_join_all;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").unwrap())
}

/// What a lookup returns when the key exists in no loaded bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKey {
    /// Return the key itself, e.g. "counter.label"
    #[default]
    ReturnKey,
    /// Return an empty string
    Empty,
}

impl FromStr for MissingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "key" => Ok(MissingKey::ReturnKey),
            "empty" => Ok(MissingKey::Empty),
            other => Err(format!(
                "Invalid missing-key policy '{}', expected 'key' or 'empty'",
                other
            )),
        }
    }
}

/// Serializable snapshot of a translator's bundles.
///
/// Embedded into rendered pages so a second translator can be rebuilt
/// from exactly the strings the server used, without fetching again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18nResources {
    pub locale: String,
    pub fallback_locale: String,
    pub bundles: BTreeMap<Namespace, Bundle>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fallback_bundles: BTreeMap<Namespace, Bundle>,
}

/// Loads the bundles a page needs and produces a `Translator`.
#[derive(Debug, Clone)]
pub struct TranslationLoader {
    source: BundleSource,
    fallback: Locale,
    missing_key: MissingKey,
}

impl TranslationLoader {
    /// Loader falling back to the default locale.
    pub fn new(source: BundleSource, missing_key: MissingKey) -> Self {
        Self {
            source,
            fallback: Locale::default_locale(),
            missing_key,
        }
    }

    /// Load `namespaces` for `locale`, plus the same namespaces for the
    /// fallback locale when it differs. All bundles are fetched
    /// concurrently. Missing bundles are skipped; I/O and parse failures
    /// abort the load.
    pub async fn load(
        &self,
        locale: Locale,
        namespaces: &[Namespace],
    ) -> Result<Translator, LoadError> {
        let mut wanted: Vec<Namespace> = namespaces.to_vec();
        wanted.sort();
        wanted.dedup();

        let mut requests = Vec::with_capacity(wanted.len() * 2);
        for namespace in &wanted {
            requests.push((locale, *namespace));
            if locale != self.fallback {
                requests.push((self.fallback, *namespace));
            }
        }

        let source = &self.source;
        let loaded = try_join_all(requests.into_iter().map(|(l, ns)| async move {
            source.load(l, ns).await.map(|bundle| (l, ns, bundle))
        }))
        .await?;

        let mut bundles = BTreeMap::new();
        let mut fallback_bundles = BTreeMap::new();
        for (l, ns, bundle) in loaded {
            let Some(bundle) = bundle else { continue };
            if l == locale {
                bundles.insert(ns, bundle);
            } else {
                fallback_bundles.insert(ns, bundle);
            }
        }

        debug!(
            %locale,
            namespaces = ?wanted,
            loaded = bundles.len(),
            fallback_loaded = fallback_bundles.len(),
            "Initialized translator"
        );

        Ok(Translator {
            locale,
            fallback: self.fallback,
            bundles,
            fallback_bundles,
            missing_key: self.missing_key,
        })
    }
}

/// Per-request translation lookup.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    fallback: Locale,
    bundles: BTreeMap<Namespace, Bundle>,
    fallback_bundles: BTreeMap<Namespace, Bundle>,
    missing_key: MissingKey,
}

impl Translator {
    /// Rebuild a translator from a resources snapshot.
    pub fn from_resources(
        resources: I18nResources,
        missing_key: MissingKey,
    ) -> Result<Self, LocaleError> {
        Ok(Self {
            locale: Locale::from_code(&resources.locale)?,
            fallback: Locale::from_code(&resources.fallback_locale)?,
            bundles: resources.bundles,
            fallback_bundles: resources.fallback_bundles,
            missing_key,
        })
    }

    /// Snapshot of the loaded bundles, for hydration.
    pub fn resources(&self) -> I18nResources {
        I18nResources {
            locale: self.locale.code().to_string(),
            fallback_locale: self.fallback.code().to_string(),
            bundles: self.bundles.clone(),
            fallback_bundles: self.fallback_bundles.clone(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Bundle loaded for `namespace` in the requested locale, if any.
    pub fn bundle(&self, namespace: Namespace) -> Option<&Bundle> {
        self.bundles.get(&namespace)
    }

    /// Translate `key` in `namespace`.
    pub fn t(&self, namespace: Namespace, key: &str) -> String {
        match self.lookup(namespace, key) {
            Some(value) => value.to_string(),
            None => self.missing(key),
        }
    }

    /// Translate `key` and substitute `{{name}}` placeholders from `vars`.
    /// Placeholders without a matching variable are left untouched.
    pub fn t_with(&self, namespace: Namespace, key: &str, vars: &[(&str, &str)]) -> String {
        match self.lookup(namespace, key) {
            Some(value) => interpolate(value, vars),
            None => self.missing(key),
        }
    }

    /// Translate a key that may carry a namespace qualifier (`about:title`).
    /// Unqualified keys use the default namespace.
    pub fn t_default(&self, key: &str) -> String {
        if let Some((ns, rest)) = key.split_once(':') {
            if let Ok(namespace) = ns.parse::<Namespace>() {
                return self.t(namespace, rest);
            }
        }
        self.t(Namespace::DEFAULT, key)
    }

    /// Lookup function bound to one namespace.
    pub fn get_fixed_t(&self, namespace: Namespace) -> FixedT<'_> {
        FixedT {
            translator: self,
            namespace,
        }
    }

    fn lookup(&self, namespace: Namespace, key: &str) -> Option<&str> {
        if let Some(value) = self.bundles.get(&namespace).and_then(|b| find(b, key)) {
            return Some(value);
        }

        let value = self
            .fallback_bundles
            .get(&namespace)
            .and_then(|b| find(b, key));
        if value.is_some() {
            TranslationMetrics::global().record_fallback_lookup();
        }
        value
    }

    fn missing(&self, key: &str) -> String {
        TranslationMetrics::global().record_missing_key();
        debug!(locale = %self.locale, key, "Missing translation key");
        match self.missing_key {
            MissingKey::ReturnKey => key.to_string(),
            MissingKey::Empty => String::new(),
        }
    }
}

/// Translator view fixed to one namespace.
#[derive(Debug, Clone, Copy)]
pub struct FixedT<'a> {
    translator: &'a Translator,
    namespace: Namespace,
}

impl FixedT<'_> {
    pub fn t(&self, key: &str) -> String {
        self.translator.t(self.namespace, key)
    }

    pub fn t_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        self.translator.t_with(self.namespace, key, vars)
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }
}

/// Resolve a key: exact (possibly dotted) key first, then a nested walk.
fn find<'a>(bundle: &'a Bundle, key: &str) -> Option<&'a str> {
    if let Some(value) = bundle.get(key).and_then(|v| v.as_str()) {
        return Some(value);
    }

    let mut parts = key.split('.');
    let mut current = bundle.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    current.as_str()
}

fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
