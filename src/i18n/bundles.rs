//! Translation bundle sources.
//!
//! A bundle is the JSON object for one (locale, namespace) pair, stored as
//! `<locale>/<namespace>.json`. The embedded source compiles the `locales/`
//! tree into the binary so the set of loadable bundles is fixed at build
//! time; the directory source reads the same layout from disk.

use crate::i18n::locale::Locale;
use crate::i18n::metrics::TranslationMetrics;
use crate::i18n::namespace::Namespace;
use rust_embed::RustEmbed;
use serde_json::{Map, Value};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Key -> value mapping of one bundle. Values are strings or nested objects.
pub type Bundle = Map<String, Value>;

#[derive(RustEmbed)]
#[folder = "locales/"]
struct EmbeddedLocales;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read bundle {locale}/{namespace}: {source}")]
    Io {
        locale: Locale,
        namespace: Namespace,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in bundle {locale}/{namespace}: {source}")]
    Parse {
        locale: Locale,
        namespace: Namespace,
        #[source]
        source: serde_json::Error,
    },

    #[error("bundle {locale}/{namespace} is not a JSON object")]
    NotAnObject { locale: Locale, namespace: Namespace },
}

/// Where bundles are read from.
#[derive(Debug, Clone, Default)]
pub enum BundleSource {
    /// Bundles compiled into the binary from `locales/`.
    #[default]
    Embedded,
    /// Bundles read at request time from `<root>/<locale>/<namespace>.json`.
    Directory(PathBuf),
}

impl BundleSource {
    /// Load one bundle for serving, recording it in the global
    /// [`TranslationMetrics`].
    ///
    /// # Returns
    /// * `Ok(Some(bundle))` when the bundle exists and parses
    /// * `Ok(None)` when the source has no file for this pair
    /// * `Err(LoadError)` on I/O or parse failures
    pub async fn load(
        &self,
        locale: Locale,
        namespace: Namespace,
    ) -> Result<Option<Bundle>, LoadError> {
        self.load_recorded(locale, namespace, TranslationMetrics::global())
            .await
    }

    /// [`load`](Self::load) recording into `metrics`.
    pub async fn load_recorded(
        &self,
        locale: Locale,
        namespace: Namespace,
        metrics: &TranslationMetrics,
    ) -> Result<Option<Bundle>, LoadError> {
        match self.read(locale, namespace).await? {
            Some(bundle) => {
                metrics.record_bundle_loaded();
                debug!(%locale, %namespace, keys = bundle.len(), "Loaded translation bundle");
                Ok(Some(bundle))
            }
            None => {
                metrics.record_bundle_missing();
                warn!(%locale, %namespace, "Translation bundle not found");
                Ok(None)
            }
        }
    }

    /// Same as [`load`](Self::load) without touching metrics or logging.
    /// Used by offline checks.
    pub async fn read(
        &self,
        locale: Locale,
        namespace: Namespace,
    ) -> Result<Option<Bundle>, LoadError> {
        let raw = match self {
            BundleSource::Embedded => {
                EmbeddedLocales::get(&bundle_path(locale, namespace)).map(|file| file.data.into_owned())
            }
            BundleSource::Directory(root) => {
                let path = root.join(locale.code()).join(format!("{}.json", namespace));
                match tokio::fs::read(&path).await {
                    Ok(bytes) => Some(bytes),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                    Err(source) => {
                        return Err(LoadError::Io {
                            locale,
                            namespace,
                            source,
                        })
                    }
                }
            }
        };

        raw.map(|raw| parse_bundle(locale, namespace, &raw)).transpose()
    }
}

/// Relative path of a bundle inside a locales tree.
pub fn bundle_path(locale: Locale, namespace: Namespace) -> String {
    format!("{}/{}.json", locale.code(), namespace.as_str())
}

/// Every (locale, namespace) pair compiled into the binary.
///
/// Files that do not match a supported locale or a known namespace are
/// ignored.
pub fn embedded_pairs() -> Vec<(Locale, Namespace)> {
    let mut pairs: Vec<_> = EmbeddedLocales::iter()
        .filter_map(|file| {
            let (locale, file_name) = file.split_once('/')?;
            let namespace: Namespace = file_name.strip_suffix(".json")?.parse().ok()?;
            let locale = Locale::from_code(locale).ok()?;
            Some((locale, namespace))
        })
        .collect();
    pairs.sort_by_key(|(locale, namespace)| (locale.code(), *namespace));
    pairs
}

fn parse_bundle(locale: Locale, namespace: Namespace, raw: &[u8]) -> Result<Bundle, LoadError> {
    let value: Value = serde_json::from_slice(raw).map_err(|source| LoadError::Parse {
        locale,
        namespace,
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAnObject { locale, namespace }),
    }
}
