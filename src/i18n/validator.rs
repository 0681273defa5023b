//! Translation bundle validation.
//!
//! Every non-default locale must provide the keys of the default locale's
//! bundles, with the same interpolation placeholders. Gaps are not fatal
//! at runtime (lookups fall back), but they are reported at startup and by
//! the `check-bundles` binary.

use crate::i18n::bundles::{bundle_path, Bundle, BundleSource, LoadError};
use crate::i18n::locale::Locale;
use crate::i18n::namespace::Namespace;
use crate::i18n::translator::placeholder_regex;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Validation report containing errors and warnings about a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys or bundles the candidate is missing
    pub errors: Vec<String>,

    /// Extra keys and placeholder mismatches
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Report for one (locale, namespace) bundle.
#[derive(Debug, Clone)]
pub struct BundleReport {
    pub locale: Locale,
    pub namespace: Namespace,
    pub report: ValidationReport,
}

impl BundleReport {
    pub fn path(&self) -> String {
        bundle_path(self.locale, self.namespace)
    }
}

/// Validator comparing bundles against the default locale.
pub struct BundleValidator;

impl BundleValidator {
    /// Compare a candidate bundle against a reference bundle.
    ///
    /// - reference keys absent from the candidate are errors
    /// - candidate keys absent from the reference are warnings
    /// - differing `{{placeholder}}` sets are warnings
    pub fn validate(reference: &Bundle, candidate: &Bundle) -> ValidationReport {
        let mut report = ValidationReport::new();
        let reference = flatten(reference);
        let candidate = flatten(candidate);

        for (key, ref_value) in &reference {
            match candidate.get(key) {
                None => report.errors.push(format!("Missing key: {}", key)),
                Some(value) => {
                    let expected = placeholders(ref_value);
                    let found = placeholders(value);
                    if expected != found {
                        report.warnings.push(format!(
                            "Placeholder mismatch in {}: expected {:?}, found {:?}",
                            key, expected, found
                        ));
                    }
                }
            }
        }

        for key in candidate.keys() {
            if !reference.contains_key(key) {
                report.warnings.push(format!("Extra key: {}", key));
            }
        }

        report
    }

    /// Validate every non-default locale of a source against the default
    /// locale, namespace by namespace.
    ///
    /// A namespace without a default-locale bundle is reported once, as an
    /// error against the default locale, and its other locales are skipped.
    /// Bundles are read without recording translation metrics.
    pub async fn validate_source(source: &BundleSource) -> Result<Vec<BundleReport>, LoadError> {
        let default = Locale::default_locale();
        let mut reports = Vec::new();

        for namespace in Namespace::ALL {
            let Some(reference) = source.read(default, namespace).await? else {
                reports.push(BundleReport {
                    locale: default,
                    namespace,
                    report: missing_bundle(default, namespace),
                });
                continue;
            };

            for locale in Locale::all().into_iter().filter(|l| *l != default) {
                let report = match source.read(locale, namespace).await? {
                    Some(candidate) => Self::validate(&reference, &candidate),
                    None => missing_bundle(locale, namespace),
                };
                reports.push(BundleReport {
                    locale,
                    namespace,
                    report,
                });
            }
        }

        Ok(reports)
    }

    /// [`validate_source`](Self::validate_source) over the bundles compiled
    /// into the binary.
    pub async fn validate_embedded() -> Result<Vec<BundleReport>, LoadError> {
        Self::validate_source(&BundleSource::Embedded).await
    }
}

fn missing_bundle(locale: Locale, namespace: Namespace) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .errors
        .push(format!("Missing bundle: {}", bundle_path(locale, namespace)));
    report
}

/// Flatten nested objects into dotted keys. Non-string leaves are kept
/// as-is so they still count as present.
fn flatten(bundle: &Bundle) -> BTreeMap<String, &Value> {
    let mut out = BTreeMap::new();
    for (key, value) in bundle {
        flatten_into(key.clone(), value, &mut out);
    }
    out
}

fn flatten_into<'a>(prefix: String, value: &'a Value, out: &mut BTreeMap<String, &'a Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(format!("{}.{}", prefix, key), child, out);
            }
        }
        _ => {
            out.insert(prefix, value);
        }
    }
}

fn placeholders(value: &Value) -> BTreeSet<String> {
    value
        .as_str()
        .map(|text| {
            placeholder_regex()
                .captures_iter(text)
                .map(|cap| cap[1].to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(value: Value) -> Bundle {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_identical_bundles_are_clean() {
        let reference = bundle(json!({ "title": "About", "counter": { "label": "Counter" } }));
        let candidate = bundle(json!({ "title": "À propos", "counter": { "label": "Compteur" } }));
        assert!(BundleValidator::validate(&reference, &candidate).is_clean());
    }

    #[test]
    fn test_missing_nested_key_is_error() {
        let reference = bundle(json!({ "counter": { "label": "Counter", "increment": "+" } }));
        let candidate = bundle(json!({ "counter": { "label": "Compteur" } }));

        let report = BundleValidator::validate(&reference, &candidate);
        assert!(report.has_errors());
        assert_eq!(report.errors, vec!["Missing key: counter.increment"]);
    }

    #[test]
    fn test_extra_key_is_warning() {
        let reference = bundle(json!({ "title": "About" }));
        let candidate = bundle(json!({ "title": "À propos", "bonus": "x" }));

        let report = BundleValidator::validate(&reference, &candidate);
        assert!(!report.has_errors());
        assert_eq!(report.warnings, vec!["Extra key: bonus"]);
    }

    #[test]
    fn test_placeholder_mismatch_is_warning() {
        let reference = bundle(json!({ "value": "Current value: {{count}}" }));
        let candidate = bundle(json!({ "value": "Valeur actuelle : {{total}}" }));

        let report = BundleValidator::validate(&reference, &candidate);
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("Placeholder mismatch in value"));
    }

    #[test]
    fn test_placeholder_whitespace_is_ignored() {
        let reference = bundle(json!({ "value": "{{count}} items" }));
        let candidate = bundle(json!({ "value": "{{ count }} éléments" }));
        assert!(BundleValidator::validate(&reference, &candidate).is_clean());
    }

    #[test]
    fn test_flat_dotted_key_matches_nested() {
        let reference = bundle(json!({ "counter": { "label": "Counter" } }));
        let candidate = bundle(json!({ "counter.label": "Compteur" }));
        assert!(BundleValidator::validate(&reference, &candidate).is_clean());
    }

    #[test]
    fn test_report_default_is_clean() {
        assert!(ValidationReport::default().is_clean());
    }

    #[tokio::test]
    async fn test_shipped_bundles_are_complete() {
        let reports = BundleValidator::validate_embedded().await.unwrap();

        assert_eq!(reports.len(), Namespace::ALL.len());
        for bundle in reports {
            assert!(
                bundle.report.is_clean(),
                "{} is not clean: {:?}",
                bundle.path(),
                bundle.report
            );
        }
    }

    #[tokio::test]
    async fn test_missing_bundle_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("en")).unwrap();
        std::fs::write(dir.path().join("en/common.json"), r#"{"welcome": "Welcome"}"#).unwrap();

        let reports =
            BundleValidator::validate_source(&BundleSource::Directory(dir.path().to_path_buf()))
                .await
                .unwrap();

        let common = reports
            .iter()
            .find(|r| r.namespace == Namespace::Common)
            .unwrap();
        assert_eq!(common.report.errors, vec!["Missing bundle: fr/common.json"]);
    }

    #[tokio::test]
    async fn test_missing_default_bundle_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("fr")).unwrap();
        std::fs::write(dir.path().join("fr/home.json"), r#"{"title": "Accueil"}"#).unwrap();

        let reports =
            BundleValidator::validate_source(&BundleSource::Directory(dir.path().to_path_buf()))
                .await
                .unwrap();

        let home: Vec<_> = reports
            .iter()
            .filter(|r| r.namespace == Namespace::Home)
            .collect();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].locale, Locale::ENGLISH);
        assert_eq!(home[0].report.errors, vec!["Missing bundle: en/home.json"]);
    }
}
