//! Translation metrics and observability module.
//!
//! Tracks bundle loads and lookup fallbacks so missing translations show
//! up in `/api/i18n/metrics` instead of only in rendered pages.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Translation counters. `global()` is the process-wide instance used by
/// the loader and translators.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Bundles found and parsed
    bundles_loaded: AtomicUsize,

    /// Bundles requested but absent from the source
    bundles_missing: AtomicUsize,

    /// Lookups answered by the fallback locale
    fallback_lookups: AtomicUsize,

    /// Lookups that found nothing, even in the fallback locale
    missing_keys: AtomicUsize,
}

static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    pub fn record_bundle_loaded(&self) {
        self.bundles_loaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bundle_missing(&self) {
        self.bundles_missing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_lookup(&self) {
        self.fallback_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_key(&self) {
        self.missing_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bundles_loaded(&self) -> usize {
        self.bundles_loaded.load(Ordering::Relaxed)
    }

    pub fn bundles_missing(&self) -> usize {
        self.bundles_missing.load(Ordering::Relaxed)
    }

    pub fn fallback_lookups(&self) -> usize {
        self.fallback_lookups.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let loaded = self.bundles_loaded();
        let missing = self.bundles_missing();
        let requested = loaded + missing;
        let bundle_hit_rate = if requested > 0 {
            (loaded as f64 / requested as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            bundles_loaded: loaded,
            bundles_missing: missing,
            bundle_hit_rate,
            fallback_lookups: self.fallback_lookups(),
            missing_keys: self.missing_keys(),
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub bundles_loaded: usize,

    pub bundles_missing: usize,

    /// Loaded bundles as a percentage of requested bundles (0-100)
    pub bundle_hit_rate: f64,

    pub fallback_lookups: usize,

    pub missing_keys: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_zero() {
        let metrics = TranslationMetrics::new();
        let report = metrics.report();

        assert_eq!(report.bundles_loaded, 0);
        assert_eq!(report.bundles_missing, 0);
        assert_eq!(report.bundle_hit_rate, 0.0);
        assert_eq!(report.fallback_lookups, 0);
        assert_eq!(report.missing_keys, 0);
    }

    #[test]
    fn test_record_counters() {
        let metrics = TranslationMetrics::new();

        metrics.record_bundle_loaded();
        metrics.record_bundle_loaded();
        metrics.record_bundle_missing();
        metrics.record_fallback_lookup();
        metrics.record_missing_key();
        metrics.record_missing_key();

        assert_eq!(metrics.bundles_loaded(), 2);
        assert_eq!(metrics.bundles_missing(), 1);
        assert_eq!(metrics.fallback_lookups(), 1);
        assert_eq!(metrics.missing_keys(), 2);
    }

    #[test]
    fn test_report_bundle_hit_rate() {
        let metrics = TranslationMetrics::new();

        // 3 loaded, 1 missing = 75%
        metrics.record_bundle_loaded();
        metrics.record_bundle_loaded();
        metrics.record_bundle_loaded();
        metrics.record_bundle_missing();

        assert_eq!(metrics.report().bundle_hit_rate, 75.0);
    }

    #[test]
    fn test_report_all_missing() {
        let metrics = TranslationMetrics::new();
        metrics.record_bundle_missing();
        assert_eq!(metrics.report().bundle_hit_rate, 0.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::new();
        metrics.record_missing_key();
        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["missing_keys"], 1);
    }

    #[test]
    fn test_global_returns_same_instance() {
        let metrics1 = TranslationMetrics::global();
        let metrics2 = TranslationMetrics::global();
        assert!(std::ptr::eq(metrics1, metrics2));
    }

    #[test]
    fn test_global_counts_are_monotonic() {
        let metrics = TranslationMetrics::global();
        let initial = metrics.missing_keys();
        metrics.record_missing_key();
        assert!(metrics.missing_keys() > initial);
    }
}
