//! Internationalization (i18n) module.
//!
//! All locale-related logic lives here: the supported locale table, path
//! localization, locale negotiation, translation bundles and lookup.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for supported locales and the default
//! - `locale`: validated `Locale` type
//! - `path`: localized paths and absolute URLs
//! - `negotiate`: cookie / `Accept-Language` resolution
//! - `namespace`: translation namespaces
//! - `bundles`: where bundle JSON comes from (embedded or a directory)
//! - `translator`: per-request loading and lookup with fallback
//! - `validator`: bundle completeness checks
//! - `metrics`: translation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use localized_site::i18n::{localized_path, Locale, Namespace, TranslationLoader};
//!
//! let fr = Locale::from_code("fr")?;
//! assert_eq!(localized_path(fr, "/about"), "/fr/about");
//!
//! let t = loader.load(fr, &[Namespace::Common, Namespace::About]).await?;
//! let about = t.get_fixed_t(Namespace::About);
//! let title = about.t("title");
//! ```

mod bundles;
mod locale;
mod metrics;
mod namespace;
mod negotiate;
mod path;
mod registry;
mod translator;
mod validator;

pub use bundles::{bundle_path, embedded_pairs, Bundle, BundleSource, LoadError};
pub use locale::{Locale, LocaleError};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use namespace::Namespace;
pub use negotiate::{current_locale, locale_from_accept_language};
pub use path::{
    absolute_url, absolute_url_for, localized_href, localized_path, strip_locale, DEFAULT_ORIGIN,
};
pub use registry::{is_rtl, is_supported, Direction, LocaleConfig, LocaleRegistry};
pub use translator::{FixedT, I18nResources, MissingKey, TranslationLoader, Translator};
pub use validator::{BundleReport, BundleValidator, ValidationReport};
