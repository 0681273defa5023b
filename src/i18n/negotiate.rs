//! Locale negotiation from request cookies and headers.
//!
//! Everything here is total: malformed or unsupported input resolves to
//! the default locale instead of failing.

use crate::i18n::locale::Locale;

/// Pick a locale from an `Accept-Language` header value.
///
/// Only the first comma-separated entry is considered; its quality
/// parameters are ignored and the region subtag is dropped
/// ("fr-CA,en;q=0.9" -> fr). Anything unusable yields the default locale.
pub fn locale_from_accept_language(header: Option<&str>) -> Locale {
    header
        .and_then(first_language_tag)
        .and_then(Locale::normalize)
        .unwrap_or_default()
}

/// Resolve the visitor's current locale.
///
/// Preference order: locale cookie, first `Accept-Language` entry, default
/// locale. Both inputs are normalized the same way (lower-cased, region
/// stripped) and must name a supported locale to win.
pub fn current_locale(cookie: Option<&str>, accept_language: Option<&str>) -> Locale {
    if let Some(locale) = cookie.and_then(Locale::normalize) {
        return locale;
    }

    accept_language
        .and_then(first_language_tag)
        .and_then(Locale::normalize)
        .unwrap_or_default()
}

fn first_language_tag(header: &str) -> Option<&str> {
    let entry = header.split(',').next()?;
    let tag = entry.split(';').next()?.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_language_region_is_stripped() {
        assert_eq!(
            locale_from_accept_language(Some("fr-CA,en;q=0.9")),
            Locale::FRENCH
        );
    }

    #[test]
    fn test_accept_language_unsupported_falls_back() {
        assert_eq!(locale_from_accept_language(Some("xx-YY")), Locale::ENGLISH);
        assert_eq!(locale_from_accept_language(Some("de,fr")), Locale::ENGLISH);
    }

    #[test]
    fn test_accept_language_malformed_falls_back() {
        assert_eq!(locale_from_accept_language(Some("")), Locale::ENGLISH);
        assert_eq!(locale_from_accept_language(Some(",,,")), Locale::ENGLISH);
        assert_eq!(locale_from_accept_language(Some(";q=1")), Locale::ENGLISH);
        assert_eq!(locale_from_accept_language(None), Locale::ENGLISH);
    }

    #[test]
    fn test_accept_language_quality_is_ignored() {
        assert_eq!(
            locale_from_accept_language(Some("fr;q=0.8, en;q=0.9")),
            Locale::FRENCH
        );
    }

    #[test]
    fn test_accept_language_wildcard() {
        assert_eq!(locale_from_accept_language(Some("*")), Locale::ENGLISH);
    }

    #[test]
    fn test_current_locale_prefers_cookie() {
        assert_eq!(current_locale(Some("fr"), Some("en-US")), Locale::FRENCH);
    }

    #[test]
    fn test_current_locale_normalizes_cookie() {
        assert_eq!(current_locale(Some("FR-ca"), None), Locale::FRENCH);
    }

    #[test]
    fn test_current_locale_ignores_unsupported_cookie() {
        assert_eq!(current_locale(Some("de"), Some("fr-FR")), Locale::FRENCH);
    }

    #[test]
    fn test_current_locale_defaults() {
        assert_eq!(current_locale(None, None), Locale::ENGLISH);
        assert_eq!(current_locale(Some(""), Some("xx")), Locale::ENGLISH);
    }
}
