//! Locale-aware path and URL helpers.
//!
//! The default locale is never prefixed: `/about` is English, `/fr/about`
//! is French. Every (locale, path) pair has exactly one canonical form.

use crate::i18n::locale::Locale;
use crate::i18n::registry::is_supported;

/// Origin used for absolute URLs when no site origin is configured.
pub const DEFAULT_ORIGIN: &str = "https://example.com";

/// Localize a root-relative path.
///
/// `localized_path(en, "/about") == "/about"`,
/// `localized_path(fr, "/about") == "/fr/about"`,
/// `localized_path(fr, "/") == "/fr"`.
pub fn localized_path(locale: Locale, path: &str) -> String {
    if locale.is_default() {
        return path.to_string();
    }
    if path == "/" {
        format!("/{}", locale.code())
    } else {
        format!("/{}{}", locale.code(), path)
    }
}

/// Absolute URL on the default origin.
pub fn absolute_url(locale: Locale, path: &str) -> String {
    absolute_url_for(DEFAULT_ORIGIN, locale, path)
}

/// Absolute URL on a given origin. A trailing slash on the origin is ignored.
pub fn absolute_url_for(origin: &str, locale: Locale, path: &str) -> String {
    format!(
        "{}{}",
        origin.trim_end_matches('/'),
        localized_path(locale, path)
    )
}

/// Remove a leading supported-locale segment from a path.
///
/// `/fr/about` -> `/about`, `/fr` -> `/`, `/about` -> `/about`.
pub fn strip_locale(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, Some(rest)),
        None => (trimmed, None),
    };

    if first.is_empty() {
        return "/".to_string();
    }
    if !is_supported(first) {
        return path.to_string();
    }

    match rest {
        Some(rest) if !rest.is_empty() => format!("/{}", rest),
        _ => "/".to_string(),
    }
}

/// Localize a link target.
///
/// External `http://` / `https://` links are returned unchanged; relative
/// hrefs gain a leading slash before being localized.
pub fn localized_href(locale: Locale, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    if href.starts_with('/') {
        localized_path(locale, href)
    } else {
        localized_path(locale, &format!("/{}", href))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_localized_path_default_is_unprefixed() {
        assert_eq!(localized_path(Locale::ENGLISH, "/"), "/");
        assert_eq!(localized_path(Locale::ENGLISH, "/about"), "/about");
    }

    #[test]
    fn test_localized_path_non_default_is_prefixed() {
        assert_eq!(localized_path(Locale::FRENCH, "/about"), "/fr/about");
        assert_eq!(localized_path(Locale::FRENCH, "/a/b"), "/fr/a/b");
    }

    #[test]
    fn test_localized_path_root_has_no_trailing_slash() {
        assert_eq!(localized_path(Locale::FRENCH, "/"), "/fr");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url(Locale::ENGLISH, "/"),
            "https://example.com/"
        );
        assert_eq!(
            absolute_url(Locale::FRENCH, "/about"),
            "https://example.com/fr/about"
        );
    }

    #[test]
    fn test_absolute_url_for_trims_origin_slash() {
        assert_eq!(
            absolute_url_for("https://site.test/", Locale::FRENCH, "/"),
            "https://site.test/fr"
        );
    }

    #[test]
    fn test_strip_locale() {
        assert_eq!(strip_locale("/fr/about"), "/about");
        assert_eq!(strip_locale("/fr"), "/");
        assert_eq!(strip_locale("/fr/"), "/");
        assert_eq!(strip_locale("/en/a/b"), "/a/b");
        assert_eq!(strip_locale("/about"), "/about");
        assert_eq!(strip_locale("/de/about"), "/de/about");
        assert_eq!(strip_locale("/"), "/");
        assert_eq!(strip_locale(""), "/");
    }

    #[test]
    fn test_localized_href() {
        assert_eq!(localized_href(Locale::FRENCH, "/about"), "/fr/about");
        assert_eq!(localized_href(Locale::FRENCH, "about"), "/fr/about");
        assert_eq!(localized_href(Locale::ENGLISH, "about"), "/about");
        assert_eq!(
            localized_href(Locale::FRENCH, "https://nextjs.org/docs"),
            "https://nextjs.org/docs"
        );
    }

    fn path_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z0-9_-]{1,8}", 1..4).prop_map(|segments| {
            format!("/{}", segments.join("/"))
        })
    }

    proptest! {
        #[test]
        fn prop_default_locale_is_identity(path in path_strategy()) {
            prop_assert_eq!(localized_path(Locale::default_locale(), &path), path);
        }

        #[test]
        fn prop_other_locales_are_prefixed(path in path_strategy()) {
            for locale in Locale::all().into_iter().filter(|l| !l.is_default()) {
                prop_assert_eq!(
                    localized_path(locale, &path),
                    format!("/{}{}", locale.code(), path)
                );
            }
        }

        #[test]
        fn prop_strip_inverts_localize(path in path_strategy()) {
            prop_assume!(!is_supported(path.trim_start_matches('/').split('/').next().unwrap_or_default()));
            for locale in Locale::all() {
                prop_assert_eq!(strip_locale(&localized_path(locale, &path)), path.clone());
            }
        }
    }
}
