//! Locale cookie handling and the current-locale extractor.

use crate::i18n::{current_locale, Locale};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue};
use std::convert::Infallible;
use tracing::warn;

/// Name of the cookie storing the visitor's locale preference.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// Read the raw locale cookie value from request headers.
///
/// All `Cookie` headers are searched; the first `NEXT_LOCALE` wins.
pub fn read_locale_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            if name == LOCALE_COOKIE {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
}

/// `Set-Cookie` value storing `locale`, valid for the whole site.
pub fn locale_cookie(locale: Locale) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; SameSite=Lax",
        LOCALE_COOKIE,
        locale.code()
    ))
}

/// Append the locale cookie to response headers. A locale whose code cannot
/// be sent in a header leaves the response without the cookie.
pub fn set_locale_cookie(headers: &mut HeaderMap, locale: Locale) {
    match locale_cookie(locale) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => warn!(%locale, error = %e, "Locale cookie is not a valid header value"),
    }
}

/// Locale resolved from the request's cookie and `Accept-Language` header.
///
/// Never rejects: unsupported or malformed input resolves to the default
/// locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentLocale(pub Locale);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentLocale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = read_locale_cookie(&parts.headers);
        let accept_language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        Ok(CurrentLocale(current_locale(cookie.as_deref(), accept_language)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(cookie));
        headers
    }

    #[test]
    fn test_read_locale_cookie() {
        let headers = headers_with_cookie("theme=dark; NEXT_LOCALE=fr; other=1");
        assert_eq!(read_locale_cookie(&headers), Some("fr".to_string()));
    }

    #[test]
    fn test_read_locale_cookie_absent() {
        assert_eq!(read_locale_cookie(&headers_with_cookie("theme=dark")), None);
        assert_eq!(read_locale_cookie(&HeaderMap::new()), None);
    }

    #[test]
    fn test_read_locale_cookie_requires_exact_name() {
        let headers = headers_with_cookie("XNEXT_LOCALE=fr; NEXT_LOCALE_OLD=fr");
        assert_eq!(read_locale_cookie(&headers), None);
    }

    #[test]
    fn test_read_locale_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("NEXT_LOCALE=fr"));
        assert_eq!(read_locale_cookie(&headers), Some("fr".to_string()));
    }

    #[test]
    fn test_locale_cookie_value() {
        assert_eq!(
            locale_cookie(Locale::FRENCH).unwrap(),
            "NEXT_LOCALE=fr; Path=/; SameSite=Lax"
        );
    }

    #[test]
    fn test_locale_cookie_carries_each_locale() {
        for locale in Locale::all() {
            let value = locale_cookie(locale).unwrap();
            let expected = format!("NEXT_LOCALE={}; Path=/; SameSite=Lax", locale.code());
            assert_eq!(value.to_str().unwrap(), expected);
        }
    }

    #[test]
    fn test_set_locale_cookie_appends() {
        let mut headers = HeaderMap::new();
        headers.insert(SET_COOKIE, HeaderValue::from_static("session=1"));
        set_locale_cookie(&mut headers, Locale::ENGLISH);
        assert_eq!(headers.get_all(SET_COOKIE).iter().count(), 2);
    }

    #[tokio::test]
    async fn test_current_locale_extractor() {
        let request = axum::http::Request::builder()
            .header(COOKIE, "NEXT_LOCALE=de")
            .header(ACCEPT_LANGUAGE, "fr-CA,en;q=0.9")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let CurrentLocale(locale) = CurrentLocale::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(locale, Locale::FRENCH);
    }
}
