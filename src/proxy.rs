//! Locale routing middleware.
//!
//! Runs before routing on every request and picks exactly one outcome:
//!
//! 1. **Bypass** internals, API routes, static assets and files with an
//!    extension.
//! 2. **Redirect** (308) default-locale-prefixed paths to their unprefixed
//!    form: `/en/about` -> `/about`.
//! 3. **Pass through** paths already prefixed with a supported locale.
//! 4. **Rewrite** unprefixed paths to the default locale internally:
//!    `/about` is served by the `/en/about` route while the browser keeps
//!    showing `/about`.
//!
//! Outcomes 2 and 4 set the locale cookie to the default locale. The cookie
//! does not change which locale serves the current request.
//!
//! Before any of these, a non-root path ending in `/` is redirected (308) to
//! the same path without it, so `/fr/` and `/about/` reach their pages.
//! When the trimmed path would itself redirect (`/en/`), that redirect is
//! issued directly.

use crate::cookie::set_locale_cookie;
use crate::i18n::{is_supported, Locale};
use axum::extract::Request;
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Path prefixes never subject to locale routing.
pub const BYPASS_PREFIXES: [&str; 3] = ["/_next", "/api", "/static"];

static PUBLIC_FILE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Routing outcome for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Leave the request alone.
    Bypass,
    /// Permanent redirect to `location` and set the default-locale cookie.
    Redirect { location: String },
    /// Path already carries a non-default locale; leave it alone.
    PassThrough,
    /// Serve `path` instead, invisibly, and set the default-locale cookie.
    Rewrite { path: String },
    /// Permanent redirect dropping a trailing slash. No cookie.
    TrimTrailingSlash { location: String },
}

/// Decide how to route a request path.
pub fn decide(path: &str) -> RouteDecision {
    if is_bypassed(path) {
        return RouteDecision::Bypass;
    }

    if path.len() > 1 && path.ends_with('/') {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        return match decide(trimmed) {
            redirect @ RouteDecision::Redirect { .. } => redirect,
            _ => RouteDecision::TrimTrailingSlash {
                location: trimmed.to_string(),
            },
        };
    }

    let default = Locale::default_locale();
    let prefix = format!("/{}", default.code());
    if let Some(rest) = strip_segment(path, &prefix) {
        let location = if rest.is_empty() { "/" } else { rest };
        return RouteDecision::Redirect {
            location: location.to_string(),
        };
    }

    if has_locale_segment(path) {
        return RouteDecision::PassThrough;
    }

    let rewritten = if path == "/" {
        prefix
    } else {
        format!("{}{}", prefix, path)
    };
    RouteDecision::Rewrite { path: rewritten }
}

/// Axum middleware applying [`decide`] to each request.
pub async fn locale_routing(mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let decision = decide(&path);

    match decision {
        RouteDecision::Bypass | RouteDecision::PassThrough => {
            debug!(%path, ?decision, "Locale routing: no action");
            next.run(request).await
        }
        RouteDecision::Redirect { location } => {
            let location = with_query(&location, request.uri().query());
            debug!(%path, %location, "Locale routing: redirecting to unprefixed path");
            let mut response = Redirect::permanent(&location).into_response();
            set_locale_cookie(response.headers_mut(), Locale::default_locale());
            response
        }
        RouteDecision::TrimTrailingSlash { location } => {
            let location = with_query(&location, request.uri().query());
            debug!(%path, %location, "Locale routing: dropping trailing slash");
            Redirect::permanent(&location).into_response()
        }
        RouteDecision::Rewrite { path: rewritten } => {
            let target = with_query(&rewritten, request.uri().query());
            match target.parse::<Uri>() {
                Ok(uri) => {
                    debug!(%path, rewritten = %target, "Locale routing: rewriting to default locale");
                    *request.uri_mut() = uri;
                }
                Err(e) => {
                    warn!(%path, error = %e, "Locale routing: rewrite target is not a valid URI");
                }
            }
            let mut response = next.run(request).await;
            set_locale_cookie(response.headers_mut(), Locale::default_locale());
            response
        }
    }
}

fn is_bypassed(path: &str) -> bool {
    if BYPASS_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return true;
    }
    let regex = PUBLIC_FILE_REGEX.get_or_init(|| Regex::new(r"\.[^/]+$").unwrap());
    regex.is_match(path)
}

/// `Some(rest)` if `path` is exactly `prefix` or starts with `prefix/`.
fn strip_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

fn has_locale_segment(path: &str) -> bool {
    let first = path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .next()
        .unwrap_or_default();
    !first.is_empty() && is_supported(first)
}

fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}
