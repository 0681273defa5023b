//! Server-rendered pages.
//!
//! Each handler loads only the namespaces it needs, renders with the
//! resolved strings, and embeds the loaded bundles in the page so client
//! code can build an identical translator without fetching again.

use crate::cookie::CurrentLocale;
use crate::error::AppError;
use crate::i18n::{localized_href, localized_path, strip_locale, Locale, Namespace, Translator};
use crate::seo::{page_alternates, Alternate};
use crate::server::AppState;
use askama::Template;
use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

const DOCUMENTATION_URL: &str = "https://docs.rs/axum";

/// One entry of the locale switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherLink {
    pub code: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Switcher entries for the page at `path` (prefixed or not), pointing at
/// the same page in every locale.
pub fn switcher_links(active: Locale, path: &str) -> Vec<SwitcherLink> {
    let base = strip_locale(path);
    Locale::all()
        .into_iter()
        .map(|locale| SwitcherLink {
            code: locale.code(),
            label: locale.native_name(),
            href: localized_path(locale, &base),
            active: locale == active,
        })
        .collect()
}

/// Data shared by every page through `base.html`.
#[derive(Debug, Clone)]
pub struct Layout {
    pub lang: &'static str,
    pub dir: &'static str,
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub alternates: Vec<Alternate>,
    pub switcher: Vec<SwitcherLink>,
    pub switcher_label: String,
    pub resources_json: String,
}

impl Layout {
    /// `path` may carry a locale prefix; canonical, alternate and switcher
    /// links are built from the unprefixed page. `page_title` is rendered
    /// through the site title template ("About | Localized Site").
    pub fn new(
        origin: &str,
        t: &Translator,
        path: &str,
        page_title: &str,
        description: String,
    ) -> Result<Self, AppError> {
        let locale = t.locale();
        let common = t.get_fixed_t(Namespace::Common);
        let page = page_alternates(origin, locale, &strip_locale(path));

        Ok(Self {
            lang: locale.code(),
            dir: locale.direction().as_str(),
            title: format!("{} | {}", page_title, common.t("site.title")),
            description,
            canonical: page.canonical,
            alternates: page.alternates,
            switcher: switcher_links(locale, path),
            switcher_label: common.t("nav.languageSelector"),
            resources_json: script_json(&serde_json::to_string(&t.resources())?),
        })
    }
}

/// Make JSON safe to embed inside a `<script>` element.
fn script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub layout: Layout,
    pub welcome: String,
    pub greeting: String,
    pub about_href: String,
    pub about_label: String,
    pub docs_href: String,
    pub docs_label: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub layout: Layout,
    pub title: String,
    pub description: String,
    pub back_href: String,
    pub back_label: String,
    pub server_section: String,
    pub counter_label: String,
    pub counter_value: String,
    pub server_rendered: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub layout: Layout,
    pub heading: String,
    pub message: String,
    pub home_href: String,
    pub home_label: String,
}

/// Resolve the `:locale` route segment. Unknown locales are 404s: every
/// servable locale is known at build time.
fn route_locale(segment: &str) -> Result<Locale, AppError> {
    Locale::from_code(segment).map_err(|_| AppError::NotFound)
}

/// `/:locale`
pub async fn home(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Html<String>, AppError> {
    let locale = route_locale(&locale)?;
    let t = state
        .loader
        .load(locale, &[Namespace::Common, Namespace::Home])
        .await?;
    let home = t.get_fixed_t(Namespace::Home);

    let page = HomePage {
        layout: Layout::new(
            &state.config.site_origin,
            &t,
            "/",
            &home.t("title"),
            home.t("description"),
        )?,
        welcome: home.t("welcome"),
        greeting: home.t("greeting"),
        about_href: localized_href(locale, "/about"),
        about_label: home.t("aboutPage"),
        docs_href: localized_href(locale, DOCUMENTATION_URL),
        docs_label: home.t("documentation"),
    };

    Ok(Html(page.render()?))
}

/// `/:locale/about`
pub async fn about(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Html<String>, AppError> {
    let locale = route_locale(&locale)?;
    let t = state
        .loader
        .load(locale, &[Namespace::Common, Namespace::About])
        .await?;
    let about = t.get_fixed_t(Namespace::About);
    let common = t.get_fixed_t(Namespace::Common);
    let count = 0.to_string();

    let page = AboutPage {
        layout: Layout::new(
            &state.config.site_origin,
            &t,
            "/about",
            &about.t("title"),
            about.t("description"),
        )?,
        title: about.t("title"),
        description: about.t("description"),
        back_href: localized_href(locale, "/"),
        back_label: common.t("nav.home"),
        server_section: about.t("serverSection"),
        counter_label: about.t("counter.label"),
        counter_value: about.t_with("counter.value", &[("count", count.as_str())]),
        server_rendered: about.t("serverRendered"),
    };

    Ok(Html(page.render()?))
}

/// Locale a 404 page is rendered in: the path's locale segment when it names
/// a supported locale, the visitor's current locale otherwise.
fn not_found_locale(path: &str, current: Locale) -> Locale {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|segment| Locale::from_code(segment).ok())
        .unwrap_or(current)
}

/// Fallback for unmatched routes. Unknown API routes get the JSON error
/// body instead of a page.
pub async fn not_found(
    State(state): State<AppState>,
    CurrentLocale(current): CurrentLocale,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        return Err(AppError::NotFound);
    }

    let locale = not_found_locale(uri.path(), current);
    let t = state.loader.load(locale, &[Namespace::Common]).await?;
    let common = t.get_fixed_t(Namespace::Common);

    let page = NotFoundPage {
        layout: Layout::new(
            &state.config.site_origin,
            &t,
            uri.path(),
            &common.t("notFound.title"),
            common.t("notFound.message"),
        )?,
        heading: common.t("notFound.title"),
        message: common.t("notFound.message"),
        home_href: localized_href(locale, "/"),
        home_label: common.t("nav.home"),
    };

    Ok((StatusCode::NOT_FOUND, Html(page.render()?)).into_response())
}
