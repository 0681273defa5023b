//! HTTP surface: application state, router assembly and the non-page
//! handlers (SEO files, locale API, translation metrics).

use crate::config::Config;
use crate::cookie::{set_locale_cookie, CurrentLocale};
use crate::error::AppError;
use crate::i18n::{
    localized_path, strip_locale, Locale, MetricsReport, TranslationLoader, TranslationMetrics,
};
use crate::{pages, proxy, seo};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub loader: Arc<TranslationLoader>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let loader = TranslationLoader::new(config.bundle_source(), config.missing_key);
        Self {
            config: Arc::new(config),
            loader: Arc::new(loader),
        }
    }
}

/// Build the application router.
///
/// Locale routing has to run before route matching so that rewritten
/// paths reach the right handler, so the routes live in an inner router
/// served as the fallback of an outer one carrying the middleware.
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    let routes = Router::new()
        .route("/:locale", get(pages::home))
        .route("/:locale/about", get(pages::about))
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap))
        .route("/api/locale", get(get_locale).post(set_locale))
        .route("/api/i18n/metrics", get(metrics))
        .nest_service("/static", static_files)
        .fallback(pages::not_found)
        .with_state(state);

    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn(proxy::locale_routing))
        .layer(TraceLayer::new_for_http())
}

async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    let body = seo::robots(&state.config.site_origin).render();
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

async fn sitemap(State(state): State<AppState>) -> Result<Response, AppError> {
    let entries = seo::sitemap_entries(&state.config.site_origin, Utc::now());
    let xml = seo::render_sitemap(&entries)?;
    Ok(([(CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocaleResponse {
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetLocaleRequest {
    pub locale: String,
    /// Page the visitor is on; defaults to the home page.
    pub path: Option<String>,
}

/// `GET /api/locale`: locale resolved from cookie and `Accept-Language`.
async fn get_locale(CurrentLocale(locale): CurrentLocale) -> Json<LocaleResponse> {
    Json(LocaleResponse {
        locale: locale.code().to_string(),
        href: None,
    })
}

/// `POST /api/locale`: store the visitor's choice and tell the client where
/// the current page lives in that locale.
async fn set_locale(Json(request): Json<SetLocaleRequest>) -> Result<Response, AppError> {
    let locale = Locale::from_code(&request.locale)?;
    let base = strip_locale(request.path.as_deref().unwrap_or("/"));
    let href = localized_path(locale, &base);

    info!(locale = %locale, %href, "Locale preference updated");

    let mut response = Json(LocaleResponse {
        locale: locale.code().to_string(),
        href: Some(href),
    })
    .into_response();
    set_locale_cookie(response.headers_mut(), locale);
    Ok(response)
}

async fn metrics() -> Json<MetricsReport> {
    Json(TranslationMetrics::global().report())
}
