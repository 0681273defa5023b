use anyhow::Result;
use localized_site::config::Config;
use localized_site::i18n::{BundleValidator, Locale};
use localized_site::server::{create_router, AppState};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_site=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    info!(
        default_locale = %Locale::default_locale(),
        locales = Locale::all().len(),
        origin = %config.site_origin,
        "Starting localized site"
    );

    // Gaps in the bundles are not fatal: lookups fall back to the default locale
    match BundleValidator::validate_source(&config.bundle_source()).await {
        Ok(reports) => {
            for bundle in reports {
                for message in &bundle.report.errors {
                    warn!(bundle = %bundle.path(), "{}", message);
                }
                for message in &bundle.report.warnings {
                    warn!(bundle = %bundle.path(), "{}", message);
                }
            }
        }
        Err(e) => error!(error = %e, "Failed to validate translation bundles"),
    }

    let addr = config.bind_address();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!(error = %e, "Server error");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
