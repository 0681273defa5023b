//! Bundle checker - compares every locale's translation bundles against the
//! default locale and prints missing keys, extra keys and placeholder
//! mismatches.
//!
//! Usage:
//!   cargo run --bin check-bundles                      # Check the embedded bundles
//!   cargo run --bin check-bundles -- --dir locales     # Check bundles on disk
//!   cargo run --bin check-bundles -- --strict          # Fail on warnings too
//!
//! Optional:
//! - LOCALES_DIR (same as --dir)
//!
//! Exits non-zero when any bundle has errors (or warnings with --strict).

use anyhow::{Context, Result};
use localized_site::i18n::{BundleSource, BundleValidator};
use std::path::PathBuf;
use tracing::info;

fn source_from_args(args: &[String]) -> Result<BundleSource> {
    if let Some(index) = args.iter().position(|arg| arg == "--dir") {
        let dir = args.get(index + 1).context("--dir requires a path")?;
        return Ok(BundleSource::Directory(PathBuf::from(dir)));
    }
    Ok(match std::env::var("LOCALES_DIR") {
        Ok(dir) => BundleSource::Directory(PathBuf::from(dir)),
        Err(_) => BundleSource::Embedded,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_site=info".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let strict = args.iter().any(|arg| arg == "--strict");
    let source = source_from_args(&args)?;

    info!(?source, "Checking translation bundles");
    let reports = BundleValidator::validate_source(&source)
        .await
        .context("Failed to load translation bundles")?;

    let mut errors = 0;
    let mut warnings = 0;

    for bundle in &reports {
        if bundle.report.is_clean() {
            println!("ok      {}", bundle.path());
            continue;
        }
        for message in &bundle.report.errors {
            println!("error   {}: {}", bundle.path(), message);
        }
        for message in &bundle.report.warnings {
            println!("warning {}: {}", bundle.path(), message);
        }
        errors += bundle.report.errors.len();
        warnings += bundle.report.warnings.len();
    }

    println!(
        "\n{} bundles checked, {} errors, {} warnings",
        reports.len(),
        errors,
        warnings
    );

    if errors > 0 || (strict && warnings > 0) {
        std::process::exit(1);
    }
    Ok(())
}
