use crate::i18n::{BundleSource, MissingKey, DEFAULT_ORIGIN};
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Absolute URLs (sitemap, robots, canonical links)
    pub site_origin: String,

    // Translations
    pub locales_dir: Option<PathBuf>,
    pub missing_key: MissingKey,

    // Static assets served under /static
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: match std::env::var("PORT") {
                Ok(port) => port.parse().context("PORT must be a valid port number")?,
                Err(_) => 3000,
            },

            site_origin: std::env::var("SITE_ORIGIN")
                .map(|origin| origin.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_ORIGIN.to_string()),

            // Unset means bundles compiled into the binary
            locales_dir: std::env::var("LOCALES_DIR").ok().map(PathBuf::from),
            missing_key: match std::env::var("MISSING_KEY") {
                Ok(value) => value
                    .parse()
                    .map_err(|e: String| anyhow!(e))
                    .context("MISSING_KEY is invalid")?,
                Err(_) => MissingKey::default(),
            },

            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
        })
    }

    /// Where translation bundles are read from.
    pub fn bundle_source(&self) -> BundleSource {
        match &self.locales_dir {
            Some(dir) => BundleSource::Directory(dir.clone()),
            None => BundleSource::Embedded,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            site_origin: DEFAULT_ORIGIN.to_string(),
            locales_dir: None,
            missing_key: MissingKey::default(),
            static_dir: PathBuf::from("public"),
        }
    }
}
