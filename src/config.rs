//! Settings for the scrape source and the target database.
//!
//! Everything is defaulted except the database URL, which must come from
//! the config file, falling back to the `NGX_DATABASE_URL` /
//! `DATABASE_URL` environment variables. The environment is read here and
//! nowhere else; the rest of the crate only ever sees the resulting
//! structs.

use std::{env, fs, path::Path};

use serde::Deserialize;
use url::Url;

use crate::error::EtlError;

/// Top-level settings, loadable from a YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
}

/// Where the price-list page lives and how long to wait for it to render.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSettings {
    /// Page that renders the daily equities price list.
    #[serde(default = "default_source_url")]
    pub url: String,
    /// DOM id of the price table on the rendered page.
    #[serde(default = "default_table_id")]
    pub table_id: String,
    /// Bounded wait for the table to appear, in seconds.
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
}

/// Target Postgres connection and table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL.
    #[serde(default)]
    pub url: String,
    /// Table the daily rows are replaced into.
    #[serde(default = "default_table")]
    pub table: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_source_url() -> String {
    "https://ngxgroup.com/exchange/data/equities-price-list/".to_string()
}

fn default_table_id() -> String {
    "latestdiclosuresEquities".to_string()
}

fn default_wait_secs() -> u64 {
    20
}

fn default_table() -> String {
    "equity_prices".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            table_id: default_table_id(),
            wait_secs: default_wait_secs(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            table: default_table(),
            max_connections: default_max_connections(),
        }
    }
}

impl Settings {
    /// Load settings from an optional YAML file, falling back to the
    /// environment for the database URL.
    pub fn load(path: Option<&Path>) -> Result<Self, EtlError> {
        let mut settings = match path {
            Some(p) => {
                let text = fs::read_to_string(p)
                    .map_err(|e| EtlError::Config(format!("reading {}: {}", p.display(), e)))?;
                serde_yaml::from_str(&text)
                    .map_err(|e| EtlError::Config(format!("parsing {}: {}", p.display(), e)))?
            }
            None => Settings::default(),
        };

        if settings.database.url.is_empty() {
            if let Ok(url) = env::var("NGX_DATABASE_URL").or_else(|_| env::var("DATABASE_URL")) {
                settings.database.url = url;
            }
        }
        if settings.database.url.is_empty() {
            return Err(EtlError::Config(
                "database url not set (database.url in config, or NGX_DATABASE_URL / DATABASE_URL)"
                    .to_string(),
            ));
        }
        Url::parse(&settings.source.url).map_err(|e| {
            EtlError::Config(format!("invalid source url {:?}: {}", settings.source.url, e))
        })?;

        Ok(settings)
    }
}
