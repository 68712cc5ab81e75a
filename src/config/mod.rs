//! Configuration management for the exchange rate fetcher.
//!
//! Loads settings from environment variables and an optional config file.
//! Every setting has a default, so running without any configuration targets
//! the public NBP API and `invoice-data.toml` in the working directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// NBP rate service settings
    #[serde(default)]
    pub nbp: NbpConfig,
    /// Date walk-back settings
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Invoice data file settings
    #[serde(default)]
    pub invoice: InvoiceConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NbpConfig {
    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// NBP rate table (a, b or c); mid rates live in tables a and b
    #[serde(default = "default_table")]
    pub table: String,
    /// ISO 4217 code of the quoted currency
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// How many consecutive days to try before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceConfig {
    #[serde(default = "default_invoice_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Also write logs to a daily rolling file in this directory
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.nbp.pl/api".to_string()
}

fn default_table() -> String {
    "a".to_string()
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    crate::resolver::DEFAULT_MAX_ATTEMPTS
}

fn default_invoice_path() -> PathBuf {
    PathBuf::from(crate::invoice::DEFAULT_INVOICE_FILE)
}

/// `FXR__SECTION__KEY` environment overrides, e.g. `FXR__RESOLVER__MAX_ATTEMPTS=3`.
fn env_source() -> config::Environment {
    config::Environment::default()
        .prefix("FXR")
        .separator("__")
        .try_parsing(true)
}

impl AppConfig {
    /// Load configuration from environment variables and config files.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("fetch-exchange-rate").required(false))
            .add_source(env_source())
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.nbp.base_url.trim().is_empty(),
            "nbp.base_url must not be empty"
        );

        anyhow::ensure!(
            matches!(self.nbp.table.to_lowercase().as_str(), "a" | "b" | "c"),
            "nbp.table must be one of a, b or c"
        );

        anyhow::ensure!(
            self.nbp.currency.len() == 3
                && self.nbp.currency.chars().all(|c| c.is_ascii_alphabetic()),
            "nbp.currency must be a 3-letter currency code"
        );

        anyhow::ensure!(self.nbp.timeout_secs >= 1, "nbp.timeout_secs must be >= 1");

        anyhow::ensure!(
            self.resolver.max_attempts >= 1,
            "resolver.max_attempts must be >= 1"
        );

        Ok(())
    }
}

impl Default for NbpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            table: default_table(),
            currency: default_currency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            path: default_invoice_path(),
        }
    }
}
