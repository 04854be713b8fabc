//! # configs
//!
//! Layered runtime settings for Rusty-Stay: built-in defaults, then an
//! optional `config/stay.toml`, then `STAY_*` environment variables
//! (`__` separates nesting, e.g. `STAY_PRICING__POLICY=per-stay`).

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct PricingSettings {
    /// Total-price convention: "per-guest" (default) or "per-stay".
    pub policy: String,
}

/// Bootstrap identity created by the seed binary.
#[derive(Debug, Deserialize)]
pub struct SeedSettings {
    pub admin_email: String,
    pub admin_password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log: LogSettings,
    pub pricing: PricingSettings,
    pub seed: SeedSettings,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        let config = Config::builder()
            .set_default("log.filter", "info")?
            .set_default("pricing.policy", "per-guest")?
            .set_default("seed.admin_email", "admin@rusty-stay.local")?
            .set_default("seed.admin_password", "change-me-please")?
            .add_source(File::with_name("config/stay").required(false))
            .add_source(Environment::with_prefix("STAY").separator("__"))
            .build()?;
        let settings: Settings = config.try_deserialize()?;
        debug!(filter = %settings.log.filter, policy = %settings.pricing.policy, "settings loaded");
        Ok(settings)
    }
}
