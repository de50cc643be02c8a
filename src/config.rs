// src/config.rs

//! Configuration loading utilities.
//!
//! The config file is read and validated once at startup; mail credentials
//! come from the environment, optionally seeded from a `.env` file.

use std::env;
use std::path::Path;

use crate::error::Result;
use crate::models::{Config, MailConfig};

/// Load and validate the configuration file.
///
/// A missing or malformed file is fatal.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load(path)?;
    config.validate()?;
    log::debug!(
        "Loaded {} keywords, {} locations, {} targets from {}",
        config.keywords.len(),
        config.locations.len(),
        config.target_count(),
        path.display()
    );
    Ok(config)
}

/// Load `.env` from the working directory if one exists.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {e}"),
    }
}

/// Read the SMTP settings from the process environment.
pub fn load_mail_config() -> Result<MailConfig> {
    MailConfig::from_lookup(|name| env::var(name).ok())
}
