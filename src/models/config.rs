// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ApiTarget, HtmlTarget};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Title keywords; a listing matches if any is a substring of its title
    pub keywords: Vec<String>,

    /// Locations; a listing matches if any is a substring of its location
    pub locations: Vec<String>,

    /// Career pages scraped as HTML, keyed by employer name
    #[serde(default)]
    pub soup_targets: IndexMap<String, HtmlTarget>,

    /// JSON job APIs, keyed by employer name
    #[serde(default)]
    pub api_targets: IndexMap<String, ApiTarget>,

    /// HTTP and scraping behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Notification settings
    #[serde(default)]
    pub mail: MailSettings,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Number of configured targets across both kinds.
    pub fn target_count(&self) -> usize {
        self.soup_targets.len() + self.api_targets.len()
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.mail.subject.trim().is_empty() {
            return Err(AppError::validation("mail.subject is empty"));
        }

        for (employer, target) in &self.soup_targets {
            Url::parse(&target.url).map_err(|e| {
                AppError::validation(format!("soup_targets.{employer}.url: {e}"))
            })?;
            for (field, value) in [
                ("job_selector_tag", &target.job_selector_tag),
                ("title_selector_tag", &target.title_selector_tag),
                ("location_selector_tag", &target.location_selector_tag),
            ] {
                if value.trim().is_empty() {
                    return Err(AppError::validation(format!(
                        "soup_targets.{employer}.{field} is empty"
                    )));
                }
            }
        }

        for (employer, target) in &self.api_targets {
            Url::parse(&target.url).map_err(|e| {
                AppError::validation(format!("api_targets.{employer}.url: {e}"))
            })?;
            for (field, value) in [("title", &target.title), ("location", &target.location)] {
                if value.trim().is_empty() {
                    return Err(AppError::validation(format!(
                        "api_targets.{employer}.{field} is empty"
                    )));
                }
            }
        }

        if self.keywords.is_empty() {
            log::warn!("No keywords configured; every listing will be filtered out");
        }
        if self.locations.is_empty() {
            log::warn!("No locations configured; every listing will be filtered out");
        }
        Ok(())
    }
}

/// HTTP client and scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// What to do when a listing on a career page lacks an element
    #[serde(default)]
    pub missing_element: MissingElementPolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            missing_element: MissingElementPolicy::default(),
        }
    }
}

/// Handling of a listing container whose title, location or link is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingElementPolicy {
    /// Fail the whole run
    #[default]
    Abort,
    /// Drop the listing with a warning and continue
    Skip,
}

/// Notification message settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailSettings {
    /// Subject line of the notification mail
    #[serde(default = "defaults::subject")]
    pub subject: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            subject: defaults::subject(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jobwatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn subject() -> String {
        "New MLE Job Openings".into()
    }
}
