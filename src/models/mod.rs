// src/models/mod.rs

//! Domain models for the job watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod listing;
mod mail;
mod target;

// Re-export all public types
pub use config::{Config, CrawlerConfig, MailSettings, MissingElementPolicy};
pub use listing::JobListing;
pub use mail::MailConfig;
pub use target::{ApiTarget, HtmlTarget};
