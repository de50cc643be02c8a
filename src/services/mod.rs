// src/services/mod.rs

//! Service layer for the job watcher.
//!
//! This module contains the side-effecting stages:
//! - Career page scraping (`HtmlCollector`)
//! - Job API calls (`ApiCollector`)
//! - Mail notification (`Notifier`)

mod api;
mod html;
mod notifier;

pub use api::{ApiCollector, ApiPayload};
pub use html::HtmlCollector;
pub use notifier::{Email, Mailer, Notifier, SmtpMailer, compose_body};

#[cfg(test)]
pub(crate) use notifier::testing;
