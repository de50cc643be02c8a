// src/error.rs

//! Unified error handling for the job watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for job watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required environment variable is unset or empty
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    /// A listing on a career page lacks an expected element
    #[error("Scrape error for {employer}: no element matching {element}")]
    MissingElement { employer: String, element: String },

    /// An API response did not have the configured shape
    #[error("Unexpected response for {context}: {message}")]
    Response { context: String, message: String },

    /// Mail address could not be parsed
    #[error("Mail address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Mail message could not be built
    #[error("Mail message error: {0}")]
    Email(#[from] lettre::error::Error),

    /// SMTP session failed
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a missing element error for an employer's page.
    pub fn missing_element(employer: impl Into<String>, element: impl fmt::Display) -> Self {
        Self::MissingElement {
            employer: employer.into(),
            element: element.to_string(),
        }
    }

    /// Create a response shape error with context.
    pub fn response(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Response {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
