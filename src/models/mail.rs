// src/models/mail.rs

//! SMTP credentials and addressing.

use std::fmt;

use crate::error::{AppError, Result};

/// SMTP settings for the notification mail.
///
/// Built once at startup from the `MAIL_*` environment variables.
#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    /// Sender address, also used as the SMTP login
    pub sender: String,
    /// Single recipient address
    pub recipient: String,
    /// SMTP relay host
    pub host: String,
    /// SMTP port (STARTTLS)
    pub port: u16,
    /// SMTP password
    pub password: String,
}

impl MailConfig {
    pub const SENDER: &'static str = "MAIL_SENDER";
    pub const RECIPIENT: &'static str = "MAIL_RECIPIENT";
    pub const HOST: &'static str = "MAIL_HOST";
    pub const PORT: &'static str = "MAIL_PORT";
    pub const PASSWORD: &'static str = "MAIL_PASSWORD";

    /// Build the config from a variable lookup, failing on the first missing
    /// or empty variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(AppError::MissingEnv(name))
        };

        let sender = require(Self::SENDER)?;
        let recipient = require(Self::RECIPIENT)?;
        let host = require(Self::HOST)?;
        let port = require(Self::PORT)?;
        let port = port.trim().parse::<u16>().map_err(|e| {
            AppError::config(format!("{} must be a port number: {e}", Self::PORT))
        })?;
        let password = require(Self::PASSWORD)?;

        Ok(Self {
            sender,
            recipient,
            host,
            port,
            password,
        })
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .finish()
    }
}
