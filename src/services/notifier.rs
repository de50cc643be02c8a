// src/services/notifier.rs

//! New-listing notification by mail.
//!
//! `Notifier` composes the message; delivery goes through a `Mailer`, which
//! is `SmtpMailer` in production.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::Result;
use crate::models::{JobListing, MailConfig};

/// A plain-text mail ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Trait for mail delivery backends.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, email: &Email) -> Result<()>;
}

/// SMTP delivery with STARTTLS and login.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: &MailConfig) -> Result<Self> {
        let credentials = Credentials::new(config.sender.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        let message = Message::builder()
            .from(email.from.parse::<Mailbox>()?)
            .to(email.to.parse::<Mailbox>()?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Sends one mail per run listing the newly seen postings.
pub struct Notifier {
    mailer: Box<dyn Mailer>,
    sender: String,
    recipient: String,
    subject: String,
}

impl Notifier {
    /// Create a notifier over an arbitrary mailer.
    pub fn new(
        mailer: Box<dyn Mailer>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
        }
    }

    /// Create a notifier delivering over SMTP.
    ///
    /// Sender and recipient addresses are checked here, before any network
    /// activity.
    pub fn smtp(config: &MailConfig, subject: impl Into<String>) -> Result<Self> {
        config.sender.parse::<Mailbox>()?;
        config.recipient.parse::<Mailbox>()?;

        let mailer = SmtpMailer::new(config)?;
        Ok(Self::new(
            Box::new(mailer),
            &config.sender,
            &config.recipient,
            subject,
        ))
    }

    /// Mail the given listings. Does nothing for an empty list.
    ///
    /// Returns whether a message was sent.
    pub async fn notify(&self, listings: &[JobListing]) -> Result<bool> {
        if listings.is_empty() {
            log::debug!("No new listings, skipping notification");
            return Ok(false);
        }

        let email = Email {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            subject: self.subject.clone(),
            body: compose_body(listings),
        };
        self.mailer.send(&email).await?;

        log::info!(
            "Sent notification for {} listings to {}",
            listings.len(),
            self.recipient
        );
        Ok(true)
    }
}

/// Plain-text body for a list of listings.
///
/// One `employer - title - location` line per listing, link on the next line.
pub fn compose_body(listings: &[JobListing]) -> String {
    listings
        .iter()
        .map(|l| format!("{} - {} - {}\n{}", l.employer, l.title, l.location, l.link))
        .collect::<Vec<_>>()
        .join("\n")
}
