//! Mail notification module for custodia.
//!
//! Delivery sits behind the `Mailer` trait so workflows never talk to a
//! transport directly. The SMTP transport is built once at startup and
//! injected; tests substitute the recording or failing doubles.

mod approval;
mod smtp;
mod templates;

pub use approval::ApprovalNotifier;
pub use smtp::SmtpMailer;
pub use templates::MailContent;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use crate::config::SmtpConfig;
use crate::Result;

/// A fully rendered outgoing mail message.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub text: String,
    /// HTML body.
    pub html: String,
}

impl OutgoingMail {
    /// Assemble a message from rendered content and a recipient.
    pub fn new(to: impl Into<String>, content: MailContent) -> Self {
        Self {
            to: to.into(),
            subject: content.subject,
            text: content.text,
            html: content.html,
        }
    }
}

/// Trait for mail delivery backends.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message. Implementations bound the send with a timeout.
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// Build the mailer configured for this process.
///
/// With SMTP disabled a no-op mailer is returned and notification
/// content is only logged.
pub async fn create_mailer(config: &SmtpConfig) -> Result<Arc<dyn Mailer>> {
    if !config.enabled {
        info!("Mail delivery disabled; notifications will be logged only");
        return Ok(Arc::new(NoopMailer));
    }

    let mailer = SmtpMailer::new(config)?;
    mailer.check_connection().await;
    Ok(Arc::new(mailer))
}

/// Mailer that logs instead of sending. Used when SMTP is disabled.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        info!(to = %mail.to, subject = %mail.subject, "Mail delivery disabled; dropping message");
        Ok(())
    }
}

/// Mailer that records every message. Test support.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    /// Messages recorded so far.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Mailer that fails every send. Test support.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<()> {
        Err(crate::CustodiaError::Notification(
            "transport unavailable".to_string(),
        ))
    }
}
