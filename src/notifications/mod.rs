use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::MailConfig;
use crate::error::Result;

pub mod messages;
pub mod smtp;

pub use messages::{booking_confirmation, contact_message, payment_reminder};
pub use smtp::SmtpMailer;

/// A fully composed plain-text message, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    fn name(&self) -> &str;
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}

/// Used when mail delivery is disabled: messages are only logged.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            "Mail delivery disabled, message not sent"
        );
        tracing::debug!("Message body:\n{}", mail.body);
        Ok(())
    }
}

/// Keeps every message in memory instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: RwLock<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        self.sent.write().await.push(mail);
        Ok(())
    }
}

/// Picks the SMTP mailer when mail is enabled and configured, otherwise
/// falls back to logging.
pub fn mailer_from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    if !config.enabled {
        tracing::info!("Mail delivery disabled");
        return Arc::new(LogMailer);
    }

    match SmtpMailer::new(config) {
        Ok(mailer) => {
            tracing::info!("SMTP mail delivery enabled");
            Arc::new(mailer)
        }
        Err(e) => {
            tracing::warn!("Mail enabled but SMTP setup failed: {}. Logging mail instead.", e);
            Arc::new(LogMailer)
        }
    }
}
