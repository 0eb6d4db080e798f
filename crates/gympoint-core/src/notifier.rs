//! Notification dispatcher abstraction
//!
//! Services hand a [`Notification`] (template name plus context) to a
//! [`Notifier`]; the concrete notifier decides how the e-mail is rendered
//! and delivered.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

/// Templated e-mail message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Recipient mailbox, `Name <email>`
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Template name known to the mail renderer
    pub template: String,
    /// Values substituted into the template
    pub context: Map<String, Value>,
}

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Transport-level failure talking to the relay
    #[error("mail transport error: {0}")]
    Transport(String),

    /// The relay answered with an error status
    #[error("mail relay rejected message: {0}")]
    Rejected(String),
}

/// Notification dispatcher trait
///
/// Abstracts mail delivery so services can be tested without a relay.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification
    async fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Notifier that only writes the message to the log
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Notifier for LogMailer {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        let context = Value::Object(notification.context);
        info!(
            to = %notification.to,
            subject = %notification.subject,
            template = %notification.template,
            context = %context,
            "Mail delivery disabled, notification logged"
        );
        Ok(())
    }
}

/// Send a notification after the business write has committed.
///
/// Failures are logged and counted, never returned: the caller's
/// transaction stands regardless of delivery.
pub async fn dispatch(notifier: &dyn Notifier, notification: Notification) {
    let template = notification.template.clone();
    let to = notification.to.clone();

    if let Err(e) = notifier.send(notification).await {
        warn!(error = %e, template = %template, to = %to, "Notification dispatch failed");
        metrics::counter!("gympoint_notifications_failed_total", "template" => template)
            .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn welcome() -> Notification {
        let mut context = Map::new();
        context.insert("studentName".to_string(), Value::from("Ana Souza"));
        Notification {
            to: "Ana Souza <ana@example.com>".to_string(),
            subject: "Gympoint - Gold Plan Enrollment".to_string(),
            template: "enrollment".to_string(),
            context,
        }
    }

    struct Unreachable;

    #[async_trait]
    impl Notifier for Unreachable {
        async fn send(&self, _: Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_log_mailer_accepts_every_message() {
        assert!(LogMailer.send(welcome()).await.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_swallows_delivery_errors() {
        dispatch(&LogMailer, welcome()).await;
        dispatch(&Unreachable, welcome()).await;
    }
}
