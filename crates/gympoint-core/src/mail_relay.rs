//! HTTP mail relay notifier implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, instrument};

use crate::config::MailConfig;
use crate::notifier::{Notification, Notifier, NotifyError};

/// Notifier that posts templated messages to a mail relay
#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    config: MailConfig,
}

/// Relay request body
#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    template: &'a str,
    context: &'a Map<String, Value>,
}

impl HttpMailer {
    /// Create a new relay notifier
    pub fn new(config: MailConfig) -> Self {
        let client = Client::new();
        Self { client, config }
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    #[instrument(skip(self, notification), fields(template = %notification.template))]
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        debug!(to = %notification.to, "Posting notification to mail relay");

        let body = RelayMessage {
            from: &self.config.from,
            to: &notification.to,
            subject: &notification.subject,
            template: &notification.template,
            context: &notification.context,
        };

        let mut request = self.client.post(&self.config.api_url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Mail relay request failed");
            NotifyError::Transport(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Mail relay error");
            return Err(NotifyError::Rejected(format!("status {status}")));
        }

        Ok(())
    }
}
