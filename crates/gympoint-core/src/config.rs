//! Business rule and mail configuration

use chrono::Duration;

/// Tunable business rules
#[derive(Debug, Clone)]
pub struct RulesConfig {
    /// Maximum check-ins a student may have inside the window
    pub checkin_limit: i64,
    /// Length of the rolling check-in window
    pub checkin_window: Duration,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            checkin_limit: 5,
            checkin_window: Duration::days(7),
        }
    }
}

impl RulesConfig {
    /// Set the check-in limit
    pub fn with_checkin_limit(mut self, limit: i64) -> Self {
        self.checkin_limit = limit;
        self
    }
}

/// Mail relay configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Relay endpoint that accepts templated messages
    pub api_url: String,
    /// Bearer key for the relay
    pub api_key: Option<String>,
    /// Sender mailbox
    pub from: String,
}

impl MailConfig {
    /// Create a new mail config
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: None,
            from: "Gympoint <noreply@gympoint.com>".to_string(),
        }
    }

    /// Set the relay API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the sender mailbox
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }
}
