//! Notifier that remembers what it was asked to send

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gympoint_core::{Notification, Notifier, NotifyError};

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every delivery fails
    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification);
        if self.fail {
            return Err(NotifyError::Transport("relay unreachable".to_string()));
        }
        Ok(())
    }
}
