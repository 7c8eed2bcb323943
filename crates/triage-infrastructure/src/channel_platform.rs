//! Platform side channels forwarded over a tokio channel.
//!
//! A host (UI shell, CLI, test driver) owns the receiving end and renders
//! toasts or reloads the record as events arrive.

use serde::Serialize;
use tokio::sync::mpsc;
use triage_core::notification::{Notification, Notifier, RecordChangeListener};

/// Event delivered to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlatformEvent {
    Toast(Notification),
    #[serde(rename_all = "camelCase")]
    RecordChanged { record_id: String },
}

/// Implements the copilot's platform traits by sending [`PlatformEvent`]s.
#[derive(Debug, Clone)]
pub struct ChannelPlatform {
    sender: mpsc::UnboundedSender<PlatformEvent>,
}

impl ChannelPlatform {
    pub fn new(sender: mpsc::UnboundedSender<PlatformEvent>) -> Self {
        Self { sender }
    }

    /// Creates a platform together with the receiver the host listens on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PlatformEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    fn send(&self, event: PlatformEvent) {
        // Fire-and-forget: a host that went away just stops receiving.
        if self.sender.send(event).is_err() {
            tracing::debug!("[ChannelPlatform] Receiver dropped, event discarded");
        }
    }
}

impl Notifier for ChannelPlatform {
    fn notify(&self, notification: Notification) {
        self.send(PlatformEvent::Toast(notification));
    }
}

impl RecordChangeListener for ChannelPlatform {
    fn record_changed(&self, record_id: &str) {
        self.send(PlatformEvent::RecordChanged {
            record_id: record_id.to_string(),
        });
    }
}
