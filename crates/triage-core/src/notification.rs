//! User-facing notifications and platform signals.
//!
//! The application layer never talks to a UI toolkit directly. Hosts inject a
//! [`Notifier`] for toasts and a [`RecordChangeListener`] for the advisory
//! "record changed" broadcast.

use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
    Info,
}

impl Severity {
    /// Errors stay until dismissed; everything else fades on its own.
    pub fn dismiss_mode(self) -> DismissMode {
        match self {
            Self::Error => DismissMode::Sticky,
            Self::Success | Self::Warning | Self::Info => DismissMode::Dismissable,
        }
    }
}

/// How a notification leaves the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissMode {
    Dismissable,
    Sticky,
}

/// A titled, severity-tagged message for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub mode: DismissMode,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            mode: severity.dismiss_mode(),
        }
    }
}

/// Sink for user-facing notifications. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Receives the advisory "record changed" signal after a successful action.
pub trait RecordChangeListener: Send + Sync {
    fn record_changed(&self, record_id: &str);
}
