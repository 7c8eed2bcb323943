//! Actions an operator can take against a case.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire::null_as_default;

/// A predefined action understood by the backend.
///
/// The set is open: identifiers the copilot has no dedicated variant for are
/// carried through as [`ActionType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    CreateTask,
    Escalate,
    UpdateStatus,
    Other(String),
}

impl ActionType {
    /// Wire identifier of the action.
    pub fn as_str(&self) -> &str {
        match self {
            Self::CreateTask => "CREATE_TASK",
            Self::Escalate => "ESCALATE",
            Self::UpdateStatus => "UPDATE_STATUS",
            Self::Other(id) => id,
        }
    }

    /// Message shown on success when the backend does not provide one.
    pub fn default_success_message(&self) -> String {
        match self {
            Self::CreateTask => "Task created successfully".to_string(),
            Self::Escalate => "Case escalated successfully".to_string(),
            Self::UpdateStatus => "Status updated successfully".to_string(),
            Self::Other(id) => format!("{id} completed successfully"),
        }
    }
}

impl From<String> for ActionType {
    fn from(id: String) -> Self {
        match id.as_str() {
            "CREATE_TASK" => Self::CreateTask,
            "ESCALATE" => Self::Escalate,
            "UPDATE_STATUS" => Self::UpdateStatus,
            _ => Self::Other(id),
        }
    }
}

impl From<&str> for ActionType {
    fn from(id: &str) -> Self {
        Self::from(id.to_string())
    }
}

impl From<ActionType> for String {
    fn from(action: ActionType) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `takeAction`. `success: false` is an application-level failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResult {
    pub fn succeeded(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn failed(message: Option<String>) -> Self {
        Self {
            success: false,
            message,
        }
    }

    /// Server message, ignoring empty strings.
    pub fn server_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}
