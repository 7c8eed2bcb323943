//! AI draft generation result.

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;

/// Result of `generateAIDraft`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub draft_text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DraftResult {
    /// Draft text when it has visible content.
    pub fn usable_text(&self) -> Option<&str> {
        self.draft_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Server error message, ignoring empty strings.
    pub fn server_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}
