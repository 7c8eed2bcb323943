//! Case context returned by the backend.

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;

/// The case record fields the copilot displays and snapshots.
///
/// Field names follow the backend's record API names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Priority", default)]
    pub priority: Option<String>,
    #[serde(rename = "Origin", default)]
    pub origin: Option<String>,
}

/// An email attached to the case, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from_address: Option<String>,
    #[serde(default)]
    pub text_body: Option<String>,
    #[serde(default)]
    pub message_date: Option<String>,
}

/// A case comment, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub comment_body: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
}

/// Snapshot of a case as of one fetch.
///
/// A new fetch replaces the whole value; it is never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseContext {
    #[serde(default)]
    pub case_record: Option<CaseRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_emails: Vec<EmailMessage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_comments: Vec<Comment>,
}

impl CaseContext {
    /// Returns the most recent email, if any.
    pub fn latest_email(&self) -> Option<&EmailMessage> {
        self.recent_emails.first()
    }
}
