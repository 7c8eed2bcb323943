//! Triage audit log records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::case::CaseContext;
use crate::wire::null_as_default;

/// Number of characters of the latest email body kept in a snapshot.
pub const EMAIL_SNIPPET_CHARS: usize = 200;

/// A persisted triage log, as read back from the backend.
///
/// Entries are immutable once created. The backend may send either the
/// camelCase names or its custom-object field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageLogEntry {
    #[serde(default, alias = "Id")]
    pub id: Option<String>,
    #[serde(default, alias = "Triage_Timestamp__c")]
    pub timestamp: Option<String>,
    #[serde(default, alias = "Triage_Snapshot_JSON__c")]
    pub triage_snapshot_json: Option<String>,
    #[serde(default, alias = "Draft_Reply__c")]
    pub draft_reply_text: Option<String>,
    #[serde(default, alias = "AI_Used__c", deserialize_with = "null_as_default")]
    pub ai_used: bool,
    #[serde(default, alias = "Actions_JSON__c")]
    pub actions_json: Option<String>,
    #[serde(default, alias = "Data_Snapshot_JSON__c")]
    pub context_snapshot_json: Option<String>,
    #[serde(default, alias = "Error_Message__c")]
    pub error_msg: Option<String>,
}

/// Arguments of `saveTriageLog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTriageLogRequest {
    pub case_id: String,
    pub triage_json: String,
    pub draft_reply: String,
    pub ai_used: bool,
    pub action_json: String,
    pub snapshot_json: String,
    pub error_msg: Option<String>,
}

/// Payload stored in `actionJson`: `{"actions": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogPayload {
    pub actions: Vec<ActionType>,
}

/// Case state captured alongside a triage log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub email_count: usize,
    pub comment_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_email_snippet: Option<String>,
    pub timestamp: String,
}

impl DataSnapshot {
    /// Captures the snapshot from whatever context is currently loaded.
    pub fn capture(context: Option<&CaseContext>, captured_at: DateTime<Utc>) -> Self {
        let record = context.and_then(|c| c.case_record.as_ref());
        let last_email_snippet = context
            .and_then(CaseContext::latest_email)
            .and_then(|email| email.text_body.as_deref())
            .map(|body| body.chars().take(EMAIL_SNIPPET_CHARS).collect());

        Self {
            subject: record.and_then(|r| r.subject.clone()),
            status: record.and_then(|r| r.status.clone()),
            priority: record.and_then(|r| r.priority.clone()),
            origin: record.and_then(|r| r.origin.clone()),
            email_count: context.map_or(0, |c| c.recent_emails.len()),
            comment_count: context.map_or(0, |c| c.recent_comments.len()),
            last_email_snippet,
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
