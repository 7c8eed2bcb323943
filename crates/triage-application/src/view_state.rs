//! Presentation state derived from the copilot's data and flags.

use serde::Serialize;
use triage_core::action::ActionType;
use triage_core::case::{CaseContext, Comment, EmailMessage};
use triage_core::format::format_optional;
use triage_core::log::TriageLogEntry;
use triage_core::triage::{DEFAULT_ROUTING, PriorityBand, ScoreClass, TriageAssessment};

use crate::subscription::Subscription;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailView {
    #[serde(flatten)]
    pub email: EmailMessage,
    pub formatted_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub formatted_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogView {
    #[serde(flatten)]
    pub entry: TriageLogEntry,
    pub formatted_timestamp: String,
}

/// Everything the copilot's view needs to render, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopilotViewState {
    pub is_loading: bool,
    pub has_error: bool,
    pub error_message: Option<String>,

    pub priority_score: f64,
    pub priority_band: PriorityBand,
    pub recommended_routing: String,
    pub reasons: Vec<String>,
    pub has_reasons: bool,
    pub suggested_actions: Vec<String>,
    pub has_suggested_actions: bool,
    pub score_badge_class: String,
    pub band_badge_class: String,

    pub recent_emails: Vec<EmailView>,
    pub has_emails: bool,
    pub recent_comments: Vec<CommentView>,
    pub has_comments: bool,
    pub recent_logs: Vec<LogView>,
    pub has_recent_logs: bool,

    pub draft_text: String,
    pub session_actions: Vec<ActionType>,
    pub is_copy_disabled: bool,
    pub is_save_disabled: bool,
    pub is_action_disabled: bool,
}

/// Inputs of [`CopilotViewState::derive`], captured by the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct ViewSources {
    pub context: Subscription<CaseContext>,
    pub triage: Subscription<TriageAssessment>,
    pub logs: Subscription<Vec<TriageLogEntry>>,
    pub page_error: Option<String>,
    pub draft_text: String,
    pub session_actions: Vec<ActionType>,
    pub generating: bool,
    pub saving: bool,
    pub action_in_progress: bool,
}

impl CopilotViewState {
    pub fn derive(sources: ViewSources) -> Self {
        let ViewSources {
            context,
            triage,
            logs,
            page_error,
            draft_text,
            session_actions,
            generating,
            saving,
            action_in_progress,
        } = sources;

        let is_loading = context.loading || triage.loading;
        let assessment = triage.data.unwrap_or_default();
        let case = context.data.unwrap_or_default();

        let recommended_routing = assessment
            .recommended_routing
            .clone()
            .filter(|routing| !routing.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ROUTING.to_string());
        let score_class = ScoreClass::from_score(assessment.priority_score);

        let recent_emails: Vec<EmailView> = case
            .recent_emails
            .into_iter()
            .map(|email| EmailView {
                formatted_date: format_optional(email.message_date.as_deref()),
                email,
            })
            .collect();
        let recent_comments: Vec<CommentView> = case
            .recent_comments
            .into_iter()
            .map(|comment| CommentView {
                formatted_date: format_optional(comment.created_date.as_deref()),
                comment,
            })
            .collect();
        let recent_logs: Vec<LogView> = logs
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|entry| LogView {
                formatted_timestamp: format_optional(entry.timestamp.as_deref()),
                entry,
            })
            .collect();

        Self {
            is_loading,
            has_error: page_error.is_some(),
            error_message: page_error,

            priority_score: assessment.priority_score,
            priority_band: assessment.priority_band,
            recommended_routing,
            has_reasons: !assessment.reasons.is_empty(),
            reasons: assessment.reasons,
            has_suggested_actions: !assessment.suggested_actions.is_empty(),
            suggested_actions: assessment.suggested_actions,
            score_badge_class: score_class.badge_class().to_string(),
            band_badge_class: assessment.priority_band.badge_class().to_string(),

            has_emails: !recent_emails.is_empty(),
            recent_emails,
            has_comments: !recent_comments.is_empty(),
            recent_comments,
            has_recent_logs: !recent_logs.is_empty(),
            recent_logs,

            is_copy_disabled: draft_text.is_empty() || generating,
            is_save_disabled: saving || generating,
            is_action_disabled: action_in_progress || saving,
            draft_text,
            session_actions,
        }
    }
}
