//! Audit log persistence.

use std::sync::Arc;

use chrono::Utc;
use triage_core::action::ActionType;
use triage_core::error::Result;
use triage_core::log::{ActionLogPayload, DataSnapshot, SaveTriageLogRequest};
use triage_core::service::CaseTriageService;

use crate::emitter::NotificationEmitter;
use crate::flight::InFlight;
use crate::session_log::SessionActionLog;
use crate::subscription::SubscriptionManager;

const SAVED_MESSAGE: &str = "Triage log saved successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed { message: String },
    /// A save was already running.
    Busy,
    /// No case is selected.
    NoCase,
}

/// Persists a snapshot of the triage session as an audit log entry.
pub struct LogPersistenceWorkflow {
    service: Arc<dyn CaseTriageService>,
    subscriptions: Arc<SubscriptionManager>,
    session_log: Arc<SessionActionLog>,
    emitter: NotificationEmitter,
    saving: InFlight,
}

impl LogPersistenceWorkflow {
    pub fn new(
        service: Arc<dyn CaseTriageService>,
        subscriptions: Arc<SubscriptionManager>,
        session_log: Arc<SessionActionLog>,
        emitter: NotificationEmitter,
    ) -> Self {
        Self {
            service,
            subscriptions,
            session_log,
            emitter,
            saving: InFlight::new(),
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_active()
    }

    /// Saves the current assessment, case snapshot, session actions and
    /// `draft_text`.
    ///
    /// On success only the logs subscription is refreshed and the saved
    /// actions are dropped from the session log. On failure nothing changes.
    pub async fn save(&self, case_id: &str, draft_text: &str) -> SaveOutcome {
        let Some(_guard) = self.saving.try_begin() else {
            tracing::warn!("[LogPersistence] Save already in progress");
            return SaveOutcome::Busy;
        };

        let actions = self.session_log.snapshot().await;
        let saved_count = actions.len();

        let outcome = match self.build_request(case_id, draft_text, actions).await {
            Ok(request) => self.service.save_triage_log(&request).await,
            Err(err) => Err(err),
        };

        if let Err(err) = outcome {
            let message = format!("Failed to save triage log: {}", err.user_message());
            self.emitter.error(message.clone());
            return SaveOutcome::Failed { message };
        }

        tracing::debug!(
            "[LogPersistence] Saved log for case {} with {} action(s)",
            case_id,
            saved_count
        );
        self.emitter.success(SAVED_MESSAGE);
        self.subscriptions.refresh_logs().await;
        self.session_log.clear_saved(saved_count).await;
        SaveOutcome::Saved
    }

    async fn build_request(
        &self,
        case_id: &str,
        draft_text: &str,
        actions: Vec<ActionType>,
    ) -> Result<SaveTriageLogRequest> {
        // Data left over from the previous case is not snapshotted.
        let triage = self.subscriptions.triage_data(case_id).await;
        let context = self.subscriptions.context_data(case_id).await;
        let snapshot = DataSnapshot::capture(context.as_ref(), Utc::now());

        Ok(SaveTriageLogRequest {
            case_id: case_id.to_string(),
            triage_json: serde_json::to_string(&triage)?,
            draft_reply: draft_text.to_string(),
            ai_used: !draft_text.is_empty(),
            action_json: serde_json::to_string(&ActionLogPayload { actions })?,
            snapshot_json: serde_json::to_string(&snapshot)?,
            error_msg: None,
        })
    }
}
