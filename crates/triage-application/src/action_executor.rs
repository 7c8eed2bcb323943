//! Action execution against the current case.

use std::sync::Arc;

use triage_core::action::ActionType;
use triage_core::notification::RecordChangeListener;
use triage_core::service::CaseTriageService;

use crate::emitter::NotificationEmitter;
use crate::flight::InFlight;
use crate::session_log::SessionActionLog;
use crate::subscription::SubscriptionManager;

const ACTION_FAILED_MESSAGE: &str = "Action failed";

/// How an action request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Backend accepted the action; data has been refreshed.
    Completed { message: String },
    /// Backend answered `success: false`.
    Rejected { message: String },
    /// The call itself failed.
    Failed { message: String },
    /// Another action (or a log save) was still running.
    Busy,
    /// No case is selected.
    NoCase,
}

/// Runs one action at a time and keeps local state consistent with it.
///
/// On success the action is appended to the session log, the platform is told
/// the record changed, and all subscriptions are refreshed before the
/// in-progress flag clears. Any failure leaves local state untouched.
pub struct ActionExecutor {
    service: Arc<dyn CaseTriageService>,
    subscriptions: Arc<SubscriptionManager>,
    session_log: Arc<SessionActionLog>,
    record_changes: Arc<dyn RecordChangeListener>,
    emitter: NotificationEmitter,
    in_flight: InFlight,
}

impl ActionExecutor {
    pub fn new(
        service: Arc<dyn CaseTriageService>,
        subscriptions: Arc<SubscriptionManager>,
        session_log: Arc<SessionActionLog>,
        record_changes: Arc<dyn RecordChangeListener>,
        emitter: NotificationEmitter,
    ) -> Self {
        Self {
            service,
            subscriptions,
            session_log,
            record_changes,
            emitter,
            in_flight: InFlight::new(),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Executes `action` on `case_id`.
    ///
    /// `success_message` is used when the backend does not send its own.
    /// A call made while another is in flight returns [`ActionOutcome::Busy`]
    /// without reaching the backend.
    pub async fn execute(
        &self,
        case_id: &str,
        action: ActionType,
        success_message: &str,
    ) -> ActionOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            tracing::warn!(
                "[ActionExecutor] {} ignored: another action is in progress",
                action
            );
            return ActionOutcome::Busy;
        };

        tracing::debug!("[ActionExecutor] Executing {} on case {}", action, case_id);

        let result = match self.service.take_action(case_id, &action).await {
            Ok(result) => result,
            Err(err) => {
                let message = format!("{ACTION_FAILED_MESSAGE}: {}", err.user_message());
                self.emitter.error(message.clone());
                return ActionOutcome::Failed { message };
            }
        };

        if !result.success {
            let message = result
                .server_message()
                .unwrap_or(ACTION_FAILED_MESSAGE)
                .to_string();
            self.emitter.error(message.clone());
            return ActionOutcome::Rejected { message };
        }

        let message = result
            .server_message()
            .unwrap_or(success_message)
            .to_string();

        self.session_log.record(action.clone()).await;
        self.emitter.success(message.clone());
        self.record_changes.record_changed(case_id);
        self.subscriptions.refresh_all().await;

        tracing::debug!("[ActionExecutor] {} completed on case {}", action, case_id);
        ActionOutcome::Completed { message }
    }
}
