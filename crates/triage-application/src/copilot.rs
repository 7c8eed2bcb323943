//! Case triage copilot orchestrator.

use std::sync::Arc;

use triage_core::action::ActionType;
use triage_core::clipboard::Clipboard;
use triage_core::notification::{Notifier, RecordChangeListener};
use triage_core::service::CaseTriageService;

use crate::action_executor::{ActionExecutor, ActionOutcome};
use crate::draft_workflow::{CopyOutcome, DraftOutcome, DraftWorkflow};
use crate::emitter::NotificationEmitter;
use crate::log_workflow::{LogPersistenceWorkflow, SaveOutcome};
use crate::session_log::SessionActionLog;
use crate::subscription::SubscriptionManager;
use crate::view_state::{CopilotViewState, ViewSources};

/// Collaborators supplied by the host.
#[derive(Clone)]
pub struct CopilotDependencies {
    pub service: Arc<dyn CaseTriageService>,
    pub notifier: Arc<dyn Notifier>,
    pub record_changes: Arc<dyn RecordChangeListener>,
    pub clipboard: Arc<dyn Clipboard>,
}

/// Operator and host events routed by [`CaseTriageCopilot::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopilotEvent {
    CaseChanged(String),
    DraftEdited(String),
    GenerateDraft,
    CopyDraft,
    SaveLog,
    CreateTask,
    Escalate,
    UpdateStatus,
    Refresh,
}

/// Composes the subscriptions and workflows for one case page.
///
/// Owns all session state: the subscriptions, the draft and the session
/// action log. Each workflow receives only the slice it works on.
pub struct CaseTriageCopilot {
    subscriptions: Arc<SubscriptionManager>,
    session_log: Arc<SessionActionLog>,
    actions: ActionExecutor,
    drafts: DraftWorkflow,
    logs: LogPersistenceWorkflow,
}

impl CaseTriageCopilot {
    pub fn new(deps: CopilotDependencies) -> Self {
        let emitter = NotificationEmitter::new(deps.notifier);
        let subscriptions = Arc::new(SubscriptionManager::new(
            deps.service.clone(),
            emitter.clone(),
        ));
        let session_log = Arc::new(SessionActionLog::new());

        let actions = ActionExecutor::new(
            deps.service.clone(),
            subscriptions.clone(),
            session_log.clone(),
            deps.record_changes,
            emitter.clone(),
        );
        let drafts = DraftWorkflow::new(deps.service.clone(), deps.clipboard, emitter.clone());
        let logs = LogPersistenceWorkflow::new(
            deps.service,
            subscriptions.clone(),
            session_log.clone(),
            emitter,
        );

        Self {
            subscriptions,
            session_log,
            actions,
            drafts,
            logs,
        }
    }

    pub async fn record_id(&self) -> Option<String> {
        self.subscriptions.case_id().await
    }

    /// Points the copilot at a case. Returns whether the identifier changed.
    pub async fn set_record_id(&self, record_id: &str) -> bool {
        self.subscriptions.set_case_id(record_id).await
    }

    pub async fn refresh(&self) {
        self.subscriptions.refresh_all().await;
    }

    pub async fn set_draft_text(&self, text: impl Into<String>) {
        self.drafts.set_text(text).await;
    }

    pub async fn generate_draft(&self) -> DraftOutcome {
        match self.record_id().await {
            Some(case_id) => self.drafts.generate(&case_id).await,
            None => DraftOutcome::NoCase,
        }
    }

    pub async fn copy_draft(&self) -> CopyOutcome {
        self.drafts.copy().await
    }

    /// Saves a triage log. Ignored while a draft is being generated.
    pub async fn save_log(&self) -> SaveOutcome {
        let Some(case_id) = self.record_id().await else {
            return SaveOutcome::NoCase;
        };
        if self.drafts.is_generating() {
            tracing::warn!("[CaseTriageCopilot] Save ignored while generating a draft");
            return SaveOutcome::Busy;
        }
        let draft_text = self.drafts.text().await;
        self.logs.save(&case_id, &draft_text).await
    }

    pub async fn create_task(&self) -> ActionOutcome {
        self.execute_action(ActionType::CreateTask).await
    }

    pub async fn escalate(&self) -> ActionOutcome {
        self.execute_action(ActionType::Escalate).await
    }

    pub async fn update_status(&self) -> ActionOutcome {
        self.execute_action(ActionType::UpdateStatus).await
    }

    /// Runs `action` with its default success message.
    ///
    /// Ignored while another action or a log save is in flight.
    pub async fn execute_action(&self, action: ActionType) -> ActionOutcome {
        let Some(case_id) = self.record_id().await else {
            return ActionOutcome::NoCase;
        };
        if self.logs.is_saving() {
            tracing::warn!("[CaseTriageCopilot] {} ignored while saving a log", action);
            return ActionOutcome::Busy;
        }
        let success_message = action.default_success_message();
        self.actions.execute(&case_id, action, &success_message).await
    }

    pub async fn session_actions(&self) -> Vec<ActionType> {
        self.session_log.snapshot().await
    }

    pub async fn view_state(&self) -> CopilotViewState {
        CopilotViewState::derive(ViewSources {
            context: self.subscriptions.context().await,
            triage: self.subscriptions.triage().await,
            logs: self.subscriptions.logs().await,
            page_error: self.subscriptions.error_message().await,
            draft_text: self.drafts.text().await,
            session_actions: self.session_log.snapshot().await,
            generating: self.drafts.is_generating(),
            saving: self.logs.is_saving(),
            action_in_progress: self.actions.is_in_progress(),
        })
    }

    /// Routes one event to its operation. Outcomes are reported through
    /// notifications and the view state.
    pub async fn dispatch(&self, event: CopilotEvent) {
        tracing::debug!("[CaseTriageCopilot] Dispatching {:?}", event);
        match event {
            CopilotEvent::CaseChanged(record_id) => {
                self.set_record_id(&record_id).await;
            }
            CopilotEvent::DraftEdited(text) => self.set_draft_text(text).await,
            CopilotEvent::GenerateDraft => {
                self.generate_draft().await;
            }
            CopilotEvent::CopyDraft => {
                self.copy_draft().await;
            }
            CopilotEvent::SaveLog => {
                self.save_log().await;
            }
            CopilotEvent::CreateTask => {
                self.create_task().await;
            }
            CopilotEvent::Escalate => {
                self.escalate().await;
            }
            CopilotEvent::UpdateStatus => {
                self.update_status().await;
            }
            CopilotEvent::Refresh => self.refresh().await,
        }
    }
}
