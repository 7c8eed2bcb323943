//! Hand-written fakes shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use triage_core::action::{ActionResult, ActionType};
use triage_core::case::{CaseContext, CaseRecord, Comment, EmailMessage};
use triage_core::clipboard::{BufferHandle, Clipboard};
use triage_core::draft::DraftResult;
use triage_core::error::{Result, TriageError};
use triage_core::log::{SaveTriageLogRequest, TriageLogEntry};
use triage_core::notification::{Notification, Notifier, RecordChangeListener, Severity};
use triage_core::service::CaseTriageService;
use triage_core::triage::{PriorityBand, TriageAssessment};

use crate::emitter::NotificationEmitter;
use crate::session_log::SessionActionLog;
use crate::subscription::SubscriptionManager;

// ============================================================================
// Fixtures
// ============================================================================

pub(crate) fn sample_context(subject: &str) -> CaseContext {
    CaseContext {
        case_record: Some(CaseRecord {
            subject: Some(subject.to_string()),
            status: Some("New".to_string()),
            priority: Some("High".to_string()),
            origin: Some("Email".to_string()),
        }),
        recent_emails: vec![EmailMessage {
            subject: Some("Re: outage".to_string()),
            from_address: Some("customer@example.com".to_string()),
            text_body: Some("Our whole team is locked out since this morning.".to_string()),
            message_date: Some("2024-03-01T15:07:00Z".to_string()),
        }],
        recent_comments: vec![Comment {
            comment_body: Some("Called the customer".to_string()),
            created_by: Some("agent".to_string()),
            created_date: Some("2024-03-01T16:00:00Z".to_string()),
        }],
    }
}

pub(crate) fn sample_triage(score: f64) -> TriageAssessment {
    TriageAssessment {
        priority_score: score,
        priority_band: PriorityBand::High,
        recommended_routing: Some("L2 Identity".to_string()),
        reasons: vec!["Outage keyword".to_string()],
        suggested_actions: vec!["Escalate".to_string()],
    }
}

pub(crate) fn sample_logs() -> Vec<TriageLogEntry> {
    vec![TriageLogEntry {
        id: Some("a01".to_string()),
        timestamp: Some("2024-03-01T17:00:00Z".to_string()),
        ai_used: true,
        ..Default::default()
    }]
}

// ============================================================================
// Service
// ============================================================================

/// Calls received by [`MockTriageService`].
#[derive(Debug, Default, Clone)]
pub(crate) struct Calls {
    pub context: Vec<String>,
    pub triage: Vec<String>,
    pub logs: Vec<String>,
    pub drafts: Vec<String>,
    pub actions: Vec<(String, ActionType)>,
    pub saves: Vec<SaveTriageLogRequest>,
}

/// Scriptable backend. Gates hold a call in flight until notified.
pub(crate) struct MockTriageService {
    pub context: Mutex<Result<CaseContext>>,
    pub context_by_case: Mutex<HashMap<String, CaseContext>>,
    pub triage: Mutex<Result<TriageAssessment>>,
    pub logs: Mutex<Result<Vec<TriageLogEntry>>>,
    pub draft: Mutex<Result<DraftResult>>,
    pub action: Mutex<Result<ActionResult>>,
    pub save: Mutex<Result<()>>,
    pub calls: Mutex<Calls>,
    pub context_gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub action_gate: Mutex<Option<Arc<Notify>>>,
    pub draft_gate: Mutex<Option<Arc<Notify>>>,
    pub save_gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for MockTriageService {
    fn default() -> Self {
        Self {
            context: Mutex::new(Ok(sample_context("Cannot log in"))),
            context_by_case: Mutex::new(HashMap::new()),
            triage: Mutex::new(Ok(sample_triage(72.0))),
            logs: Mutex::new(Ok(sample_logs())),
            draft: Mutex::new(Ok(DraftResult {
                success: true,
                draft_text: Some("Hello, we are on it.".to_string()),
                error: None,
            })),
            action: Mutex::new(Ok(ActionResult::succeeded(None))),
            save: Mutex::new(Ok(())),
            calls: Mutex::new(Calls::default()),
            context_gates: Mutex::new(HashMap::new()),
            action_gate: Mutex::new(None),
            draft_gate: Mutex::new(None),
            save_gate: Mutex::new(None),
        }
    }
}

impl MockTriageService {
    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_context(&self, result: Result<CaseContext>) {
        *self.context.lock().unwrap() = result;
    }

    pub fn set_triage(&self, result: Result<TriageAssessment>) {
        *self.triage.lock().unwrap() = result;
    }

    pub fn set_logs(&self, result: Result<Vec<TriageLogEntry>>) {
        *self.logs.lock().unwrap() = result;
    }

    pub fn set_draft(&self, result: Result<DraftResult>) {
        *self.draft.lock().unwrap() = result;
    }

    pub fn set_action(&self, result: Result<ActionResult>) {
        *self.action.lock().unwrap() = result;
    }

    pub fn set_save(&self, result: Result<()>) {
        *self.save.lock().unwrap() = result;
    }

    pub fn context_for_case(&self, case_id: &str, context: CaseContext) {
        self.context_by_case
            .lock()
            .unwrap()
            .insert(case_id.to_string(), context);
    }

    pub fn gate_context(&self, case_id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.context_gates
            .lock()
            .unwrap()
            .insert(case_id.to_string(), gate.clone());
        gate
    }

    pub fn gate_actions(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.action_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn gate_drafts(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.draft_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn gate_saves(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.save_gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

async fn pass(gate: Option<Arc<Notify>>) {
    if let Some(gate) = gate {
        gate.notified().await;
    }
}

#[async_trait]
impl CaseTriageService for MockTriageService {
    async fn get_case_context(&self, case_id: &str) -> Result<CaseContext> {
        self.calls.lock().unwrap().context.push(case_id.to_string());
        let gate = self.context_gates.lock().unwrap().get(case_id).cloned();
        pass(gate).await;
        let per_case = self.context_by_case.lock().unwrap().get(case_id).cloned();
        match per_case {
            Some(context) => Ok(context),
            None => self.context.lock().unwrap().clone(),
        }
    }

    async fn get_triage_result(&self, case_id: &str) -> Result<TriageAssessment> {
        self.calls.lock().unwrap().triage.push(case_id.to_string());
        self.triage.lock().unwrap().clone()
    }

    async fn get_recent_triage_logs(&self, case_id: &str) -> Result<Vec<TriageLogEntry>> {
        self.calls.lock().unwrap().logs.push(case_id.to_string());
        self.logs.lock().unwrap().clone()
    }

    async fn generate_ai_draft(&self, case_id: &str) -> Result<DraftResult> {
        self.calls.lock().unwrap().drafts.push(case_id.to_string());
        let gate = self.draft_gate.lock().unwrap().clone();
        pass(gate).await;
        self.draft.lock().unwrap().clone()
    }

    async fn take_action(&self, case_id: &str, action: &ActionType) -> Result<ActionResult> {
        self.calls
            .lock()
            .unwrap()
            .actions
            .push((case_id.to_string(), action.clone()));
        let gate = self.action_gate.lock().unwrap().clone();
        pass(gate).await;
        self.action.lock().unwrap().clone()
    }

    async fn save_triage_log(&self, request: &SaveTriageLogRequest) -> Result<()> {
        self.calls.lock().unwrap().saves.push(request.clone());
        let gate = self.save_gate.lock().unwrap().clone();
        pass(gate).await;
        self.save.lock().unwrap().clone()
    }
}

// ============================================================================
// Platform
// ============================================================================

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap().last().cloned()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub(crate) struct RecordingListener {
    pub changed: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn changed(&self) -> Vec<String> {
        self.changed.lock().unwrap().clone()
    }
}

impl RecordChangeListener for RecordingListener {
    fn record_changed(&self, record_id: &str) {
        self.changed.lock().unwrap().push(record_id.to_string());
    }
}

#[derive(Default)]
pub(crate) struct FakeClipboard {
    pub reject_write: bool,
    pub reject_copy: bool,
    pub written: Mutex<Vec<String>>,
    pub attached: Mutex<Vec<(BufferHandle, String)>>,
    pub copied: Mutex<Vec<String>>,
    pub detached: Mutex<Vec<BufferHandle>>,
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.reject_write {
            return Err(TriageError::internal("clipboard permission denied"));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn attach_buffer(&self, text: &str) -> Result<BufferHandle> {
        let mut attached = self.attached.lock().unwrap();
        let handle = BufferHandle(attached.len() as u64 + 1);
        attached.push((handle, text.to_string()));
        Ok(handle)
    }

    fn copy_selection(&self, buffer: BufferHandle) -> Result<()> {
        if self.reject_copy {
            return Err(TriageError::internal("copy command unsupported"));
        }
        let attached = self.attached.lock().unwrap();
        if let Some((_, text)) = attached.iter().find(|(handle, _)| *handle == buffer) {
            self.copied.lock().unwrap().push(text.clone());
        }
        Ok(())
    }

    fn detach_buffer(&self, buffer: BufferHandle) {
        self.detached.lock().unwrap().push(buffer);
    }
}

// ============================================================================
// Wiring
// ============================================================================

/// The shared collaborators most workflow tests need.
pub(crate) struct Harness {
    pub service: Arc<MockTriageService>,
    pub notifier: Arc<RecordingNotifier>,
    pub listener: Arc<RecordingListener>,
    pub emitter: NotificationEmitter,
    pub subscriptions: Arc<SubscriptionManager>,
    pub session_log: Arc<SessionActionLog>,
}

impl Harness {
    pub fn new() -> Self {
        let service = Arc::new(MockTriageService::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let listener = Arc::new(RecordingListener::default());
        let emitter = NotificationEmitter::new(notifier.clone());
        let subscriptions = Arc::new(SubscriptionManager::new(service.clone(), emitter.clone()));
        Self {
            service,
            notifier,
            listener,
            emitter,
            subscriptions,
            session_log: Arc::new(SessionActionLog::new()),
        }
    }

    /// Points the subscriptions at `case_id` and lets the initial loads settle.
    pub async fn load_case(&self, case_id: &str) {
        self.subscriptions.set_case_id(case_id).await;
    }
}
