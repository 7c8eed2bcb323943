//! Remote procedures exposed by the triage backend.

use async_trait::async_trait;

use crate::action::{ActionResult, ActionType};
use crate::case::CaseContext;
use crate::draft::DraftResult;
use crate::error::Result;
use crate::log::{SaveTriageLogRequest, TriageLogEntry};
use crate::triage::TriageAssessment;

/// The backend the copilot orchestrates.
///
/// This trait decouples the orchestration logic from the transport (HTTP,
/// in-process fake, ...). Read procedures are idempotent. `Err` means the call
/// itself failed; application-level failures come back as `Ok` results with
/// `success: false`.
#[async_trait]
pub trait CaseTriageService: Send + Sync {
    /// `getCaseContext(caseId)`
    async fn get_case_context(&self, case_id: &str) -> Result<CaseContext>;

    /// `getTriageResult(caseId)`
    async fn get_triage_result(&self, case_id: &str) -> Result<TriageAssessment>;

    /// `getRecentTriageLogs(caseId)`
    async fn get_recent_triage_logs(&self, case_id: &str) -> Result<Vec<TriageLogEntry>>;

    /// `generateAIDraft(caseId)`
    async fn generate_ai_draft(&self, case_id: &str) -> Result<DraftResult>;

    /// `takeAction(caseId, actionType)`
    async fn take_action(&self, case_id: &str, action: &ActionType) -> Result<ActionResult>;

    /// `saveTriageLog(caseId, triageJson, draftReply, aiUsed, actionJson, snapshotJson, errorMsg)`
    async fn save_triage_log(&self, request: &SaveTriageLogRequest) -> Result<()>;
}
