use std::sync::Arc;

use tokio::sync::RwLock;
use triage_core::case::CaseContext;
use triage_core::log::TriageLogEntry;
use triage_core::service::CaseTriageService;
use triage_core::triage::TriageAssessment;

use super::{Settlement, Slot, Subscription};
use crate::emitter::NotificationEmitter;

/// Owns the copilot's three remote-backed data slots.
///
/// `SubscriptionManager` is responsible for:
/// - Tracking the current case identifier
/// - Re-fetching every slot when the identifier changes
/// - Refreshing slots individually or together (`refresh_all`)
/// - Surfacing failures: context and triage failures notify the operator,
///   log failures are only traced
///
/// Refresh methods never return errors; failures land in the slot's `error`.
pub struct SubscriptionManager {
    service: Arc<dyn CaseTriageService>,
    emitter: NotificationEmitter,
    case_id: RwLock<Option<String>>,
    context: Slot<CaseContext>,
    triage: Slot<TriageAssessment>,
    logs: Slot<Vec<TriageLogEntry>>,
    /// Page-level error message, owned by the context slot.
    page_error: RwLock<Option<String>>,
}

impl SubscriptionManager {
    pub fn new(service: Arc<dyn CaseTriageService>, emitter: NotificationEmitter) -> Self {
        Self {
            service,
            emitter,
            case_id: RwLock::new(None),
            context: Slot::new("context"),
            triage: Slot::new("triage"),
            logs: Slot::new("logs"),
            page_error: RwLock::new(None),
        }
    }

    pub async fn case_id(&self) -> Option<String> {
        self.case_id.read().await.clone()
    }

    /// Points the subscriptions at a case and re-fetches all three slots.
    ///
    /// Setting the identifier already in use is a no-op. A blank identifier
    /// clears every slot. Returns whether the identifier changed.
    pub async fn set_case_id(&self, case_id: &str) -> bool {
        let next = Some(case_id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        {
            let mut current = self.case_id.write().await;
            if *current == next {
                return false;
            }
            tracing::debug!(
                "[SubscriptionManager] Case changed: {:?} -> {:?}",
                *current,
                next
            );
            *current = next.clone();
        }

        if next.is_none() {
            tokio::join!(self.context.reset(), self.triage.reset(), self.logs.reset());
            *self.page_error.write().await = None;
            return true;
        }

        self.refresh_all().await;
        true
    }

    /// Re-fetches all three slots concurrently and waits for every one of
    /// them to settle. One failing never keeps the others from applying.
    pub async fn refresh_all(&self) {
        tracing::debug!("[SubscriptionManager] refresh_all() started");
        tokio::join!(
            self.refresh_context(),
            self.refresh_triage(),
            self.refresh_logs()
        );
        tracing::debug!("[SubscriptionManager] refresh_all() settled");
    }

    pub async fn refresh_context(&self) {
        let Some(case_id) = self.case_id().await else {
            tracing::debug!("[SubscriptionManager] No case selected, skipping context refresh");
            return;
        };

        let ticket = self.context.issue(&case_id).await;
        let result = self.service.get_case_context(&case_id).await;
        let current = self.case_id().await;
        match self.context.settle(&ticket, current.as_deref(), result).await {
            Settlement::Loaded => {
                *self.page_error.write().await = None;
            }
            Settlement::Failed(message) => {
                *self.page_error.write().await = Some(message.clone());
                self.emitter.error(message);
            }
            Settlement::Stale => {}
        }
    }

    pub async fn refresh_triage(&self) {
        let Some(case_id) = self.case_id().await else {
            tracing::debug!("[SubscriptionManager] No case selected, skipping triage refresh");
            return;
        };

        let ticket = self.triage.issue(&case_id).await;
        let result = self.service.get_triage_result(&case_id).await;
        let current = self.case_id().await;
        if let Settlement::Failed(message) =
            self.triage.settle(&ticket, current.as_deref(), result).await
        {
            self.emitter
                .error(format!("Failed to compute triage: {message}"));
        }
    }

    /// Log failures are secondary: they are traced, never shown.
    pub async fn refresh_logs(&self) {
        let Some(case_id) = self.case_id().await else {
            tracing::debug!("[SubscriptionManager] No case selected, skipping logs refresh");
            return;
        };

        let ticket = self.logs.issue(&case_id).await;
        let result = self.service.get_recent_triage_logs(&case_id).await;
        let current = self.case_id().await;
        if let Settlement::Failed(message) =
            self.logs.settle(&ticket, current.as_deref(), result).await
        {
            tracing::error!(
                "[SubscriptionManager] Error loading triage logs for {}: {}",
                case_id,
                message
            );
        }
    }

    /// Context or triage still loading. Logs never gate the primary view.
    pub async fn is_loading(&self) -> bool {
        self.context.is_loading().await || self.triage.is_loading().await
    }

    pub async fn error_message(&self) -> Option<String> {
        self.page_error.read().await.clone()
    }

    pub async fn context(&self) -> Subscription<CaseContext> {
        self.context.snapshot().await
    }

    pub async fn triage(&self) -> Subscription<TriageAssessment> {
        self.triage.snapshot().await
    }

    pub async fn logs(&self) -> Subscription<Vec<TriageLogEntry>> {
        self.logs.snapshot().await
    }

    /// Context data, if it was loaded for `case_id`.
    pub async fn context_data(&self, case_id: &str) -> Option<CaseContext> {
        self.context.data_for(case_id).await
    }

    /// Triage data, if it was loaded for `case_id`.
    pub async fn triage_data(&self, case_id: &str) -> Option<TriageAssessment> {
        self.triage.data_for(case_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, sample_context};
    use serde_json::json;
    use triage_core::TriageError;
    use triage_core::notification::Severity;

    #[tokio::test]
    async fn test_set_case_id_loads_all_slots() {
        let h = Harness::new();
        assert!(h.subscriptions.set_case_id("500A").await);

        assert!(!h.subscriptions.is_loading().await);
        assert!(h.subscriptions.context().await.data.is_some());
        assert_eq!(
            h.subscriptions.triage().await.data.map(|t| t.priority_score),
            Some(72.0)
        );
        assert_eq!(h.subscriptions.logs().await.data.map(|l| l.len()), Some(1));
        assert!(h.notifier.all().is_empty());

        let calls = h.service.calls();
        assert_eq!(calls.context, vec!["500A".to_string()]);
        assert_eq!(calls.triage, vec!["500A".to_string()]);
        assert_eq!(calls.logs, vec!["500A".to_string()]);
    }

    #[tokio::test]
    async fn test_same_case_id_does_not_refetch() {
        let h = Harness::new();
        h.load_case("500A").await;
        assert!(!h.subscriptions.set_case_id(" 500A ").await);
        assert_eq!(h.service.calls().context.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_without_case_is_noop() {
        let h = Harness::new();
        h.subscriptions.refresh_all().await;
        assert!(h.service.calls().context.is_empty());
        assert!(!h.subscriptions.is_loading().await);
    }

    #[tokio::test]
    async fn test_refresh_all_applies_partial_failure() {
        let h = Harness::new();
        h.service
            .set_triage(Err(TriageError::remote(Some(500), json!({ "body": { "message": "Scoring offline" } }))));
        h.load_case("500A").await;

        let context = h.subscriptions.context().await;
        let triage = h.subscriptions.triage().await;
        let logs = h.subscriptions.logs().await;
        assert!(context.data.is_some());
        assert!(logs.data.is_some());
        assert!(triage.data.is_none());
        assert_eq!(triage.error.as_deref(), Some("Scoring offline"));
        assert!(!h.subscriptions.is_loading().await);

        let last = h.notifier.last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert_eq!(last.message, "Failed to compute triage: Scoring offline");
        // Triage failures do not raise the page-level error.
        assert!(h.subscriptions.error_message().await.is_none());
    }

    #[tokio::test]
    async fn test_context_failure_sets_page_error_until_next_success() {
        let h = Harness::new();
        h.service
            .set_context(Err(TriageError::remote(None, json!({ "message": "Insufficient access" }))));
        h.load_case("500A").await;

        assert_eq!(
            h.subscriptions.error_message().await.as_deref(),
            Some("Insufficient access")
        );
        assert_eq!(h.notifier.count(Severity::Error), 1);
        assert!(h.subscriptions.triage().await.data.is_some());

        h.service.set_context(Ok(sample_context("Recovered")));
        h.subscriptions.refresh_context().await;
        assert!(h.subscriptions.error_message().await.is_none());
        assert!(h.subscriptions.context().await.error.is_none());
    }

    #[tokio::test]
    async fn test_logs_failure_is_silent() {
        let h = Harness::new();
        h.service.set_logs(Err(TriageError::transport("timeout")));
        h.load_case("500A").await;

        assert_eq!(h.subscriptions.logs().await.error.as_deref(), Some("timeout"));
        assert!(h.notifier.all().is_empty());
        assert!(h.subscriptions.error_message().await.is_none());
    }

    #[tokio::test]
    async fn test_late_resolution_for_previous_case_is_discarded() {
        let h = Harness::new();
        h.service.context_for_case("500A", sample_context("Old case"));
        h.service.context_for_case("500B", sample_context("New case"));
        let gate_a = h.service.gate_context("500A");

        let subscriptions = h.subscriptions.clone();
        tokio::join!(
            subscriptions.set_case_id("500A"),
            async {
                tokio::task::yield_now().await;
                h.subscriptions.set_case_id("500B").await;
                gate_a.notify_one();
            }
        );

        let context = h.subscriptions.context().await;
        let subject = context
            .data
            .clone()
            .and_then(|c| c.case_record)
            .and_then(|r| r.subject);
        assert_eq!(subject.as_deref(), Some("New case"));
        assert!(!context.loading);
        assert_eq!(context.last_ticket().map(|t| t.case_id.as_str()), Some("500B"));
    }

    #[tokio::test]
    async fn test_blank_case_id_clears_slots() {
        let h = Harness::new();
        h.load_case("500A").await;
        assert!(h.subscriptions.set_case_id("").await);

        assert!(h.subscriptions.case_id().await.is_none());
        assert!(h.subscriptions.context().await.data.is_none());
        assert!(h.subscriptions.logs().await.data.is_none());
        assert!(!h.subscriptions.is_loading().await);
    }
}
