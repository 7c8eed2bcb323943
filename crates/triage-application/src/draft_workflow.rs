//! Reply draft generation and clipboard copy.

use std::sync::Arc;

use tokio::sync::RwLock;
use triage_core::clipboard::{Clipboard, TransientBuffer};
use triage_core::error::Result;
use triage_core::service::CaseTriageService;

use crate::emitter::NotificationEmitter;
use crate::flight::InFlight;

const GENERATED_MESSAGE: &str = "AI draft generated successfully";
const EMPTY_RESPONSE_MESSAGE: &str = "AI returned empty response";
const GENERATE_FAILED_MESSAGE: &str = "Failed to generate draft";
const NOTHING_TO_COPY_MESSAGE: &str = "No draft text to copy";
const COPIED_MESSAGE: &str = "Draft copied to clipboard";
const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    /// Draft text replaced with the generated reply.
    Generated,
    /// Backend answered with blank text; draft left as it was.
    Empty,
    /// Backend answered `success: false`.
    Rejected { message: String },
    /// The call itself failed.
    Failed { message: String },
    /// A generation was already running.
    Busy,
    /// No case is selected.
    NoCase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Platform write rejected; the transient-buffer path succeeded.
    CopiedViaFallback,
    NothingToCopy,
    Failed,
    /// A generation is running and may still replace the draft.
    Busy,
}

/// Owns the editable reply draft.
pub struct DraftWorkflow {
    service: Arc<dyn CaseTriageService>,
    clipboard: Arc<dyn Clipboard>,
    emitter: NotificationEmitter,
    draft_text: RwLock<String>,
    generating: InFlight,
}

impl DraftWorkflow {
    pub fn new(
        service: Arc<dyn CaseTriageService>,
        clipboard: Arc<dyn Clipboard>,
        emitter: NotificationEmitter,
    ) -> Self {
        Self {
            service,
            clipboard,
            emitter,
            draft_text: RwLock::new(String::new()),
            generating: InFlight::new(),
        }
    }

    pub async fn text(&self) -> String {
        self.draft_text.read().await.clone()
    }

    /// Replaces the draft with operator-edited text.
    pub async fn set_text(&self, text: impl Into<String>) {
        *self.draft_text.write().await = text.into();
    }

    pub fn is_generating(&self) -> bool {
        self.generating.is_active()
    }

    /// Asks the backend for a reply draft and adopts it when it has content.
    pub async fn generate(&self, case_id: &str) -> DraftOutcome {
        let Some(_guard) = self.generating.try_begin() else {
            tracing::warn!("[DraftWorkflow] Generation already in progress");
            return DraftOutcome::Busy;
        };

        tracing::debug!("[DraftWorkflow] Generating draft for case {}", case_id);

        let result = match self.service.generate_ai_draft(case_id).await {
            Ok(result) => result,
            Err(err) => {
                let message = format!("Failed to generate AI draft: {}", err.user_message());
                self.emitter.error(message.clone());
                return DraftOutcome::Failed { message };
            }
        };

        if !result.success {
            let message = result
                .server_error()
                .unwrap_or(GENERATE_FAILED_MESSAGE)
                .to_string();
            self.emitter.warning(message.clone());
            return DraftOutcome::Rejected { message };
        }

        match result.usable_text() {
            Some(text) => {
                self.set_text(text).await;
                self.emitter.success(GENERATED_MESSAGE);
                DraftOutcome::Generated
            }
            None => {
                self.emitter.warning(EMPTY_RESPONSE_MESSAGE);
                DraftOutcome::Empty
            }
        }
    }

    /// Copies the current draft to the clipboard.
    pub async fn copy(&self) -> CopyOutcome {
        if self.is_generating() {
            tracing::warn!("[DraftWorkflow] Copy ignored while generating");
            return CopyOutcome::Busy;
        }

        let text = self.text().await;
        if text.is_empty() {
            self.emitter.warning(NOTHING_TO_COPY_MESSAGE);
            return CopyOutcome::NothingToCopy;
        }

        let outcome = match self.clipboard.write_text(&text).await {
            Ok(()) => CopyOutcome::Copied,
            Err(err) => {
                tracing::warn!(
                    "[DraftWorkflow] Clipboard write rejected, using fallback: {}",
                    err
                );
                match copy_via_buffer(self.clipboard.as_ref(), &text) {
                    Ok(()) => CopyOutcome::CopiedViaFallback,
                    Err(err) => {
                        tracing::error!("[DraftWorkflow] Fallback copy failed: {}", err);
                        CopyOutcome::Failed
                    }
                }
            }
        };

        if outcome == CopyOutcome::Failed {
            self.emitter.error(COPY_FAILED_MESSAGE);
        } else {
            self.emitter.success(COPIED_MESSAGE);
        }
        outcome
    }
}

fn copy_via_buffer(clipboard: &dyn Clipboard, text: &str) -> Result<()> {
    let buffer = TransientBuffer::attach(clipboard, text)?;
    buffer.copy()
}
