//! Application layer for the case triage copilot.
//!
//! This crate coordinates the remote triage service, the host platform and the
//! operator's session: data subscriptions, action execution, draft generation
//! and audit log persistence, composed by [`CaseTriageCopilot`].

pub mod action_executor;
pub mod copilot;
pub mod draft_workflow;
pub mod emitter;
pub mod flight;
pub mod log_workflow;
pub mod session_log;
pub mod subscription;
pub mod view_state;

#[cfg(test)]
mod testing;

pub use action_executor::{ActionExecutor, ActionOutcome};
pub use copilot::{CaseTriageCopilot, CopilotDependencies, CopilotEvent};
pub use draft_workflow::{CopyOutcome, DraftOutcome, DraftWorkflow};
pub use emitter::NotificationEmitter;
pub use log_workflow::{LogPersistenceWorkflow, SaveOutcome};
pub use session_log::SessionActionLog;
pub use subscription::{RefreshTicket, Subscription, SubscriptionManager};
pub use view_state::CopilotViewState;
