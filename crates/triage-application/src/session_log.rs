//! Actions taken during the current session, pending the next log save.

use tokio::sync::RwLock;
use triage_core::action::ActionType;

/// Ordered, in-memory list of actions taken since the last saved log.
///
/// Only the action executor appends and only the log persistence workflow
/// clears; both mutators are crate-private.
#[derive(Debug, Default)]
pub struct SessionActionLog {
    actions: RwLock<Vec<ActionType>>,
}

impl SessionActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Vec<ActionType> {
        self.actions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.actions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.actions.read().await.is_empty()
    }

    pub(crate) async fn record(&self, action: ActionType) {
        self.actions.write().await.push(action);
    }

    /// Drops the first `saved` entries, i.e. the ones captured by a save.
    ///
    /// Entries appended after the snapshot was taken are kept.
    pub(crate) async fn clear_saved(&self, saved: usize) {
        let mut actions = self.actions.write().await;
        let saved = saved.min(actions.len());
        actions.drain(..saved);
    }
}
