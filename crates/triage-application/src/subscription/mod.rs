//! Remote-backed data subscriptions.
//!
//! A subscription is a data slot filled by a remote read keyed on the case
//! identifier. Every request carries a [`RefreshTicket`]; only the resolution
//! of the most recently issued ticket, for the case that is still current, is
//! applied. Older resolutions are dropped.
//!
//! # Module Structure
//!
//! - `Subscription`: loading/data/error state of one slot
//! - `manager`: the three slots of the copilot (`SubscriptionManager`)

mod manager;

pub use manager::SubscriptionManager;

use tokio::sync::RwLock;
use triage_core::error::Result;

/// Identifies one issued request of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    pub generation: u64,
    pub case_id: String,
}

/// State of one subscription.
///
/// `loading` stays set from request issue until the matching resolution
/// arrives. `data` from an earlier fetch is kept while a refresh is in flight.
#[derive(Debug, Clone)]
pub struct Subscription<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub loading: bool,
    generation: u64,
    last_ticket: Option<RefreshTicket>,
    loaded_for: Option<String>,
}

impl<T> Default for Subscription<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
            generation: 0,
            last_ticket: None,
            loaded_for: None,
        }
    }
}

impl<T> Subscription<T> {
    /// Handle of the most recently issued request.
    pub fn last_ticket(&self) -> Option<&RefreshTicket> {
        self.last_ticket.as_ref()
    }

    /// Case the current `data` was fetched for.
    pub fn loaded_for(&self) -> Option<&str> {
        self.loaded_for.as_deref()
    }
}

/// How a resolution was applied to its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Settlement {
    Loaded,
    Failed(String),
    Stale,
}

/// One subscription slot behind an async lock.
pub(crate) struct Slot<T> {
    name: &'static str,
    state: RwLock<Subscription<T>>,
}

impl<T: Clone> Slot<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(Subscription::default()),
        }
    }

    pub(crate) async fn snapshot(&self) -> Subscription<T> {
        self.state.read().await.clone()
    }

    /// Data only if it was fetched for `case_id`.
    pub(crate) async fn data_for(&self, case_id: &str) -> Option<T> {
        let state = self.state.read().await;
        if state.loaded_for.as_deref() == Some(case_id) {
            state.data.clone()
        } else {
            None
        }
    }

    pub(crate) async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Starts a request: sets `loading` and supersedes any earlier ticket.
    pub(crate) async fn issue(&self, case_id: &str) -> RefreshTicket {
        let mut state = self.state.write().await;
        state.generation += 1;
        let ticket = RefreshTicket {
            generation: state.generation,
            case_id: case_id.to_string(),
        };
        state.loading = true;
        state.last_ticket = Some(ticket.clone());
        ticket
    }

    /// Applies a resolution if its ticket is still the current one.
    pub(crate) async fn settle(
        &self,
        ticket: &RefreshTicket,
        current_case: Option<&str>,
        result: Result<T>,
    ) -> Settlement {
        let mut state = self.state.write().await;
        let superseded = state.last_ticket.as_ref() != Some(ticket)
            || current_case != Some(ticket.case_id.as_str());
        if superseded {
            tracing::debug!(
                "[Subscription:{}] Discarding stale resolution (generation {}, case {})",
                self.name,
                ticket.generation,
                ticket.case_id
            );
            return Settlement::Stale;
        }

        state.loading = false;
        match result {
            Ok(data) => {
                state.data = Some(data);
                state.loaded_for = Some(ticket.case_id.clone());
                state.error = None;
                Settlement::Loaded
            }
            Err(err) => {
                let message = err.user_message();
                state.error = Some(message.clone());
                Settlement::Failed(message)
            }
        }
    }

    /// Forgets everything, e.g. when the case identifier is cleared.
    ///
    /// The generation counter keeps counting so in-flight tickets stay stale.
    pub(crate) async fn reset(&self) {
        let mut state = self.state.write().await;
        state.data = None;
        state.error = None;
        state.loading = false;
        state.last_ticket = None;
        state.loaded_for = None;
    }
}
