//! Single-flight guard for user-triggered workflows.

use std::sync::atomic::{AtomicBool, Ordering};

/// In-progress flag of one workflow.
///
/// Acquiring hands out a [`FlightGuard`]; the flag is cleared when the guard
/// drops, so every exit path (early return, `?`, panic unwinding) releases it.
#[derive(Debug, Default)]
pub struct InFlight {
    active: AtomicBool,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the workflow as running, or returns `None` if it already is.
    pub fn try_begin(&self) -> Option<FlightGuard<'_>> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard { flag: &self.active })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Holds an [`InFlight`] flag set until dropped.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
