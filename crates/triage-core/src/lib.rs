//! Domain layer for the case triage copilot.
//!
//! Holds the data model exchanged with the triage backend, the error type and
//! its normalizer, and the traits through which the application layer talks to
//! the remote service and the host platform.

pub mod action;
pub mod case;
pub mod clipboard;
pub mod config;
pub mod draft;
pub mod error;
pub mod format;
pub mod log;
pub mod notification;
pub mod service;
pub mod triage;
pub mod wire;

// Re-export common error type
pub use error::{Result, TriageError, normalize_error};
