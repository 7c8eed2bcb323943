//! Error types for the case triage copilot.

use serde_json::Value;
use thiserror::Error;

/// Message shown when a failure payload carries nothing readable.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// A shared error type for every layer of the copilot.
///
/// Remote failures keep the raw payload returned by the backend so the
/// normalizer can pick the most specific message out of it at display time.
#[derive(Error, Debug, Clone)]
pub enum TriageError {
    /// The backend answered with a failure payload (non-success status).
    #[error("Remote procedure failed: {}", normalize_error(.payload))]
    Remote {
        status: Option<u16>,
        payload: Value,
    },

    /// The request never produced a response (connection, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TriageError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Remote error from a status code and a failure payload.
    pub fn remote(status: Option<u16>, payload: Value) -> Self {
        Self::Remote { status, payload }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the backend itself rejected the call.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Check if the call failed before reaching the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the text an operator should see for this error.
    ///
    /// Remote payloads go through [`normalize_error`]; transport failures
    /// surface their message verbatim; everything else uses its display text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { payload, .. } => normalize_error(payload),
            Self::Transport(message) if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Reduces a heterogeneous failure payload to one display string.
///
/// Lookup order:
/// 1. the payload itself when it is a string
/// 2. `body.message`
/// 3. `message`
/// 4. `body` as a list of sub-errors, their messages joined with `", "`
/// 5. [`UNEXPECTED_ERROR_MESSAGE`]
///
/// Empty messages count as missing. Never panics, whatever the shape.
pub fn normalize_error(error: &Value) -> String {
    if let Some(message) = non_empty_str(Some(error)) {
        return message.to_string();
    }

    if let Some(message) = non_empty_str(error.pointer("/body/message")) {
        return message.to_string();
    }

    if let Some(message) = non_empty_str(error.get("message")) {
        return message.to_string();
    }

    if let Some(Value::Array(items)) = error.get("body") {
        let messages: Vec<&str> = items
            .iter()
            .filter_map(|item| non_empty_str(item.get("message")))
            .collect();
        if !messages.is_empty() {
            return messages.join(", ");
        }
    }

    UNEXPECTED_ERROR_MESSAGE.to_string()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TriageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TriageError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, TriageError>`.
pub type Result<T> = std::result::Result<T, TriageError>;
