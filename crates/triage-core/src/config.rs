//! Copilot configuration model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/services/apexrest/case-triage";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CopilotConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how to reach the triage backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Transport-level timeout. The orchestration itself never times out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Base URL without trailing slashes; must be http(s) with a host.
    pub fn normalized_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(TriageError::config("service.base_url must not be empty"));
        }
        let Some((scheme, remainder)) = trimmed.split_once("://") else {
            return Err(TriageError::config(format!(
                "service.base_url must include a scheme: {trimmed}"
            )));
        };
        if !matches!(scheme, "http" | "https") || remainder.is_empty() || remainder.starts_with('/')
        {
            return Err(TriageError::config(format!(
                "service.base_url must use http:// or https:// and include a host: {trimmed}"
            )));
        }
        Ok(trimmed.to_string())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
