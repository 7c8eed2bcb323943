//! Configuration service implementation.
//!
//! Loads [`CopilotConfig`] from `config.toml` (by default
//! `~/.config/case-triage/config.toml`) and applies environment overrides.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use triage_core::config::CopilotConfig;
use triage_core::error::{Result, TriageError};

use crate::paths::CopilotPaths;

/// Overrides `service.base_url`.
pub const BASE_URL_ENV: &str = "CASE_TRIAGE_BASE_URL";
/// Overrides `service.api_token`.
pub const API_TOKEN_ENV: &str = "CASE_TRIAGE_API_TOKEN";

/// Loads and caches the copilot configuration.
///
/// A missing or empty file yields the defaults. A file that does not parse is
/// an error rather than being silently replaced.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<CopilotConfig>>>,
}

impl ConfigService {
    /// Uses the platform config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<CopilotConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|_| TriageError::internal("config cache lock poisoned"))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut loaded = self.load()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut cached = self
            .config
            .write()
            .map_err(|_| TriageError::internal("config cache lock poisoned"))?;
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cached) = self.config.write() {
            *cached = None;
        }
    }

    fn load(&self) -> Result<CopilotConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => CopilotPaths::config_file().map_err(|e| TriageError::config(e.to_string()))?,
        };
        load_config_file(&path)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads `path` as TOML, falling back to defaults when it is absent or blank.
pub fn load_config_file(path: &Path) -> Result<CopilotConfig> {
    if !path.exists() {
        tracing::debug!(
            "[ConfigService] {} not found, using defaults",
            path.display()
        );
        return Ok(CopilotConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(CopilotConfig::default());
    }

    let config: CopilotConfig = toml::from_str(&content)?;
    tracing::debug!("[ConfigService] Loaded {}", path.display());
    Ok(config)
}

/// Applies environment overrides; empty values are ignored.
fn apply_env_overrides(config: &mut CopilotConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = non_empty(BASE_URL_ENV) {
        config.service.base_url = base_url;
    }
    if let Some(token) = non_empty(API_TOKEN_ENV) {
        config.service.api_token = Some(token);
    }
}
