//! Infrastructure adapters for the case triage copilot.
//!
//! - `http_service`: the triage backend over HTTP
//! - `config_service` / `paths`: `config.toml` loading
//! - `logging`: `tracing` subscriber setup
//! - `channel_platform`: notifications and record changes over a channel
//! - `memory_clipboard`: in-process clipboard

pub mod channel_platform;
pub mod config_service;
pub mod http_service;
pub mod logging;
pub mod memory_clipboard;
pub mod paths;

pub use crate::channel_platform::{ChannelPlatform, PlatformEvent};
pub use crate::config_service::ConfigService;
pub use crate::http_service::HttpCaseTriageService;
pub use crate::logging::init_tracing;
pub use crate::memory_clipboard::MemoryClipboard;
