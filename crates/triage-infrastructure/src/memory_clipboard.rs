//! In-process clipboard for hosts without a system clipboard.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use triage_core::clipboard::{BufferHandle, Clipboard};
use triage_core::error::{Result, TriageError};

/// Clipboard held in memory.
///
/// With `deny_writes` the primary write path is refused, the way a browser
/// refuses `navigator.clipboard` without permission, so callers exercise the
/// buffer fallback.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    deny_writes: bool,
    contents: Mutex<Option<String>>,
    buffers: Mutex<HashMap<BufferHandle, String>>,
    next_handle: AtomicU64,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denying_writes() -> Self {
        Self {
            deny_writes: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }

    /// Number of buffers currently attached.
    pub fn attached_buffers(&self) -> usize {
        self.buffers.lock().map(|b| b.len()).unwrap_or(0)
    }

    fn store(&self, text: String) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| TriageError::internal("clipboard lock poisoned"))?;
        *contents = Some(text);
        Ok(())
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.deny_writes {
            return Err(TriageError::internal("clipboard write not permitted"));
        }
        self.store(text.to_string())
    }

    fn attach_buffer(&self, text: &str) -> Result<BufferHandle> {
        let handle = BufferHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
        self.buffers
            .lock()
            .map_err(|_| TriageError::internal("clipboard lock poisoned"))?
            .insert(handle, text.to_string());
        Ok(handle)
    }

    fn copy_selection(&self, buffer: BufferHandle) -> Result<()> {
        let text = self
            .buffers
            .lock()
            .map_err(|_| TriageError::internal("clipboard lock poisoned"))?
            .get(&buffer)
            .cloned()
            .ok_or_else(|| TriageError::internal(format!("buffer {} not attached", buffer.0)))?;
        self.store(text)
    }

    fn detach_buffer(&self, buffer: BufferHandle) {
        if let Ok(mut buffers) = self.buffers.lock() {
            buffers.remove(&buffer);
        }
    }
}
