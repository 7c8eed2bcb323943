//! Clipboard access offered by the host platform.

use async_trait::async_trait;

use crate::error::Result;

/// Identifies an off-screen text buffer attached by [`Clipboard::attach_buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Platform clipboard with a degraded, synchronous fallback path.
///
/// The primary path is [`write_text`](Clipboard::write_text). When the host
/// rejects it, callers fall back to attaching a transient buffer, selecting
/// and copying its contents, and detaching it again.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Writes text through the platform clipboard API.
    async fn write_text(&self, text: &str) -> Result<()>;

    /// Attaches an off-screen buffer holding `text`.
    fn attach_buffer(&self, text: &str) -> Result<BufferHandle>;

    /// Selects the buffer's contents and issues a copy command.
    fn copy_selection(&self, buffer: BufferHandle) -> Result<()>;

    /// Removes a buffer previously attached.
    fn detach_buffer(&self, buffer: BufferHandle);
}

/// Scoped off-screen buffer; detached when dropped, whatever the copy outcome.
pub struct TransientBuffer<'a> {
    clipboard: &'a dyn Clipboard,
    handle: BufferHandle,
}

impl<'a> TransientBuffer<'a> {
    pub fn attach(clipboard: &'a dyn Clipboard, text: &str) -> Result<Self> {
        let handle = clipboard.attach_buffer(text)?;
        Ok(Self { clipboard, handle })
    }

    pub fn copy(&self) -> Result<()> {
        self.clipboard.copy_selection(self.handle)
    }
}

impl Drop for TransientBuffer<'_> {
    fn drop(&mut self) {
        self.clipboard.detach_buffer(self.handle);
    }
}
