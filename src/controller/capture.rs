use crate::clipboard::PasteboardBridge;
use crate::notifier::Notifier;
use crate::stack::{Content, ContentKind, ContentSnapshot, StackError, StackStore};
use crate::storage::Defaults;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long the focused application gets to fill the pasteboard after the
/// synthetic copy. There is no completion signal, so this is a best-effort
/// wait.
pub const DEFAULT_COPY_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured(ContentKind),
    StackFull,
    NothingToCapture,
    CopyFailed,
}

#[derive(Debug)]
pub struct CaptureController {
    copy_delay: Duration,
    last_change_count: Option<u64>,
}

impl Default for CaptureController {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_DELAY)
    }
}

impl CaptureController {
    pub fn new(copy_delay: Duration) -> Self {
        Self {
            copy_delay,
            last_change_count: None,
        }
    }

    pub fn last_change_count(&self) -> Option<u64> {
        self.last_change_count
    }

    /// Copies the focused application's selection onto the top of the stack.
    pub fn capture<D: Defaults>(
        &mut self,
        store: &mut StackStore<D>,
        pasteboard: &mut dyn PasteboardBridge,
        notifier: &dyn Notifier,
    ) -> CaptureOutcome {
        if store.is_full() {
            info!(capacity = store.capacity(), "Stack is full, skipping capture");
            notifier.stack_full(store.capacity());
            return CaptureOutcome::StackFull;
        }

        let before = pasteboard.change_count();
        debug!(change_count = before, "Starting capture");

        if let Err(e) = pasteboard.trigger_system_copy() {
            warn!("Failed to send copy command: {e:#}");
            self.last_change_count = Some(pasteboard.change_count());
            return CaptureOutcome::CopyFailed;
        }

        if !self.copy_delay.is_zero() {
            thread::sleep(self.copy_delay);
        }

        let after = pasteboard.change_count();
        if after == before {
            // Not authoritative: classification below decides.
            debug!(change_count = after, "Pasteboard change count did not move");
        }

        let outcome = match classify(pasteboard) {
            Some(content) => {
                let kind = content.kind();
                match store.push(ContentSnapshot::new(content)) {
                    Ok(()) => {
                        info!(%kind, items = store.len(), "Captured clipboard item");
                        CaptureOutcome::Captured(kind)
                    }
                    Err(StackError::CapacityExceeded { capacity }) => {
                        notifier.stack_full(capacity);
                        CaptureOutcome::StackFull
                    }
                    Err(e) => {
                        warn!("Failed to push captured item: {e}");
                        CaptureOutcome::NothingToCapture
                    }
                }
            }
            None => {
                debug!("No supported content types found in pasteboard");
                CaptureOutcome::NothingToCapture
            }
        };

        self.last_change_count = Some(pasteboard.change_count());
        outcome
    }
}

/// Picks the one representation to keep: text, then image, then file
/// list, then rich text.
pub fn classify(pasteboard: &mut dyn PasteboardBridge) -> Option<Content> {
    if let Some(text) = pasteboard.read_text().filter(|t| !t.is_empty()) {
        return Some(Content::Text(text));
    }
    if let Some(image) = pasteboard.read_image().filter(|i| !i.is_empty()) {
        return Some(Content::Image(image));
    }
    if let Some(files) = pasteboard.read_file_list().filter(|f| !f.is_empty()) {
        return Some(Content::FileList(files));
    }
    if let Some(rich) = pasteboard.read_rich_text().filter(|r| !r.is_empty()) {
        return Some(Content::RichText(rich));
    }
    None
}
