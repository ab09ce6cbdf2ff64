use crate::app::{SelectionMode, SelectionResult};
use crate::clipboard::PasteboardBridge;
use crate::stack::{ContentKind, StackError, StackStore};
use crate::storage::Defaults;
use anyhow::{Context, Result};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause between writing the pasteboard and sending the paste keystroke.
pub const DEFAULT_PASTE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(ContentKind),
    NoSuchItem,
}

/// What applying a popup selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Restored(ContentKind),
    Deleted(usize),
    DeletedAll,
    Ignored,
}

#[derive(Debug)]
pub struct RestoreController {
    paste_delay: Duration,
}

impl Default for RestoreController {
    fn default() -> Self {
        Self::new(DEFAULT_PASTE_DELAY)
    }
}

impl RestoreController {
    pub fn new(paste_delay: Duration) -> Self {
        Self { paste_delay }
    }

    /// Puts the item at `index` back on the pasteboard and pastes it into
    /// the focused application. Missing items are a no-op.
    pub fn restore<D: Defaults>(
        &self,
        index: usize,
        store: &StackStore<D>,
        pasteboard: &mut dyn PasteboardBridge,
    ) -> Result<RestoreOutcome> {
        let Some(snapshot) = store.get(index) else {
            debug!(index, len = store.len(), "Nothing to restore at index");
            return Ok(RestoreOutcome::NoSuchItem);
        };

        pasteboard.clear()?;
        pasteboard
            .write(snapshot.content())
            .with_context(|| format!("Failed to restore item {}", index + 1))?;

        if !self.paste_delay.is_zero() {
            thread::sleep(self.paste_delay);
        }

        pasteboard.trigger_system_paste()?;
        info!(index, kind = %snapshot.kind(), "Restored clipboard item");

        Ok(RestoreOutcome::Restored(snapshot.kind()))
    }

    pub fn delete_at<D: Defaults>(
        &self,
        index: usize,
        store: &mut StackStore<D>,
    ) -> Result<(), StackError> {
        store.remove_at(index).map(|removed| {
            info!(index, kind = %removed.kind(), "Deleted clipboard item");
        })
    }

    pub fn delete_all<D: Defaults>(&self, store: &mut StackStore<D>) {
        let count = store.len();
        store.remove_all();
        info!(count, "Deleted all clipboard items");
    }

    /// Applies the answer of a selection popup shown in `mode`.
    pub fn apply<D: Defaults>(
        &self,
        selection: SelectionResult,
        mode: SelectionMode,
        store: &mut StackStore<D>,
        pasteboard: &mut dyn PasteboardBridge,
    ) -> Result<SelectionOutcome> {
        let outcome = match (mode, selection) {
            (SelectionMode::Restore, SelectionResult::Item(index)) => {
                match self.restore(index, store, pasteboard)? {
                    RestoreOutcome::Restored(kind) => SelectionOutcome::Restored(kind),
                    RestoreOutcome::NoSuchItem => SelectionOutcome::Ignored,
                }
            }
            (SelectionMode::Delete, SelectionResult::Item(index)) => {
                match self.delete_at(index, store) {
                    Ok(()) => SelectionOutcome::Deleted(index),
                    Err(e) => {
                        warn!("Ignoring delete selection: {e}");
                        SelectionOutcome::Ignored
                    }
                }
            }
            (SelectionMode::Delete, SelectionResult::DeleteAll) => {
                self.delete_all(store);
                SelectionOutcome::DeletedAll
            }
            (SelectionMode::Restore, SelectionResult::DeleteAll) => {
                warn!("Delete-all selection is not valid when pasting");
                SelectionOutcome::Ignored
            }
            (_, SelectionResult::Cancelled) => SelectionOutcome::Ignored,
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryPasteboard, PasteboardEvent};
    use crate::controller::classify;
    use crate::stack::{Content, ContentSnapshot};
    use crate::storage::MemoryDefaults;
    use pretty_assertions::assert_eq;

    fn store_with(labels: &[&str]) -> StackStore<MemoryDefaults> {
        let mut store = StackStore::open(MemoryDefaults::new());
        for label in labels.iter().rev() {
            store
                .push(ContentSnapshot::new(Content::Text(label.to_string())))
                .unwrap();
        }
        store
    }

    fn controller() -> RestoreController {
        RestoreController::new(Duration::ZERO)
    }

    #[test]
    fn test_restore_writes_then_pastes() {
        let store = store_with(&["A", "B"]);
        let mut pasteboard = MemoryPasteboard::new();

        let outcome = controller().restore(1, &store, &mut pasteboard).unwrap();

        assert_eq!(outcome, RestoreOutcome::Restored(ContentKind::Text));
        assert_eq!(
            pasteboard.events(),
            &[
                PasteboardEvent::Cleared,
                PasteboardEvent::Wrote(Content::Text("B".to_string())),
                PasteboardEvent::Pasted,
            ]
        );
        // Restoring does not reorder the stack.
        assert_eq!(store.get(0).unwrap().preview_label(), "A");
    }

    #[test]
    fn test_restore_writes_file_list_back() {
        let mut store = StackStore::open(MemoryDefaults::new());
        let uri = "file:///tmp/report.pdf".to_string();
        let files = Content::FileList(vec![uri.clone()]);
        store.push(ContentSnapshot::new(files.clone())).unwrap();
        let mut pasteboard = MemoryPasteboard::new();

        controller().restore(0, &store, &mut pasteboard).unwrap();

        assert_eq!(pasteboard.writes(), vec![&files]);
        assert_eq!(pasteboard.contents().file_list, Some(vec![uri]));
        assert_eq!(pasteboard.contents().text, None);
        // Copying it again captures a file list, not text.
        assert_eq!(classify(&mut pasteboard), Some(files));
    }

    #[test]
    fn test_restore_writes_rtf_back() {
        let mut store = StackStore::open(MemoryDefaults::new());
        let rtf = Content::RichText(br"{\rtf1\ansi {\b bold}}".to_vec());
        store.push(ContentSnapshot::new(rtf.clone())).unwrap();
        let mut pasteboard = MemoryPasteboard::new();

        controller().restore(0, &store, &mut pasteboard).unwrap();

        assert_eq!(classify(&mut pasteboard), Some(rtf));
    }

    #[test]
    fn test_restore_on_empty_store_is_noop() {
        let store = store_with(&[]);
        let mut pasteboard = MemoryPasteboard::new();

        let outcome = controller().restore(0, &store, &mut pasteboard).unwrap();

        assert_eq!(outcome, RestoreOutcome::NoSuchItem);
        assert!(pasteboard.events().is_empty());
    }

    #[test]
    fn test_restore_paste_failure_is_reported() {
        let store = store_with(&["A"]);
        let mut pasteboard = MemoryPasteboard::new();
        pasteboard.fail_triggers(true);

        assert!(controller().restore(0, &store, &mut pasteboard).is_err());
        assert_eq!(pasteboard.writes().len(), 1);
    }

    #[test]
    fn test_apply_delete_all_empties_store() {
        let mut store = store_with(&["A", "B", "C"]);
        let mut pasteboard = MemoryPasteboard::new();

        let outcome = controller()
            .apply(
                SelectionResult::DeleteAll,
                SelectionMode::Delete,
                &mut store,
                &mut pasteboard,
            )
            .unwrap();

        assert_eq!(outcome, SelectionOutcome::DeletedAll);
        assert!(store.is_empty());
        assert!(pasteboard.events().is_empty());
    }

    #[test]
    fn test_apply_delete_item() {
        let mut store = store_with(&["A", "B", "C"]);
        let mut pasteboard = MemoryPasteboard::new();

        let outcome = controller()
            .apply(
                SelectionResult::Item(1),
                SelectionMode::Delete,
                &mut store,
                &mut pasteboard,
            )
            .unwrap();

        assert_eq!(outcome, SelectionOutcome::Deleted(1));
        let labels: Vec<String> = store.items().iter().map(|s| s.preview_label()).collect();
        assert_eq!(labels, vec!["A", "C"]);
    }

    #[test]
    fn test_apply_out_of_range_delete_is_ignored() {
        let mut store = store_with(&["A"]);
        let mut pasteboard = MemoryPasteboard::new();

        let outcome = controller()
            .apply(
                SelectionResult::Item(9),
                SelectionMode::Delete,
                &mut store,
                &mut pasteboard,
            )
            .unwrap();

        assert_eq!(outcome, SelectionOutcome::Ignored);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_apply_cancel_and_invalid_combinations() {
        let mut store = store_with(&["A"]);
        let mut pasteboard = MemoryPasteboard::new();
        let restore = controller();

        for (selection, mode) in [
            (SelectionResult::Cancelled, SelectionMode::Restore),
            (SelectionResult::Cancelled, SelectionMode::Delete),
            (SelectionResult::DeleteAll, SelectionMode::Restore),
        ] {
            let outcome = restore
                .apply(selection, mode, &mut store, &mut pasteboard)
                .unwrap();
            assert_eq!(outcome, SelectionOutcome::Ignored);
        }
        assert_eq!(store.len(), 1);
        assert!(pasteboard.events().is_empty());
    }
}
