pub mod mode;
pub mod selection;

pub use crate::keybindings::Action;
pub use mode::SelectionMode;
pub use selection::{ScriptedSelector, SelectionResult, Selector};

use crate::clipboard::PasteboardBridge;
use crate::controller::{
    CaptureController, CaptureOutcome, RestoreController, RestoreOutcome, SelectionOutcome,
};
use crate::notifier::Notifier;
use crate::stack::{StackError, StackStore};
use crate::storage::Defaults;
use anyhow::Result;
use std::time::Duration;
use tracing::debug;

/// What handling one action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Capture(CaptureOutcome),
    Selection(SelectionOutcome),
}

/// Owns the stack and every collaborator the shortcut handlers need.
pub struct App<D: Defaults> {
    store: StackStore<D>,
    pasteboard: Box<dyn PasteboardBridge>,
    notifier: Box<dyn Notifier>,
    selector: Box<dyn Selector>,
    capture: CaptureController,
    restore: RestoreController,
}

impl<D: Defaults> App<D> {
    pub fn new(
        store: StackStore<D>,
        pasteboard: Box<dyn PasteboardBridge>,
        notifier: Box<dyn Notifier>,
        selector: Box<dyn Selector>,
    ) -> Self {
        Self {
            store,
            pasteboard,
            notifier,
            selector,
            capture: CaptureController::default(),
            restore: RestoreController::default(),
        }
    }

    pub fn with_delays(mut self, copy_delay: Duration, paste_delay: Duration) -> Self {
        self.capture = CaptureController::new(copy_delay);
        self.restore = RestoreController::new(paste_delay);
        self
    }

    pub fn store(&self) -> &StackStore<D> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StackStore<D> {
        &mut self.store
    }

    pub fn on_capture(&mut self) -> CaptureOutcome {
        self.capture.capture(
            &mut self.store,
            self.pasteboard.as_mut(),
            self.notifier.as_ref(),
        )
    }

    pub fn on_restore_popup(&mut self) -> Result<SelectionOutcome> {
        self.run_popup(SelectionMode::Restore)
    }

    pub fn on_delete_popup(&mut self) -> Result<SelectionOutcome> {
        self.run_popup(SelectionMode::Delete)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<ActionOutcome> {
        debug!(%action, "Dispatching action");
        let outcome = match action {
            Action::CaptureToStack => ActionOutcome::Capture(self.on_capture()),
            Action::PasteFromStack => ActionOutcome::Selection(self.on_restore_popup()?),
            Action::DeleteFromStack => ActionOutcome::Selection(self.on_delete_popup()?),
        };
        Ok(outcome)
    }

    /// Restores without a popup, for callers that already know the index.
    pub fn restore_at(&mut self, index: usize) -> Result<RestoreOutcome> {
        self.restore
            .restore(index, &self.store, self.pasteboard.as_mut())
    }

    pub fn delete_at(&mut self, index: usize) -> Result<(), StackError> {
        self.restore.delete_at(index, &mut self.store)
    }

    pub fn delete_all(&mut self) {
        self.restore.delete_all(&mut self.store);
    }

    fn run_popup(&mut self, mode: SelectionMode) -> Result<SelectionOutcome> {
        let selection = self.selector.present(self.store.items(), mode)?;
        debug!(%mode, ?selection, "Popup closed");
        self.restore.apply(
            selection,
            mode,
            &mut self.store,
            self.pasteboard.as_mut(),
        )
    }
}
