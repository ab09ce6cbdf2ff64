use super::mode::SelectionMode;
use crate::stack::ContentSnapshot;
use anyhow::Result;

/// Answer from a selection popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionResult {
    Item(usize),
    DeleteAll,
    Cancelled,
}

/// External selection UI. Blocks until the user picks or dismisses.
pub trait Selector {
    fn present(&mut self, items: &[ContentSnapshot], mode: SelectionMode)
        -> Result<SelectionResult>;
}

/// Selector that answers from a fixed script, for tests and scripted use.
#[derive(Debug, Default)]
pub struct ScriptedSelector {
    answers: Vec<SelectionResult>,
    presented: Vec<(usize, SelectionMode)>,
}

impl ScriptedSelector {
    pub fn new(answers: Vec<SelectionResult>) -> Self {
        Self {
            answers,
            presented: Vec::new(),
        }
    }

    /// `(item count, mode)` for every presentation so far.
    pub fn presented(&self) -> &[(usize, SelectionMode)] {
        &self.presented
    }
}

impl Selector for ScriptedSelector {
    fn present(
        &mut self,
        items: &[ContentSnapshot],
        mode: SelectionMode,
    ) -> Result<SelectionResult> {
        self.presented.push((items.len(), mode));
        if self.answers.is_empty() {
            return Ok(SelectionResult::Cancelled);
        }
        Ok(self.answers.remove(0))
    }
}
