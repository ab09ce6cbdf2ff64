use crate::app::{SelectionMode, SelectionResult};
use crate::stack::ContentSnapshot;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Items past this many have no digit key and are picked with the arrows.
pub const DIGIT_KEYS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTarget {
    Item(usize),
    DeleteAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupRow {
    pub key: Option<char>,
    pub label: String,
    pub time: String,
    pub target: RowTarget,
}

/// Everything the popup shows, plus the highlighted row.
#[derive(Debug, Clone)]
pub struct PopupState {
    pub mode: SelectionMode,
    pub rows: Vec<PopupRow>,
    pub cursor: usize,
    pub total_items: usize,
}

impl PopupState {
    pub fn new(items: &[ContentSnapshot], mode: SelectionMode) -> Self {
        let mut rows: Vec<PopupRow> = items
            .iter()
            .enumerate()
            .map(|(index, snapshot)| PopupRow {
                key: key_for_index(index),
                label: snapshot.preview_label(),
                time: snapshot
                    .captured_at()
                    .with_timezone(&Local)
                    .format("%H:%M")
                    .to_string(),
                target: RowTarget::Item(index),
            })
            .collect();

        if mode == SelectionMode::Delete && !rows.is_empty() {
            // '0' already belongs to the tenth item from ten items on.
            let key = if items.len() < DIGIT_KEYS { '0' } else { 'a' };
            rows.push(PopupRow {
                key: Some(key),
                label: "Delete All".to_string(),
                time: String::new(),
                target: RowTarget::DeleteAll,
            });
        }

        Self {
            mode,
            rows,
            cursor: 0,
            total_items: items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the answer once the key settles the popup.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SelectionResult> {
        if self.is_empty() {
            return Some(SelectionResult::Cancelled);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(SelectionResult::Cancelled);
        }

        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(self.rows.len() - 1);
                None
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1) % self.rows.len();
                None
            }
            KeyCode::Enter => self.rows.get(self.cursor).map(|row| result_for(&row.target)),
            KeyCode::Char(c) => Some(
                self.rows
                    .iter()
                    .find(|row| row.key == Some(c.to_ascii_lowercase()))
                    .map(|row| result_for(&row.target))
                    .unwrap_or(SelectionResult::Cancelled),
            ),
            _ => Some(SelectionResult::Cancelled),
        }
    }
}

fn key_for_index(index: usize) -> Option<char> {
    match index {
        0..=8 => Some(char::from(b'1' + index as u8)),
        9 => Some('0'),
        _ => None,
    }
}

fn result_for(target: &RowTarget) -> SelectionResult {
    match target {
        RowTarget::Item(index) => SelectionResult::Item(*index),
        RowTarget::DeleteAll => SelectionResult::DeleteAll,
    }
}
