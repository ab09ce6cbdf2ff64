use super::PasteboardBridge;
use crate::stack::Content;
use anyhow::{bail, Result};

/// Contents a pasteboard can hold at once, one slot per representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteboardContents {
    pub text: Option<String>,
    pub image: Option<Vec<u8>>,
    pub file_list: Option<Vec<String>>,
    pub rich_text: Option<Vec<u8>>,
}

impl PasteboardContents {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }
}

impl From<&Content> for PasteboardContents {
    fn from(content: &Content) -> Self {
        let mut contents = Self::default();
        match content {
            Content::Text(text) => contents.text = Some(text.clone()),
            Content::Image(bytes) => contents.image = Some(bytes.clone()),
            Content::FileList(files) => contents.file_list = Some(files.clone()),
            Content::RichText(bytes) => contents.rich_text = Some(bytes.clone()),
        }
        contents
    }
}

/// Event recorded by [`MemoryPasteboard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteboardEvent {
    Cleared,
    Wrote(Content),
    Copied,
    Pasted,
}

/// In-process pasteboard that stands in for the OS one.
///
/// A selection queued with [`MemoryPasteboard::select`] plays the part of
/// the focused application: the next synthetic copy places it on the
/// pasteboard.
#[derive(Debug, Default)]
pub struct MemoryPasteboard {
    contents: PasteboardContents,
    change_count: u64,
    selection: Option<PasteboardContents>,
    fail_triggers: bool,
    events: Vec<PasteboardEvent>,
}

impl MemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents as another process would.
    pub fn set_contents(&mut self, contents: PasteboardContents) {
        self.contents = contents;
        self.change_count += 1;
    }

    pub fn contents(&self) -> &PasteboardContents {
        &self.contents
    }

    /// Queues what the focused application will copy on the next trigger.
    pub fn select(&mut self, selection: PasteboardContents) {
        self.selection = Some(selection);
    }

    /// Makes synthetic copy/paste fail, as without input permissions.
    pub fn fail_triggers(&mut self, fail: bool) {
        self.fail_triggers = fail;
    }

    pub fn events(&self) -> &[PasteboardEvent] {
        &self.events
    }

    pub fn writes(&self) -> Vec<&Content> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PasteboardEvent::Wrote(content) => Some(content),
                _ => None,
            })
            .collect()
    }
}

impl PasteboardBridge for MemoryPasteboard {
    fn change_count(&mut self) -> u64 {
        self.change_count
    }

    fn read_text(&mut self) -> Option<String> {
        self.contents.text.clone()
    }

    fn read_image(&mut self) -> Option<Vec<u8>> {
        self.contents.image.clone()
    }

    fn read_file_list(&mut self) -> Option<Vec<String>> {
        self.contents.file_list.clone()
    }

    fn read_rich_text(&mut self) -> Option<Vec<u8>> {
        self.contents.rich_text.clone()
    }

    fn clear(&mut self) -> Result<()> {
        self.contents = PasteboardContents::default();
        self.change_count += 1;
        self.events.push(PasteboardEvent::Cleared);
        Ok(())
    }

    fn write(&mut self, content: &Content) -> Result<()> {
        self.contents = PasteboardContents::from(content);
        self.change_count += 1;
        self.events.push(PasteboardEvent::Wrote(content.clone()));
        Ok(())
    }

    fn trigger_system_copy(&mut self) -> Result<()> {
        if self.fail_triggers {
            bail!("Synthetic copy is not permitted");
        }
        self.events.push(PasteboardEvent::Copied);
        if let Some(selection) = self.selection.take() {
            self.set_contents(selection);
        }
        Ok(())
    }

    fn trigger_system_paste(&mut self) -> Result<()> {
        if self.fail_triggers {
            bail!("Synthetic paste is not permitted");
        }
        self.events.push(PasteboardEvent::Pasted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_moves_selection_onto_pasteboard() {
        let mut pasteboard = MemoryPasteboard::new();
        pasteboard.select(PasteboardContents::text("selected"));

        let before = pasteboard.change_count();
        pasteboard.trigger_system_copy().unwrap();

        assert_eq!(pasteboard.read_text().as_deref(), Some("selected"));
        assert!(pasteboard.change_count() > before);
    }

    #[test]
    fn test_copy_without_selection_keeps_contents() {
        let mut pasteboard = MemoryPasteboard::new();
        pasteboard.set_contents(PasteboardContents::text("old"));
        let before = pasteboard.change_count();

        pasteboard.trigger_system_copy().unwrap();

        assert_eq!(pasteboard.change_count(), before);
        assert_eq!(pasteboard.read_text().as_deref(), Some("old"));
    }

    #[test]
    fn test_write_replaces_all_representations() {
        let mut pasteboard = MemoryPasteboard::new();
        pasteboard.set_contents(PasteboardContents {
            text: Some("t".to_string()),
            image: Some(vec![1]),
            ..PasteboardContents::default()
        });

        pasteboard.write(&Content::RichText(br"{\rtf1 {\i x}}".to_vec())).unwrap();

        assert_eq!(pasteboard.read_text(), None);
        assert_eq!(pasteboard.read_image(), None);
        assert_eq!(pasteboard.read_rich_text(), Some(br"{\rtf1 {\i x}}".to_vec()));
        assert_eq!(pasteboard.writes().len(), 1);
    }

    #[test]
    fn test_failing_triggers() {
        let mut pasteboard = MemoryPasteboard::new();
        pasteboard.fail_triggers(true);
        assert!(pasteboard.trigger_system_copy().is_err());
        assert!(pasteboard.trigger_system_paste().is_err());
        assert!(pasteboard.events().is_empty());
    }
}
