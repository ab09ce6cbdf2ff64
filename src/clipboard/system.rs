use super::PasteboardBridge;
use crate::stack::Content;
use crate::utils::file_uri::to_file_uri;
use anyhow::{Context, Result, anyhow};
use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat, RustImageData};
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

#[cfg(target_os = "macos")]
const SHORTCUT_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const SHORTCUT_MODIFIER: Key = Key::Control;

type BackendError = Box<dyn std::error::Error + Send + Sync>;

fn backend_err(what: &str) -> impl FnOnce(BackendError) -> anyhow::Error + '_ {
    move |e| anyhow!("{what}: {e}")
}

/// Pasteboard bridge over the system clipboard.
///
/// The clipboard backend has no change counter, so one is kept here: it
/// moves whenever the fingerprint of the readable contents differs from the
/// last one observed, and on every write or clear made through this bridge.
pub struct SystemPasteboard {
    ctx: ClipboardContext,
    change_count: u64,
    last_fingerprint: Option<u64>,
}

impl SystemPasteboard {
    pub fn new() -> Result<Self> {
        let ctx = ClipboardContext::new()
            .map_err(backend_err("Failed to access system clipboard"))?;
        let mut pasteboard = Self {
            ctx,
            change_count: 0,
            last_fingerprint: None,
        };
        pasteboard.last_fingerprint = Some(pasteboard.fingerprint());
        Ok(pasteboard)
    }

    fn fingerprint(&mut self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.ctx.available_formats().ok().hash(&mut hasher);
        self.read_text().hash(&mut hasher);
        self.read_rich_text().hash(&mut hasher);
        self.read_file_list().hash(&mut hasher);
        self.read_image().hash(&mut hasher);
        hasher.finish()
    }

    fn note_local_change(&mut self) {
        self.change_count += 1;
        self.last_fingerprint = Some(self.fingerprint());
    }

    fn send_shortcut(&self, key: char) -> Result<()> {
        let mut enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("Failed to open input connection: {e:?}"))?;

        enigo
            .key(SHORTCUT_MODIFIER, Direction::Press)
            .map_err(|e| anyhow!("Failed to press modifier: {e:?}"))?;
        let clicked = enigo.key(Key::Unicode(key), Direction::Click);
        // Always release the modifier, even when the click failed.
        let released = enigo.key(SHORTCUT_MODIFIER, Direction::Release);

        clicked.map_err(|e| anyhow!("Failed to send '{key}' keystroke: {e:?}"))?;
        released.map_err(|e| anyhow!("Failed to release modifier: {e:?}"))?;
        Ok(())
    }
}

impl PasteboardBridge for SystemPasteboard {
    fn change_count(&mut self) -> u64 {
        let current = self.fingerprint();
        if self.last_fingerprint != Some(current) {
            self.change_count += 1;
            self.last_fingerprint = Some(current);
        }
        self.change_count
    }

    fn read_text(&mut self) -> Option<String> {
        if !self.ctx.has(ContentFormat::Text) {
            return None;
        }
        match self.ctx.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("Failed to read text from pasteboard: {e}");
                None
            }
        }
    }

    fn read_image(&mut self) -> Option<Vec<u8>> {
        if !self.ctx.has(ContentFormat::Image) {
            return None;
        }
        let png = self
            .ctx
            .get_image()
            .and_then(|image| image.to_png())
            .map(|png| png.get_bytes().to_vec());
        match png {
            Ok(png) => Some(png),
            Err(e) => {
                debug!("Failed to read image from pasteboard: {e}");
                None
            }
        }
    }

    /// File entries as `file://` URIs, in pasteboard order.
    fn read_file_list(&mut self) -> Option<Vec<String>> {
        if !self.ctx.has(ContentFormat::Files) {
            return None;
        }
        match self.ctx.get_files() {
            Ok(files) => Some(files.iter().map(|f| to_file_uri(f)).collect()),
            Err(e) => {
                debug!("Failed to read file list from pasteboard: {e}");
                None
            }
        }
    }

    /// RTF document bytes.
    fn read_rich_text(&mut self) -> Option<Vec<u8>> {
        if !self.ctx.has(ContentFormat::Rtf) {
            return None;
        }
        match self.ctx.get_rich_text() {
            Ok(rtf) => Some(rtf.into_bytes()),
            Err(e) => {
                debug!("Failed to read RTF from pasteboard: {e}");
                None
            }
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.ctx
            .clear()
            .map_err(backend_err("Failed to clear system clipboard"))?;
        self.note_local_change();
        Ok(())
    }

    fn write(&mut self, content: &Content) -> Result<()> {
        match content {
            Content::Text(text) => self
                .ctx
                .set_text(text.clone())
                .map_err(backend_err("Failed to copy text to clipboard"))?,
            Content::Image(png) => {
                let image = RustImageData::from_bytes(png)
                    .map_err(backend_err("Failed to decode stored image"))?;
                self.ctx
                    .set_image(image)
                    .map_err(backend_err("Failed to copy image to clipboard"))?
            }
            Content::FileList(files) => self
                .ctx
                .set_files(files.clone())
                .map_err(backend_err("Failed to copy file list to clipboard"))?,
            Content::RichText(bytes) => {
                let rtf = String::from_utf8(bytes.clone())
                    .context("Stored RTF is not valid UTF-8")?;
                self.ctx
                    .set_rich_text(rtf)
                    .map_err(backend_err("Failed to copy RTF to clipboard"))?
            }
        }
        self.note_local_change();
        Ok(())
    }

    fn trigger_system_copy(&mut self) -> Result<()> {
        self.send_shortcut('c')
    }

    fn trigger_system_paste(&mut self) -> Result<()> {
        self.send_shortcut('v')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These need a display server and clipboard access.

    #[test]
    #[ignore]
    fn test_text_write_moves_change_count() {
        let mut pasteboard = SystemPasteboard::new().unwrap();
        let before = pasteboard.change_count();
        pasteboard
            .write(&Content::Text("clipstack test".to_string()))
            .unwrap();
        assert!(pasteboard.change_count() > before);
        assert_eq!(pasteboard.read_text().as_deref(), Some("clipstack test"));
    }

    #[test]
    #[ignore]
    fn test_file_list_is_written_as_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report one.txt");
        std::fs::write(&file, "x").unwrap();
        let uri = to_file_uri(&file.to_string_lossy());

        let mut pasteboard = SystemPasteboard::new().unwrap();
        pasteboard
            .write(&Content::FileList(vec![uri.clone()]))
            .unwrap();

        assert_eq!(pasteboard.read_file_list(), Some(vec![uri]));
    }

    #[test]
    #[ignore]
    fn test_rtf_is_written_as_rtf() {
        let rtf = r"{\rtf1\ansi {\b bold} plain}".to_string();
        let mut pasteboard = SystemPasteboard::new().unwrap();
        pasteboard
            .write(&Content::RichText(rtf.clone().into_bytes()))
            .unwrap();

        let read = pasteboard.read_rich_text().unwrap();
        assert!(String::from_utf8(read).unwrap().contains(r"{\b bold}"));
    }
}
