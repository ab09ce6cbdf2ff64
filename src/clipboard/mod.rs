//! Boundary to the OS pasteboard.
//!
//! The stack controllers only talk to [`PasteboardBridge`]. The system
//! implementation is backed by `clipboard-rs` for contents and `enigo` for the
//! synthetic copy/paste keystrokes sent to the focused application.

pub mod memory;
pub mod system;

pub use memory::{MemoryPasteboard, PasteboardContents, PasteboardEvent};
pub use system::SystemPasteboard;

use crate::stack::Content;
use anyhow::Result;

pub trait PasteboardBridge {
    /// Counter that moves whenever the pasteboard contents change.
    fn change_count(&mut self) -> u64;

    fn read_text(&mut self) -> Option<String>;

    /// Bitmap contents, PNG-encoded.
    fn read_image(&mut self) -> Option<Vec<u8>>;

    fn read_file_list(&mut self) -> Option<Vec<String>>;

    fn read_rich_text(&mut self) -> Option<Vec<u8>>;

    fn clear(&mut self) -> Result<()>;

    /// Writes `content` in its kind-specific representation.
    fn write(&mut self, content: &Content) -> Result<()>;

    /// Asks the focused application to copy its selection.
    fn trigger_system_copy(&mut self) -> Result<()>;

    /// Asks the focused application to paste.
    fn trigger_system_paste(&mut self) -> Result<()>;
}
