pub mod file;
pub mod memory;

pub use file::FileDefaults;
pub use memory::MemoryDefaults;

use anyhow::Result;

/// Key holding the serialized clipboard stack.
pub const CLIPBOARD_STACK_KEY: &str = "clipboardStack";

/// Key holding the stack capacity preference.
pub const MAX_STACK_SIZE_KEY: &str = "maxStackSize";

/// Key-value store of opaque bytes, the persistence medium for the stack
/// and its preferences.
pub trait Defaults {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}
