pub mod snapshot;
pub mod store;
pub mod wire;

pub use snapshot::{Content, ContentKind, ContentSnapshot};
pub use store::{StackError, StackStore, DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY};
