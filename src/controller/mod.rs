pub mod capture;
pub mod restore;

pub use capture::{classify, CaptureController, CaptureOutcome, DEFAULT_COPY_DELAY};
pub use restore::{RestoreController, RestoreOutcome, SelectionOutcome, DEFAULT_PASTE_DELAY};
