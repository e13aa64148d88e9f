//! Input plumbing for the edit buttons: per-frame snapshots and the
//! minimum-interval gate that keeps a held button from spamming edits.

pub mod debounce;
pub mod frame;

pub use debounce::{ClickDebouncer, DEFAULT_CLICK_INTERVAL};
pub use frame::{ClickGate, EditRequests, FrameInput};
