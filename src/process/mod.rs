//! Paste and strip pipelines
//!
//! Composes the analyzer, target resolver and re-indenter against a host,
//! and provides the stream pipeline used by the batch strip mode.

pub mod paste;

pub use paste::{smart_paste, strip_file, strip_selection, PasteOutcome};
