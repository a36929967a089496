//! Host collaborator interface.
//!
//! The core never touches an editor, clipboard, or terminal directly; it
//! talks to a [`Host`] passed in explicitly. [`BufferHost`] is an in-memory
//! implementation backing the CLI and the test suite.

pub mod buffer;

pub use buffer::BufferHost;

use crate::error::Result;

/// Document text and cursor location captured at the start of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorContext {
    /// Document lines in order
    pub lines: Vec<String>,
    /// Cursor line (0-based)
    pub line: usize,
    /// Cursor column (0-based, in characters)
    pub column: usize,
}

/// Environment the paste and strip operations run against
pub trait Host {
    /// Text waiting to be pasted; may be empty
    fn clipboard_text(&self) -> Result<String>;

    /// Document lines and cursor position
    fn cursor(&self) -> Result<CursorContext>;

    /// Currently selected text, if any
    fn selection_text(&self) -> Option<String>;

    /// Replace the selection with `text`, or insert it at the cursor
    fn apply_edit(&mut self, text: &str) -> Result<()>;

    /// Show a user-facing message
    fn notify(&mut self, message: &str);
}
