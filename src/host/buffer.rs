//! In-memory host backed by a plain string document.

use crate::error::Result;
use crate::host::{CursorContext, Host};

/// Host implementation over an in-memory document
///
/// Holds the document as a line vector plus a clipboard string, a cursor,
/// and an optional line-range selection. Used by the CLI (the document is a
/// file read into memory) and by tests (literal fixtures).
#[derive(Debug, Clone)]
pub struct BufferHost {
    lines: Vec<String>,
    clipboard: String,
    cursor_line: usize,
    cursor_column: usize,
    /// Inclusive line range of the selection, if any
    selection: Option<(usize, usize)>,
    notices: Vec<String>,
}

/// Byte offset of a character column within a line (clamped to line end)
fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(idx, _)| idx)
}

impl BufferHost {
    /// Create a host over the given document text
    #[must_use]
    pub fn new(document: &str) -> Self {
        Self {
            lines: document.split('\n').map(str::to_string).collect(),
            clipboard: String::new(),
            cursor_line: 0,
            cursor_column: 0,
            selection: None,
            notices: Vec::new(),
        }
    }

    /// Set the clipboard contents
    pub fn set_clipboard(&mut self, text: &str) {
        self.clipboard = text.to_string();
    }

    /// Move the cursor (0-based line and character column)
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.cursor_line = line;
        self.cursor_column = column;
        self.selection = None;
    }

    /// Move the cursor to the end of the given line
    pub fn set_cursor_line_end(&mut self, line: usize) {
        let column = self
            .lines
            .get(line)
            .map_or(0, |text| text.chars().count());
        self.set_cursor(line, column);
    }

    /// Select an inclusive range of whole lines
    pub fn select_lines(&mut self, start: usize, end: usize) {
        self.selection = Some((start.min(end), start.max(end)));
    }

    /// The document joined back into a single string
    #[must_use]
    pub fn document_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Messages shown to the user so far
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    fn insert_at_cursor(&mut self, text: &str) {
        let line_idx = self.cursor_line.min(self.lines.len());
        if line_idx == self.lines.len() {
            self.lines.push(String::new());
        }

        let line = &self.lines[line_idx];
        let split = byte_index(line, self.cursor_column);
        let head = line[..split].to_string();
        let tail = line[split..].to_string();

        let inserted: Vec<&str> = text.split('\n').collect();
        let mut replacement = Vec::with_capacity(inserted.len());
        if let [only] = inserted.as_slice() {
            replacement.push(format!("{head}{only}{tail}"));
        } else {
            replacement.push(format!("{head}{}", inserted[0]));
            for middle in &inserted[1..inserted.len() - 1] {
                replacement.push((*middle).to_string());
            }
            replacement.push(format!("{}{tail}", inserted[inserted.len() - 1]));
        }

        self.lines.splice(line_idx..=line_idx, replacement);
    }
}

impl Host for BufferHost {
    fn clipboard_text(&self) -> Result<String> {
        Ok(self.clipboard.clone())
    }

    fn cursor(&self) -> Result<CursorContext> {
        Ok(CursorContext {
            lines: self.lines.clone(),
            line: self.cursor_line,
            column: self.cursor_column,
        })
    }

    fn selection_text(&self) -> Option<String> {
        let (start, end) = self.selection?;
        let end = end.min(self.lines.len().saturating_sub(1));
        let start = start.min(end);
        Some(self.lines[start..=end].join("\n"))
    }

    fn apply_edit(&mut self, text: &str) -> Result<()> {
        if let Some((start, end)) = self.selection {
            let end = end.min(self.lines.len().saturating_sub(1));
            let start = start.min(end);
            let replacement: Vec<String> = text.split('\n').map(str::to_string).collect();
            self.lines.splice(start..=end, replacement);
        } else {
            self.insert_at_cursor(text);
        }
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
