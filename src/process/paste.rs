//! Paste orchestration and strip pipelines.

use std::io::{Read, Write};

use crate::config::Config;
use crate::host::Host;
use crate::indent::{
    analyze_with_defaults, reindent, resolve_target_level, strip_common_indent,
};
use crate::Result;

/// What a paste operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The block was re-indented to the given level and inserted
    Inserted { target_level: usize },
    /// The clipboard was empty or blank; the document was left untouched
    EmptyClipboard,
}

/// Paste the host's clipboard at its cursor with corrected indentation
///
/// Reads the clipboard and cursor once, infers the block's indentation
/// profile, resolves the target depth at the cursor, re-indents the block
/// and hands the result to [`Host::apply_edit`]. A blank clipboard is a
/// no-op, not an error.
pub fn smart_paste<H: Host>(host: &mut H, config: &Config) -> Result<PasteOutcome> {
    let clipboard = host.clipboard_text()?;
    if clipboard.trim().is_empty() {
        return Ok(PasteOutcome::EmptyClipboard);
    }

    let ctx = host.cursor()?;
    let profile = analyze_with_defaults(&clipboard, config.indent, config.tab_indent);
    let target_level = resolve_target_level(
        &ctx.lines,
        ctx.line,
        ctx.column,
        profile.indent_size,
        config.colon_blocks,
    );
    let formatted = reindent(
        &clipboard,
        target_level,
        profile.indent_size,
        profile.indent_char,
    );
    host.apply_edit(&formatted)?;

    Ok(PasteOutcome::Inserted { target_level })
}

/// Strip the host's selection to the margin
///
/// Returns the number of levels removed; 0 means nothing changed (no
/// selection, or the selection was already at minimum indentation). The
/// host is notified of the outcome either way.
pub fn strip_selection<H: Host>(host: &mut H) -> Result<usize> {
    let Some(selected) = host.selection_text() else {
        host.notify("Select some Python code first.");
        return Ok(0);
    };

    let outcome = strip_common_indent(&selected);
    if outcome.levels_removed == 0 {
        host.notify("Selection already has minimum indentation.");
        return Ok(0);
    }

    host.apply_edit(&outcome.text)?;
    host.notify(&format!(
        "Removed {} level(s) of indentation.",
        outcome.levels_removed
    ));
    Ok(outcome.levels_removed)
}

/// Strip a whole input stream to the margin, writing the result to `output`
///
/// Returns the number of levels removed.
pub fn strip_file<R: Read, W: Write>(mut input: R, output: &mut W) -> Result<usize> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let outcome = strip_common_indent(&text);
    output.write_all(outcome.text.as_bytes())?;
    Ok(outcome.levels_removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BufferHost;
    use std::io::Cursor;

    #[test]
    fn test_smart_paste_below_def() {
        let mut host = BufferHost::new("def function():\n");
        host.set_cursor(1, 0);
        host.set_clipboard("print(\"hello\")");

        let outcome = smart_paste(&mut host, &Config::default()).unwrap();
        assert_eq!(outcome, PasteOutcome::Inserted { target_level: 1 });
        assert_eq!(host.document_text(), "def function():\n    print(\"hello\")");
    }

    #[test]
    fn test_smart_paste_empty_clipboard() {
        let mut host = BufferHost::new("x = 1");
        host.set_cursor(0, 0);
        host.set_clipboard("   \n  ");

        let outcome = smart_paste(&mut host, &Config::default()).unwrap();
        assert_eq!(outcome, PasteOutcome::EmptyClipboard);
        assert_eq!(host.document_text(), "x = 1");
    }

    #[test]
    fn test_smart_paste_dedents_deep_block() {
        let mut host = BufferHost::new("x = 1\n");
        host.set_cursor(1, 0);
        host.set_clipboard("            a = 1\n                b = 2");

        smart_paste(&mut host, &Config::default()).unwrap();
        assert_eq!(host.document_text(), "x = 1\na = 1\n    b = 2");
    }

    #[test]
    fn test_smart_paste_after_colon_line_end() {
        let mut host = BufferHost::new("    if x:\npass");
        host.set_cursor_line_end(0);
        host.set_clipboard("y = 1");

        let outcome = smart_paste(&mut host, &Config::default()).unwrap();
        assert_eq!(outcome, PasteOutcome::Inserted { target_level: 2 });
        assert_eq!(host.document_text(), "    if x:        y = 1\npass");
    }

    #[test]
    fn test_smart_paste_keeps_tabs() {
        let mut host = BufferHost::new("def f():\n");
        host.set_cursor(1, 0);
        host.set_clipboard("\tx = 1\n\t\ty = 2");

        smart_paste(&mut host, &Config::default()).unwrap();
        assert_eq!(host.document_text(), "def f():\n\tx = 1\n\t\ty = 2");
    }

    #[test]
    fn test_strip_selection() {
        let mut host = BufferHost::new("        a = 1\n            b = 2");
        host.select_lines(0, 1);

        let removed = strip_selection(&mut host).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(host.document_text(), "a = 1\n    b = 2");
        assert_eq!(
            host.notices(),
            ["Removed 2 level(s) of indentation.".to_string()]
        );
    }

    #[test]
    fn test_strip_selection_already_at_margin() {
        let mut host = BufferHost::new("a = 1\n    b = 2");
        host.select_lines(0, 1);

        let removed = strip_selection(&mut host).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(host.document_text(), "a = 1\n    b = 2");
        assert_eq!(
            host.notices(),
            ["Selection already has minimum indentation.".to_string()]
        );
    }

    #[test]
    fn test_strip_without_selection_notifies() {
        let mut host = BufferHost::new("    a = 1");
        let removed = strip_selection(&mut host).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(host.notices(), ["Select some Python code first.".to_string()]);
    }

    #[test]
    fn test_strip_file_stream() {
        let input = Cursor::new("    a = 1\n        b = 2\n");
        let mut output = Vec::new();
        let removed = strip_file(input, &mut output).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(String::from_utf8(output).unwrap(), "a = 1\n    b = 2\n");
    }
}
