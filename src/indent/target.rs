//! Target depth resolution at a document cursor position.
//!
//! Decides how deep a pasted block should land. The only syntax considered
//! is a trailing colon on the reference line, which signals that a nested
//! block follows.

use crate::indent::analyzer::leading_whitespace_len;

/// Resolve the indent level a pasted block should be re-indented to
///
/// `line` and `column` locate the cursor in `lines` (0-based). `indent_size`
/// is the pasted block's inferred unit width, so document indentation is
/// measured in the block's own units.
///
/// - On a blank cursor line, the nearest non-blank line above sets the
///   level; a trailing colon on it adds one. No line above resolves to 0.
/// - On a non-blank line, the line's own indentation sets the level; the
///   colon increment applies only when the cursor sits at or past the end
///   of the line.
///
/// `colon_blocks = false` disables the colon increment entirely.
#[must_use]
pub fn resolve_target_level(
    lines: &[String],
    line: usize,
    column: usize,
    indent_size: usize,
    colon_blocks: bool,
) -> usize {
    let indent_size = indent_size.max(1);
    let current = lines.get(line).map_or("", String::as_str);

    if current.trim().is_empty() {
        // Scan backward for the nearest non-blank line
        for prev in lines.iter().take(line.min(lines.len())).rev() {
            if prev.trim().is_empty() {
                continue;
            }
            let level = leading_whitespace_len(prev) / indent_size;
            if colon_blocks && prev.trim().ends_with(':') {
                return level + 1;
            }
            return level;
        }
        return 0;
    }

    let level = leading_whitespace_len(current) / indent_size;
    let at_line_end = column >= current.chars().count();
    if colon_blocks && at_line_end && current.trim().ends_with(':') {
        level + 1
    } else {
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| (*l).to_string()).collect()
    }

    #[test]
    fn test_blank_line_below_colon() {
        let lines = doc(&["def function():", ""]);
        assert_eq!(resolve_target_level(&lines, 1, 0, 4, true), 1);
    }

    #[test]
    fn test_blank_line_below_statement() {
        let lines = doc(&["x = 1", ""]);
        assert_eq!(resolve_target_level(&lines, 1, 0, 4, true), 0);
    }

    #[test]
    fn test_blank_line_below_indented_colon() {
        let lines = doc(&["class A:", "    def m(self):", ""]);
        assert_eq!(resolve_target_level(&lines, 2, 0, 4, true), 2);
    }

    #[test]
    fn test_skips_intervening_blank_lines() {
        let lines = doc(&["    if x:", "", "   ", ""]);
        assert_eq!(resolve_target_level(&lines, 3, 0, 4, true), 2);
    }

    #[test]
    fn test_no_line_above_defaults_to_zero() {
        let lines = doc(&["", "x = 1"]);
        assert_eq!(resolve_target_level(&lines, 0, 0, 4, true), 0);
    }

    #[test]
    fn test_non_blank_line_uses_own_indent() {
        let lines = doc(&["    x = 1"]);
        assert_eq!(resolve_target_level(&lines, 0, 2, 4, true), 1);
    }

    #[test]
    fn test_cursor_at_end_of_colon_line() {
        let lines = doc(&["    if x:"]);
        assert_eq!(resolve_target_level(&lines, 0, 9, 4, true), 2);
    }

    #[test]
    fn test_cursor_mid_colon_line_no_increment() {
        let lines = doc(&["    if x:"]);
        assert_eq!(resolve_target_level(&lines, 0, 4, 4, true), 1);
    }

    #[test]
    fn test_colon_blocks_disabled() {
        let lines = doc(&["def function():", ""]);
        assert_eq!(resolve_target_level(&lines, 1, 0, 4, false), 0);
    }

    #[test]
    fn test_cursor_past_document_end() {
        let lines = doc(&["while True:"]);
        assert_eq!(resolve_target_level(&lines, 5, 0, 4, true), 1);
    }

    #[test]
    fn test_block_unit_measures_document() {
        // Document indented with 4 but the block's unit is 2: the level is
        // measured in the block's units
        let lines = doc(&["    x = 1"]);
        assert_eq!(resolve_target_level(&lines, 0, 0, 2, true), 2);
    }
}
