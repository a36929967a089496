//! Re-indentation of analyzed code blocks.
//!
//! Rewrites every line's leading whitespace so the block's minimum
//! indentation level maps to a target level, preserving relative nesting.
//! Blank lines always stay blank.

use crate::indent::analyzer::{analyze, leading_whitespace_len, IndentChar};

/// Result of stripping a block's common leading indentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    /// The dedented text (unchanged when `levels_removed` is 0)
    pub text: String,
    /// How many indent levels were removed
    pub levels_removed: usize,
}

/// Re-indent a block so its minimum indentation level becomes `target_level`
///
/// Strip-then-reapply: the common indentation (minimum level times unit
/// width) is removed from every non-blank line, then `target_level` indent
/// units are prepended. The minimum level is re-derived here with the same
/// floor division the analyzer uses, so the function stays self-contained.
/// Lines shorter than the strip amount lose only their actual leading
/// whitespace. Output lines are joined with `\n`.
#[must_use]
pub fn reindent(
    block: &str,
    target_level: usize,
    indent_size: usize,
    indent_char: IndentChar,
) -> String {
    let indent_size = indent_size.max(1);
    let lines: Vec<&str> = block.split('\n').collect();

    let min_level = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace_len(line) / indent_size)
        .min()
        .unwrap_or(0);

    let new_indent = match indent_char {
        IndentChar::Tab => "\t".repeat(target_level),
        IndentChar::Space => " ".repeat(target_level * indent_size),
    };

    let formatted: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                return String::new();
            }
            let ws_len = leading_whitespace_len(line);
            let strip = (min_level * indent_size).min(ws_len);
            format!("{new_indent}{}", &line[strip..])
        })
        .collect();

    formatted.join("\n")
}

/// Strip a block's common leading indentation so its minimum level is 0
///
/// Returns the text unchanged (with `levels_removed == 0`) when the block
/// is already at the margin or has no non-empty lines.
#[must_use]
pub fn strip_common_indent(text: &str) -> StripOutcome {
    let profile = analyze(text);
    let min_level = profile.min_level();

    if min_level == 0 {
        return StripOutcome {
            text: text.to_string(),
            levels_removed: 0,
        };
    }

    let stripped: Vec<String> = text
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                return String::new();
            }
            let ws_len = leading_whitespace_len(line);
            let strip = (min_level * profile.indent_size).min(ws_len);
            line[strip..].to_string()
        })
        .collect();

    StripOutcome {
        text: stripped.join("\n"),
        levels_removed: min_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reindent_to_zero() {
        let block = "    a = 1\n        b = 2";
        let result = reindent(block, 0, 4, IndentChar::Space);
        assert_eq!(result, "a = 1\n    b = 2");
    }

    #[test]
    fn test_reindent_deeper() {
        let block = "a = 1\n    b = 2";
        let result = reindent(block, 2, 4, IndentChar::Space);
        assert_eq!(result, "        a = 1\n            b = 2");
    }

    #[test]
    fn test_blank_lines_stay_blank() {
        let block = "    a = 1\n\n   \n    b = 2";
        let result = reindent(block, 1, 4, IndentChar::Space);
        assert_eq!(result, "    a = 1\n\n\n    b = 2");
    }

    #[test]
    fn test_tab_output() {
        let block = "a = 1\n\tb = 2";
        let result = reindent(block, 2, 1, IndentChar::Tab);
        assert_eq!(result, "\t\ta = 1\n\t\t\tb = 2");
    }

    #[test]
    fn test_short_line_guard() {
        // The second line is indented less than the block minimum; only its
        // actual leading whitespace is removed
        let block = "        a = 1\n  b = 2";
        let result = reindent(block, 0, 4, IndentChar::Space);
        assert_eq!(result, "        a = 1\nb = 2");
    }

    #[test]
    fn test_zero_target_is_idempotent_on_minimum() {
        let block = "        a = 1\n            b = 2";
        let once = reindent(block, 0, 4, IndentChar::Space);
        let twice = reindent(&once, 0, 4, IndentChar::Space);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(reindent("", 3, 4, IndentChar::Space), "");
    }

    #[test]
    fn test_indent_size_clamped_to_one() {
        let result = reindent("a", 2, 0, IndentChar::Space);
        assert_eq!(result, "  a");
    }

    #[test]
    fn test_strip_common_indent() {
        let outcome = strip_common_indent("        a = 1\n            b = 2");
        assert_eq!(outcome.levels_removed, 2);
        assert_eq!(outcome.text, "a = 1\n    b = 2");
    }

    #[test]
    fn test_strip_already_at_margin() {
        let outcome = strip_common_indent("a = 1\n    b = 2");
        assert_eq!(outcome.levels_removed, 0);
        assert_eq!(outcome.text, "a = 1\n    b = 2");
    }

    #[test]
    fn test_strip_preserves_relative_nesting() {
        let outcome = strip_common_indent("    if x:\n        y = 1\n    z = 2");
        assert_eq!(outcome.levels_removed, 1);
        assert_eq!(outcome.text, "if x:\n    y = 1\nz = 2");
    }

    #[test]
    fn test_strip_empty_input() {
        let outcome = strip_common_indent("");
        assert_eq!(outcome.levels_removed, 0);
        assert_eq!(outcome.text, "");
    }
}
