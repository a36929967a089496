//! Indentation analysis for Python code blocks.
//!
//! Infers the indentation profile of an arbitrary text block: the indent
//! level of each non-empty line, whether spaces or tabs are used, and the
//! number of columns per level.

use std::sync::LazyLock;

use regex::Regex;

// Leading whitespace run (indentation is always spaces and/or tabs)
static LEADING_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*").unwrap());

/// Fallback unit width when a space-indented block yields no candidates
pub const DEFAULT_SPACE_INDENT: usize = 4;

/// Fallback unit width when a tab-indented block yields no candidates
pub const DEFAULT_TAB_INDENT: usize = 1;

/// Character class used for indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentChar {
    Space,
    Tab,
}

/// Result of analyzing a block's indentation
///
/// `levels` is aligned to the block's non-empty lines in document order;
/// blank and whitespace-only lines carry no level entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentationProfile {
    /// Indent level of each non-empty line
    pub levels: Vec<usize>,
    /// Whether the block uses spaces or tabs
    pub indent_char: IndentChar,
    /// Columns per indent level (always >= 1)
    pub indent_size: usize,
}

impl IndentationProfile {
    /// Minimum indent level across the block's non-empty lines (0 if empty)
    #[must_use]
    pub fn min_level(&self) -> usize {
        self.levels.iter().copied().min().unwrap_or(0)
    }
}

/// Length of a line's leading whitespace run
pub(crate) fn leading_whitespace_len(line: &str) -> usize {
    LEADING_WS_RE.find(line).map_or(0, |m| m.end())
}

/// Analyze a block of Python code with the built-in fallback unit widths
#[must_use]
pub fn analyze(text: &str) -> IndentationProfile {
    analyze_with_defaults(text, DEFAULT_SPACE_INDENT, DEFAULT_TAB_INDENT)
}

/// Analyze a block of Python code with explicit fallback unit widths
///
/// The fallbacks apply only when the pairwise scan collects no unit-width
/// candidates (empty input, a single line, or a block with no nesting).
#[must_use]
pub fn analyze_with_defaults(
    text: &str,
    space_default: usize,
    tab_default: usize,
) -> IndentationProfile {
    // Leading whitespace of each non-empty line, in document order
    let leading: Vec<&str> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..leading_whitespace_len(line)])
        .collect();

    // Global classification: one tab anywhere makes the block tab-indented
    let indent_char = if leading.iter().any(|ws| ws.contains('\t')) {
        IndentChar::Tab
    } else {
        IndentChar::Space
    };

    let candidates = collect_unit_candidates(&leading);
    let fallback = match indent_char {
        IndentChar::Space => space_default,
        IndentChar::Tab => tab_default,
    };
    let indent_size = most_frequent(&candidates, fallback).max(1);

    let levels = leading.iter().map(|ws| ws.len() / indent_size).collect();

    IndentationProfile {
        levels,
        indent_char,
        indent_size,
    }
}

/// Collect unit-width candidates from consecutive line pairs
///
/// An indent step records the positive difference. A dedent to a non-zero
/// depth searches backward for the nearest ancestor line shallower than
/// both the previous line and the current one, and records the distance to
/// it; this reconstructs the unit even across a dedent to an outer block.
/// A dedent with no qualifying ancestor records nothing.
fn collect_unit_candidates(leading: &[&str]) -> Vec<usize> {
    let mut candidates = Vec::new();

    for i in 1..leading.len() {
        let prev = leading[i - 1].len();
        let curr = leading[i].len();

        if curr > prev {
            candidates.push(curr - prev);
        } else if curr < prev && curr > 0 {
            for j in (0..i.saturating_sub(1)).rev() {
                let ancestor = leading[j].len();
                if ancestor < prev && curr > ancestor {
                    candidates.push(curr - ancestor);
                    break;
                }
            }
        }
    }

    candidates
}

/// Most frequent candidate width, first-seen order breaking ties
///
/// Counts are accumulated in insertion order so the tiebreak stays
/// deterministic; a later candidate replaces the running best only on a
/// strictly greater count.
fn most_frequent(candidates: &[usize], fallback: usize) -> usize {
    let mut counts: Vec<(usize, usize)> = Vec::new();
    let mut best = fallback;
    let mut best_count = 0;

    for &width in candidates {
        let count = match counts.iter_mut().find(|(w, _)| *w == width) {
            Some(entry) => {
                entry.1 += 1;
                entry.1
            }
            None => {
                counts.push((width, 1));
                1
            }
        };
        if count > best_count {
            best_count = count;
            best = width;
        }
    }

    best
}
