//! Indentation analysis and rewriting.
//!
//! This module contains the core logic organized into submodules:
//! - [`analyzer`]: Infers per-line indentation levels, indent character and unit width
//! - [`reindent`]: Rewrites leading whitespace so a block fits a target depth
//! - [`target`]: Resolves the target depth at a document cursor position

pub mod analyzer;
pub mod reindent;
pub mod target;

pub use analyzer::{analyze, analyze_with_defaults, IndentChar, IndentationProfile};
pub use reindent::{reindent, strip_common_indent, StripOutcome};
pub use target::resolve_target_level;
