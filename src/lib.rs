//! pypaste - Indentation-aware paste and dedent tool for Python code
//!
//! Re-indents a block of Python source so it fits at an arbitrary insertion
//! depth in a document, preserving relative nesting and blank lines.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod indent;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use host::{BufferHost, CursorContext, Host};
pub use indent::{
    analyze, reindent, resolve_target_level, strip_common_indent, IndentChar, IndentationProfile,
    StripOutcome,
};
pub use process::{smart_paste, strip_selection, PasteOutcome};
