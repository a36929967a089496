//! Command-line interface for pypaste.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Document to paste into, or files/directories to strip
    pub inputs: Vec<PathBuf>,

    /// Cursor line in the document (1-based, paste mode)
    pub line: Option<usize>,

    /// Cursor column in the document (0-based characters; default: end of line)
    pub column: Option<usize>,

    /// Snippet source file (default: stdin)
    pub snippet: Option<PathBuf>,

    /// Re-indent the snippet to this explicit level instead of resolving
    /// a document position
    pub level: Option<usize>,

    /// Strip common leading indentation instead of pasting
    pub strip: bool,

    /// Fallback unit width for space indentation
    pub indent: Option<usize>,

    /// Fallback unit width for tab indentation
    pub tab_indent: Option<usize>,

    /// Disable the trailing-colon block heuristic
    pub no_colon_blocks: bool,

    /// Write the edited document back in place (paste mode)
    pub write: bool,

    /// Output to stdout instead of in-place (strip mode)
    pub stdout: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom Python file extensions (in addition to defaults)
    pub python_extensions: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Silent mode (no output)
    pub silent: bool,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("pypaste")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Indentation-aware paste and dedent tool for Python code")
        .arg(
            Arg::new("inputs")
                .help("Document to paste into, or files/directories to strip")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("line")
                .short('l')
                .long("line")
                .help("Cursor line in the document (1-based)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("column")
                .short('C')
                .long("column")
                .help("Cursor column (0-based characters) [default: end of line]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("snippet")
                .short('n')
                .long("snippet")
                .help("Read the snippet from a file instead of stdin")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("level")
                .short('L')
                .long("level")
                .help("Re-indent the snippet to an explicit level and print it")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("strip")
                .long("strip")
                .help("Strip common leading indentation from the inputs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("indent")
                .short('i')
                .long("indent")
                .help("Fallback spaces per indent level when inference finds none [default: 4]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("tab-indent")
                .long("tab-indent")
                .help("Fallback tabs per indent level when inference finds none [default: 1]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("no-colon-blocks")
                .long("no-colon-blocks")
                .help("Don't treat a trailing colon as opening a nested block")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("write")
                .short('w')
                .long("write")
                .help("Write the edited document back in place (paste mode)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of modifying files in-place (strip mode)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively strip directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("python")
                .short('p')
                .long("python")
                .help("Additional Python file extension (can be repeated, e.g., -p pyx)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no output, for editor integration)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config, inferred profile, target level)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        line: matches.get_one::<usize>("line").copied(),
        column: matches.get_one::<usize>("column").copied(),
        snippet: matches.get_one::<PathBuf>("snippet").cloned(),
        level: matches.get_one::<usize>("level").copied(),
        strip: matches.get_flag("strip"),
        indent: matches.get_one::<usize>("indent").copied(),
        tab_indent: matches.get_one::<usize>("tab-indent").copied(),
        no_colon_blocks: matches.get_flag("no-colon-blocks"),
        write: matches.get_flag("write"),
        stdout: matches.get_flag("stdout"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        python_extensions: matches
            .get_many::<String>("python")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        silent: matches.get_flag("silent"),
        debug: matches.get_flag("debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        // Just verify it builds without panic
        assert_eq!(cmd.get_name(), "pypaste");
    }

    #[test]
    fn test_cli_defaults() {
        let cmd = build_cli();
        let matches = cmd.try_get_matches_from(vec!["pypaste"]).unwrap();

        assert!(matches.get_many::<PathBuf>("inputs").is_none());
        assert!(!matches.get_flag("strip"));
        assert!(!matches.get_flag("write"));
    }

    #[test]
    fn test_paste_mode_args() {
        let args = parse_args_from(vec!["pypaste", "-l", "12", "-C", "0", "main.py"]);
        assert_eq!(args.line, Some(12));
        assert_eq!(args.column, Some(0));
        assert_eq!(args.inputs, vec![PathBuf::from("main.py")]);
        assert!(!args.strip);
    }

    #[test]
    fn test_level_mode_args() {
        let args = parse_args_from(vec!["pypaste", "--level", "2"]);
        assert_eq!(args.level, Some(2));
        assert!(args.inputs.is_empty());
    }

    #[test]
    fn test_strip_mode_args() {
        let args = parse_args_from(vec!["pypaste", "--strip", "-r", "snippets/"]);
        assert!(args.strip);
        assert!(args.recursive);
        assert_eq!(args.inputs, vec![PathBuf::from("snippets/")]);
    }

    #[test]
    fn test_indent_overrides() {
        let args = parse_args_from(vec!["pypaste", "-i", "2", "--tab-indent", "2", "--level", "0"]);
        assert_eq!(args.indent, Some(2));
        assert_eq!(args.tab_indent, Some(2));
    }

    #[test]
    fn test_no_colon_blocks_flag() {
        let args = parse_args_from(vec!["pypaste", "--no-colon-blocks", "-l", "1", "f.py"]);
        assert!(args.no_colon_blocks);
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "pypaste", "--strip", "-r", "-e", "*.bak", "--exclude", "build*", "src/",
        ]);
        assert_eq!(args.exclude, vec!["*.bak", "build*"]);
    }

    #[test]
    fn test_python_extensions() {
        let args = parse_args_from(vec![
            "pypaste", "--strip", "-r", "-p", "pyx", "--python", "pxd", "src/",
        ]);
        assert_eq!(args.python_extensions, vec!["pyx", "pxd"]);
    }

    #[test]
    fn test_jobs_flag() {
        let args = parse_args_from(vec!["pypaste", "--strip", "-j", "2", "a.py"]);
        assert_eq!(args.jobs, Some(2));
    }

    #[test]
    fn test_column_not_set() {
        let args = parse_args_from(vec!["pypaste", "-l", "3", "f.py"]);
        assert_eq!(args.column, None);
    }

    #[test]
    fn test_debug_and_silent_flags() {
        let args = parse_args_from(vec!["pypaste", "-D", "-S", "--strip", "a.py"]);
        assert!(args.debug);
        assert!(args.silent);
    }
}
