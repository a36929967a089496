//! pypaste - Indentation-aware paste and dedent tool for Python code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use pypaste::indent::{analyze_with_defaults, reindent, IndentChar};
use pypaste::process::{smart_paste, strip_file};
use pypaste::{parse_args, BufferHost, CliArgs, Config, PasteOutcome, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

/// Python file extensions to process in strip mode
const PYTHON_EXTENSIONS: &[&str] = &["py", "pyi", "pyw"];

/// Default maximum input size in bytes (100 MB)
/// Larger inputs are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    if args.strip {
        return run_strip(&args);
    }

    if args.level.is_some() {
        return run_reindent(&args);
    }

    // Paste mode needs a document and a cursor line; with neither and an
    // interactive terminal, show usage instead of waiting on stdin
    if args.inputs.is_empty() && args.line.is_none() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    run_paste(&args)
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        // No path provided, use current directory for discovery
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // Override with CLI arguments
    if let Some(indent) = args.indent {
        config.indent = indent;
    }
    if let Some(tab_indent) = args.tab_indent {
        config.tab_indent = tab_indent;
    }
    if args.no_colon_blocks {
        config.colon_blocks = false;
    }

    if args.debug {
        eprintln!("[DEBUG] Configuration:");
        eprintln!("[DEBUG]   indent: {}", config.indent);
        eprintln!("[DEBUG]   tab_indent: {}", config.tab_indent);
        eprintln!("[DEBUG]   colon_blocks: {}", config.colon_blocks);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Read the snippet from --snippet or stdin, with a size guard
fn read_snippet(args: &CliArgs) -> Result<String> {
    let mut snippet = String::new();
    if let Some(path) = &args.snippet {
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > DEFAULT_MAX_FILE_SIZE {
            anyhow::bail!(
                "snippet {} too large ({} MB exceeds limit of {} MB)",
                path.display(),
                metadata.len() / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        snippet = std::fs::read_to_string(path)?;
    } else {
        io::stdin().read_to_string(&mut snippet)?;
        #[allow(clippy::cast_possible_truncation)]
        let size = snippet.len() as u64;
        if size > DEFAULT_MAX_FILE_SIZE {
            anyhow::bail!(
                "stdin input too large ({} MB exceeds limit of {} MB)",
                size / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
    }
    Ok(snippet)
}

/// Paste mode: insert the snippet into the document at the cursor
fn run_paste(args: &CliArgs) -> Result<()> {
    let Some(line) = args.line else {
        anyhow::bail!("paste mode requires --line (or use --level / --strip)");
    };
    if line == 0 {
        anyhow::bail!("--line is 1-based");
    }
    let [document_path] = args.inputs.as_slice() else {
        anyhow::bail!("paste mode takes exactly one document file");
    };

    let config = build_config(args, Some(document_path.as_path()))?;
    let document = std::fs::read_to_string(document_path)?;
    let snippet = read_snippet(args)?;

    let mut host = BufferHost::new(&document);
    host.set_clipboard(&snippet);
    let line_idx = line - 1;
    if let Some(column) = args.column {
        host.set_cursor(line_idx, column);
    } else {
        host.set_cursor_line_end(line_idx);
    }

    match smart_paste(&mut host, &config)? {
        PasteOutcome::Inserted { target_level } => {
            if args.debug {
                eprintln!("[DEBUG] Resolved target level: {target_level}");
            }
        }
        PasteOutcome::EmptyClipboard => {
            if !args.silent {
                eprintln!("Nothing to paste (snippet is empty).");
            }
        }
    }

    let edited = host.document_text();
    if args.write {
        std::fs::write(document_path, &edited)?;
        if !args.silent {
            eprintln!("Updated {}", document_path.display());
        }
    } else {
        io::stdout().write_all(edited.as_bytes())?;
    }

    Ok(())
}

/// Reindent mode: re-indent the snippet to an explicit level, print it
fn run_reindent(args: &CliArgs) -> Result<()> {
    let level = args.level.unwrap_or(0);
    let config = build_config(args, None)?;
    let snippet = read_snippet(args)?;

    let profile = analyze_with_defaults(&snippet, config.indent, config.tab_indent);
    if args.debug {
        let style = match profile.indent_char {
            IndentChar::Space => "space",
            IndentChar::Tab => "tab",
        };
        eprintln!(
            "[DEBUG] Inferred profile: {style} indentation, unit width {}",
            profile.indent_size
        );
        eprintln!("[DEBUG] Levels: {:?}", profile.levels);
    }

    let formatted = reindent(&snippet, level, profile.indent_size, profile.indent_char);
    io::stdout().write_all(formatted.as_bytes())?;
    Ok(())
}

/// Strip mode: dedent files in place, or stdin to stdout
fn run_strip(args: &CliArgs) -> Result<()> {
    if args.inputs.is_empty() {
        // stdin -> stdout
        let snippet = read_snippet(args)?;
        let mut output = Vec::new();
        let removed = strip_file(snippet.as_bytes(), &mut output)?;
        io::stdout().write_all(&output)?;
        if !args.silent && removed > 0 {
            eprintln!("Removed {removed} level(s) of indentation.");
        }
        return Ok(());
    }

    let files = collect_files(args);
    if files.is_empty() {
        if !args.silent {
            eprintln!("No Python files found to strip.");
        }
        return Ok(());
    }

    let use_sequential = args.stdout || args.jobs == Some(1);
    if use_sequential {
        for path in &files {
            if let Err(e) = strip_single_file(path, args) {
                eprintln!("Error stripping {}: {}", path.display(), e);
            }
        }
    } else {
        strip_files_parallel(&files, args);
    }

    Ok(())
}

/// Strip files in parallel using Rayon
fn strip_files_parallel(files: &[PathBuf], args: &CliArgs) {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| match strip_single_file(path, args) {
        Ok(()) => {
            success_count.fetch_add(1, Ordering::Relaxed);
        }
        Err(e) => {
            error_count.fetch_add(1, Ordering::Relaxed);
            eprintln!("Error stripping {}: {}", path.display(), e);
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Processed {success} files successfully.");
        } else {
            eprintln!("Processed {success} files, {errors} errors.");
        }
    }
}

/// Strip a single file in place (or to stdout with --stdout)
fn strip_single_file(path: &PathBuf, args: &CliArgs) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                metadata.len() / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        return Ok(());
    }

    let contents = std::fs::read_to_string(path)?;
    let mut output = Vec::new();
    let removed = strip_file(contents.as_bytes(), &mut output)?;

    if args.stdout {
        if !args.silent {
            println!("=== {} ===", path.display());
        }
        io::stdout().write_all(&output)?;
    } else if removed > 0 {
        std::fs::write(path, &output)?;
        if !args.silent {
            eprintln!("Dedented {} ({removed} level(s))", path.display());
        }
    } else if args.debug {
        eprintln!("[DEBUG] {} already at margin", path.display());
    }

    Ok(())
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let custom_extensions = &args.python_extensions;

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal
                // Note: WalkDir detects symlink loops when follow_links(true) and
                // returns errors for them. We skip errors via filter_map(ok).
                // max_depth prevents runaway traversal in pathological directory structures.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_python_file(path, custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_python_file(&path, custom_extensions)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check if a file has a Python extension
/// Checks against both default extensions and any custom extensions provided
fn is_python_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            // Check default extensions
            if PYTHON_EXTENSIONS.contains(&ext) {
                return true;
            }
            // Check custom extensions (with or without leading dot)
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

fn print_usage() {
    println!(
        "pypaste v{} - indentation-aware paste for Python code",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Re-indents a snippet so it fits the insertion point in a document.");
    println!();
    println!("Usage:");
    println!("  pypaste -l LINE [OPTIONS] DOCUMENT    # Paste stdin snippet into DOCUMENT");
    println!("  pypaste --level N [OPTIONS]           # Re-indent stdin snippet to level N");
    println!("  pypaste --strip [FILE|DIR]...         # Strip common indentation");
    println!();
    println!("Examples:");
    println!("  pypaste -l 12 main.py < snippet.py    # Paste at line 12, print document");
    println!("  pypaste -l 12 -w main.py < snippet.py # Same, but edit main.py in place");
    println!("  pypaste --level 0 < snippet.py        # Dedent a snippet to the margin");
    println!("  pypaste --strip -r snippets/          # Dedent snippet files in place");
    println!("  cat block.py | pypaste --strip        # Strip stdin to stdout");
    println!();
    println!("Options:");
    println!("  -l, --line <NUM>          Cursor line in the document (1-based)");
    println!("  -C, --column <NUM>        Cursor column [default: end of line]");
    println!("  -n, --snippet <FILE>      Read the snippet from a file instead of stdin");
    println!("  -L, --level <NUM>         Re-indent to an explicit level, print to stdout");
    println!("  --strip                   Strip common leading indentation");
    println!("  -i, --indent <NUM>        Fallback spaces per level [default: 4]");
    println!("  --tab-indent <NUM>        Fallback tabs per level [default: 1]");
    println!("  --no-colon-blocks         Don't open a block after a trailing colon");
    println!("  -w, --write               Write the edited document in place");
    println!("  -s, --stdout              Strip to stdout instead of in-place");
    println!("  -r, --recursive           Process directories recursively");
    println!("  -e, --exclude <PATTERN>   Exclude files/dirs matching pattern (repeatable)");
    println!("  -p, --python <EXT>        Additional Python extension (repeatable)");
    println!("  -j, --jobs <NUM>          Parallel jobs (0=auto, 1=sequential)");
    println!("  -c, --config <FILE>       Config file path (overrides auto-discovery)");
    println!("  -S, --silent              Silent mode");
    println!("  -D, --debug               Enable debug output");
    println!("  -h, --help                Print help");
    println!();
    println!("Supported extensions: .py, .pyi, .pyw");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for pypaste.toml in parent directories");
    println!("  starting from the document up to the root directory.");
    println!("  Also checks pypaste.toml in the home directory.");
    println!("  More specific configs (closer to the file) override less specific ones.");
}
