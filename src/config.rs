//! Configuration management for pypaste.
//!
//! This module provides the [`Config`] struct which controls analysis
//! fallbacks and the colon heuristic. Configuration can be loaded from:
//! - TOML files (`pypaste.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the
//! file being processed up to the filesystem root, plus the user's home
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["pypaste.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_indent() -> usize {
    4
}
fn default_tab_indent() -> usize {
    1
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for pypaste
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fallback unit width for space indentation when inference finds no
    /// candidates (default: 4)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Fallback unit width for tab indentation (default: 1)
    #[serde(default = "default_tab_indent")]
    pub tab_indent: usize,

    /// Treat a trailing colon as opening a nested block (default: true)
    #[serde(default = "default_true")]
    pub colon_blocks: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub indent: Option<usize>,
    pub tab_indent: Option<usize>,
    pub colon_blocks: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: 4,
            tab_indent: 1,
            colon_blocks: true,
        }
    }
}

impl Config {
    /// Maximum reasonable space indent size
    const MAX_INDENT: usize = 16;
    /// Maximum reasonable tab indent size
    const MAX_TAB_INDENT: usize = 8;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent == 0 {
            return Some("indent must be at least 1".to_string());
        }
        if self.indent > Self::MAX_INDENT {
            return Some(format!(
                "indent {} exceeds maximum of {}",
                self.indent,
                Self::MAX_INDENT
            ));
        }
        if self.tab_indent == 0 {
            return Some("tab_indent must be at least 1".to_string());
        }
        if self.tab_indent > Self::MAX_TAB_INDENT {
            return Some(format!(
                "tab_indent {} exceeds maximum of {}",
                self.tab_indent,
                Self::MAX_TAB_INDENT
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.indent {
            self.indent = v;
        }
        if let Some(v) = partial.tab_indent {
            self.tab_indent = v;
        }
        if let Some(v) = partial.colon_blocks {
            self.colon_blocks = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
