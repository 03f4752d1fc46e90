// Configuration for the peek inspector

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file searched for by [`Config::from_dir`]
pub const CONFIG_FILE_NAME: &str = "peekfmt.json";

/// Inspector configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Nesting level at which containers collapse to a `[Type]` tag
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Spaces prefixed to every output line
    #[serde(default)]
    pub indent_level: usize,

    /// Width above which a container breaks onto multiple lines
    #[serde(default = "default_line_break_length")]
    pub line_break_length: usize,

    /// Entries rendered per iterable before the "more items" marker
    #[serde(default = "default_max_iterable_length")]
    pub max_iterable_length: usize,

    /// Characters kept from a nested string before it is abbreviated
    #[serde(default = "default_str_abbreviate_size")]
    pub str_abbreviate_size: usize,

    /// Entry count an array must exceed before column grouping is tried
    #[serde(default = "default_min_group_length")]
    pub min_group_length: usize,

    /// Style output with ANSI colors
    #[serde(default)]
    pub colors: bool,
}

// Default values
fn default_depth() -> usize {
    4
}
fn default_line_break_length() -> usize {
    80
}
fn default_max_iterable_length() -> usize {
    100
}
fn default_str_abbreviate_size() -> usize {
    100
}
fn default_min_group_length() -> usize {
    6
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            indent_level: 0,
            line_break_length: default_line_break_length(),
            max_iterable_length: default_max_iterable_length(),
            str_abbreviate_size: default_str_abbreviate_size(),
            min_group_length: default_min_group_length(),
            colors: false,
        }
    }
}

impl Config {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_indent_level(mut self, indent_level: usize) -> Self {
        self.indent_level = indent_level;
        self
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Load configuration from a peekfmt.json file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from directory (searches for peekfmt.json)
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let start = search_start(dir.as_ref())?;
        let mut current = Some(start.as_path());
        while let Some(candidate) = current {
            let config_path = candidate.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                log::debug!("Using configuration from {}", config_path.display());
                return Self::from_file(config_path);
            }
            current = candidate.parent();
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Create example configuration file
    pub fn example() -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::default())?)
    }
}

/// Absolute directory the parent walk starts from.
///
/// `Path::parent` stops at the first component, so `.` or the empty parent of
/// a bare file name would never reach the directories above.
fn search_start(dir: &Path) -> Result<PathBuf> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    match std::fs::canonicalize(dir) {
        Ok(path) => Ok(path),
        Err(e) => {
            log::debug!("cannot canonicalize {}: {}", dir.display(), e);
            Ok(std::env::current_dir()?.join(dir))
        }
    }
}
