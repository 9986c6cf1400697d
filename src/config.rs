//! Collection settings and source filtering rules.
//!
//! Settings are read from a TOML file. Every field is optional:
//!
//! ```toml
//! [collect]
//! destination = "collected_images"
//! follow_symlinks = false
//!
//! [filters]
//! skip_hidden = false
//!
//! [filters.exclude]
//! filenames = ["Thumbs.db"]
//! patterns = ["cache/**"]
//! regex = ["^tmp_"]
//! ```
//!
//! Exclude patterns are globs matched against the path relative to the source
//! root; exclude regexes are matched against the base name only.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".imgcollectrc.toml";

/// Destination used when neither the command line nor the config names one.
pub const DEFAULT_DESTINATION: &str = "collected_images";

/// Errors that can occur while loading or compiling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidRegexPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectConfig {
    #[serde(default)]
    pub collect: CollectSettings,

    #[serde(default)]
    pub filters: FilterRules,
}

/// Settings for the collection run itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectSettings {
    /// Destination directory used when none is given on the command line.
    #[serde(default)]
    pub destination: Option<PathBuf>,

    /// Follow symbolic links while walking the source tree.
    #[serde(default)]
    pub follow_symlinks: bool,
}

/// Rules deciding which source entries are looked at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Skip entries whose name starts with a dot.
    #[serde(default)]
    pub skip_hidden: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Entries matching any of these rules are skipped without being read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact base names (e.g. "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns relative to the source root (e.g. "cache/**").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regexes matched against the base name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl CollectConfig {
    /// Load configuration, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if given
    /// 2. `.imgcollectrc.toml` in the current directory
    /// 3. `~/.config/imgcollect/config.toml`
    /// 4. built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, or if any file
    /// that is found cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("imgcollect")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolves the destination: command line first, then config, then default.
    pub fn destination(&self, cli_destination: Option<&Path>) -> PathBuf {
        cli_destination
            .map(Path::to_path_buf)
            .or_else(|| self.collect.destination.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION))
    }
}

/// Filter rules with every pattern compiled up front.
#[derive(Debug, Default)]
pub struct CompiledFilters {
    skip_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl CompiledFilters {
    /// Compile filter rules.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex pattern is invalid.
    pub fn new(rules: &FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ConfigError::InvalidGlobPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_hidden: rules.skip_hidden,
            exclude_filenames: rules.exclude.filenames.iter().cloned().collect(),
            exclude_patterns,
            exclude_regexes,
        })
    }

    /// Whether a hidden directory should be pruned from the walk.
    pub fn prunes_dir(&self, dir_name: &str) -> bool {
        self.skip_hidden && is_hidden(dir_name)
    }

    /// Check if a file should be examined.
    ///
    /// `relative_path` is the file's path relative to the source root.
    /// Checks run in this order, stopping at the first match:
    /// 1. Hidden file filter
    /// 2. Exact filename
    /// 3. Glob pattern
    /// 4. Regex on the file name
    pub fn should_include(&self, relative_path: &Path) -> bool {
        let file_name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.skip_hidden && is_hidden(&file_name) {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative_path))
        {
            return false;
        }

        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}
