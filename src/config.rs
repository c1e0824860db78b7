//! Configuration file handling.
//!
//! Configuration is read from a TOML file. A project-local
//! `.lockaudit.toml` next to the lockfile takes precedence over the user
//! configuration file.
//!
//! # Configuration Location
//!
//! The user configuration file is stored at:
//! - Linux: `~/.config/lockaudit/config.toml`
//! - macOS: `~/Library/Application Support/lockaudit/config.toml`
//! - Windows: `%APPDATA%\lockaudit\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! strict = false
//! skip_dev = false
//! default_format = "table"
//! allowed_registries = [
//!     "https://registry.npmjs.org",
//!     "https://registry.yarnpkg.com",
//! ]
//!
//! [ignore]
//! packages = ["@internal/*"]
//! duplicates = ["tslib"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checker::DEFAULT_REGISTRIES;

/// File name of the project-local configuration.
pub const PROJECT_CONFIG_FILE: &str = ".lockaudit.toml";

/// Audit configuration.
///
/// The library never reads this from global state; callers load it and pass
/// it to [`analyze`](crate::analyze).
///
/// # Example
///
/// ```
/// use lockaudit::Config;
///
/// let config = Config::default();
/// assert!(!config.strict);
/// assert_eq!(config.allowed_registries.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Treat every finding as an error.
    ///
    /// Default: false
    pub strict: bool,

    /// URL prefixes a `resolved` tarball URL may start with.
    ///
    /// Default: the public npm and yarn registries
    pub allowed_registries: Vec<String>,

    /// Leave dev-only packages out of every check.
    ///
    /// Default: false
    pub skip_dev: bool,

    /// Output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json", "sarif"
    /// Default: "table"
    pub default_format: String,

    /// Suppression lists for accepted findings.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Package names whose findings are suppressed.
///
/// Entries support `*` as a wildcard (e.g. `"@types/*"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Packages excluded from all checks.
    pub packages: Vec<String>,

    /// Packages allowed to resolve to several versions.
    pub duplicates: Vec<String>,
}

impl IgnoreConfig {
    /// Check if every finding for a package should be suppressed.
    pub fn should_ignore_package(&self, name: &str) -> bool {
        matches_any(&self.packages, name)
    }

    /// Check if duplicate-version findings for a package should be suppressed.
    pub fn should_ignore_duplicates(&self, name: &str) -> bool {
        matches_any(&self.duplicates, name)
    }
}

fn matches_any(patterns: &[String], name: &str) -> bool {
    patterns.iter().any(|pattern| {
        if pattern.contains('*') {
            glob_match(pattern, name)
        } else {
            pattern == name
        }
    })
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    let first = parts[0];
    if !first.is_empty() {
        match remaining.strip_prefix(first) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    let last = parts[parts.len() - 1];
    if !last.is_empty() {
        match remaining.strip_suffix(last) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            allowed_registries: DEFAULT_REGISTRIES.iter().map(|r| r.to_string()).collect(),
            skip_dev: false,
            default_format: "table".to_string(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads the user configuration file.
    ///
    /// If the file doesn't exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration for a lockfile.
    ///
    /// A `.lockaudit.toml` in the lockfile's directory wins over the user
    /// configuration file.
    pub fn load_for(lockfile: &Path) -> Result<Self> {
        let project = lockfile
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(PROJECT_CONFIG_FILE);

        if project.exists() {
            tracing::debug!(path = %project.display(), "using project configuration");
            return Self::load_from(&project);
        }
        Self::load()
    }

    /// Loads configuration from an explicit path, falling back to defaults
    /// when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the user configuration file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the user configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lockaudit")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
