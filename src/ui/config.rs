//! # Configuration Persistence
//!
//! Viewer preferences stored in `~/.config/dovuchcha-support/config.json`.
//!
//! ## Format
//!
//! ```json
//! {
//!   "theme": "Catppuccin Mocha",
//!   "narrow_width": 100
//! }
//! ```
//!
//! Both fields are optional. `narrow_width` is the terminal width, in
//! columns, below which the sidebar turns into a drawer.
//!
//! The `directories` crate resolves the platform-appropriate config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Terminal width below which the layout is considered narrow.
pub const DEFAULT_NARROW_WIDTH: u16 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name of the selected built-in theme.
    #[serde(default = "default_theme_name")]
    pub theme: String,

    #[serde(default = "default_narrow_width")]
    pub narrow_width: u16,
}

fn default_theme_name() -> String {
    "Catppuccin Mocha".to_string()
}

fn default_narrow_width() -> u16 {
    DEFAULT_NARROW_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            narrow_width: default_narrow_width(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Falls back to defaults if the file is
    /// missing or cannot be parsed.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config: {e:#}");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path. Returns `Config::default()`
    /// if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "dovuchcha-support")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}
