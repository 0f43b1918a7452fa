//! Configuration: migration settings and daily-note location.
//!
//! Loaded from TOML. Every field has a default, so an empty or missing file
//! yields a working configuration:
//!
//! ```toml
//! vault = "/home/me/notes"
//!
//! [migration]
//! heading_name = "Tasks"
//! heading_level = 2
//! enable_linking_and_tagging = true
//! migration_tag = "#migrated"
//!
//! [daily_notes]
//! folder = "Daily"
//! format = "%Y-%m-%d"
//! ```

use crate::error::{MigrationError, Result};
use crate::parser::LinkStyle;
use crate::types::{MIGRATED_MARKER, OPEN_MARKER};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of a vault-local configuration.
pub const VAULT_CONFIG_FILE: &str = ".carryover.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default vault path, used when `--vault` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    pub migration: MigrationSettings,

    pub daily_notes: DailyNoteSettings,
}

/// Settings that drive task selection and the optional link/tag augmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationSettings {
    /// Text of the heading that owns the task section.
    pub heading_name: String,

    /// Level of that heading (1-6).
    pub heading_level: u8,

    /// Default destination for sideways migration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sideways_file: Option<PathBuf>,

    /// Leave anchors behind and link migrated lines back to them.
    pub enable_linking_and_tagging: bool,

    /// Display text for the back-link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_alias: Option<String>,

    /// Tag appended to migrated lines, e.g. `#migrated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_tag: Option<String>,

    /// Augment nested lines too, not only top-level ones.
    pub tag_all_lines: bool,

    /// Task markers that count as unfinished work.
    pub open_markers: Vec<char>,

    pub link_style: LinkStyle,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            heading_name: "Tasks".to_string(),
            heading_level: 2,
            sideways_file: None,
            enable_linking_and_tagging: false,
            link_alias: None,
            migration_tag: None,
            tag_all_lines: false,
            open_markers: vec![OPEN_MARKER],
            link_style: LinkStyle::Wikilink,
        }
    }
}

impl MigrationSettings {
    /// Reject settings the migration cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=6).contains(&self.heading_level) {
            return Err(MigrationError::ConfigError(format!(
                "heading_level must be between 1 and 6 (got {})",
                self.heading_level
            )));
        }
        if self.heading_name.trim().is_empty() {
            return Err(MigrationError::ConfigError(
                "heading_name must not be empty".to_string(),
            ));
        }
        if self.open_markers.is_empty() {
            return Err(MigrationError::ConfigError(
                "open_markers must list at least one marker".to_string(),
            ));
        }
        if self.open_markers.contains(&MIGRATED_MARKER) {
            return Err(MigrationError::ConfigError(format!(
                "'{}' marks migrated tasks and cannot be an open marker",
                MIGRATED_MARKER
            )));
        }
        Ok(())
    }
}

/// Where daily notes live and how they are named.
///
/// Unset fields fall back to the vault's `.obsidian/daily-notes.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyNoteSettings {
    /// Folder relative to the vault root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,

    /// chrono format of a daily note's folder-relative path, without `.md`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from `explicit`, or from the user config directory.
    ///
    /// A missing user config yields the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::user_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Prefer a vault-local `.carryover.toml` over `self` when one exists.
    pub fn for_vault(self, vault_root: &Path) -> Result<Self> {
        let local = vault_root.join(VAULT_CONFIG_FILE);
        if local.is_file() {
            Self::from_file(&local)
        } else {
            Ok(self)
        }
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        config.migration.validate()?;
        Ok(config)
    }

    /// `<config dir>/carryover/config.toml`, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("carryover").join("config.toml"))
    }

    /// Pick the vault root: the CLI flag, then the config, then the working directory.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_vault.or(self.vault.as_deref()) {
            return Ok(path.to_path_buf());
        }
        Ok(std::env::current_dir()?)
    }
}
