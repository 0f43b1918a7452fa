//! Error types and exit codes for carryover.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const HEADING_NOT_FOUND: i32 = 3;
    pub const AMBIGUOUS_RESOLUTION: i32 = 4;
    pub const NOTE_NOT_ORDERED: i32 = 5;
}

/// Main error type for migration operations.
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Ambiguous resolution: {count} notes match '{query}'")]
    AmbiguousResolution {
        query: String,
        count: usize,
        matches: Vec<PathBuf>,
    },

    /// The configured task heading is missing from a note that must have it.
    #[error("Could not find {heading} heading in {note}")]
    HeadingNotFound { note: PathBuf, heading: String },

    /// The active note cannot be placed among the daily notes.
    #[error("Could not find {0} among the daily notes")]
    NoteNotOrdered(PathBuf),

    #[error("No destination note was chosen")]
    DestinationNotChosen,

    #[error("Cannot migrate {0} sideways into itself")]
    SameSourceAndDestination(PathBuf),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl MigrationError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            MigrationError::NoteNotFound(_) => exit_code::NOTE_NOT_FOUND,
            MigrationError::HeadingNotFound { .. } => exit_code::HEADING_NOT_FOUND,
            MigrationError::AmbiguousResolution { .. } => exit_code::AMBIGUOUS_RESOLUTION,
            MigrationError::NoteNotOrdered(_) => exit_code::NOTE_NOT_ORDERED,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for carryover operations.
pub type Result<T> = std::result::Result<T, MigrationError>;
