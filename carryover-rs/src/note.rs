//! Note representation and operations.

use crate::error::Result;
use crate::parser::{self, parse_headings, parse_list_items};
use crate::types::Outline;
use serde_yaml::Value as YamlValue;
use std::path::{Path, PathBuf};

/// Represents a note in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Path relative to vault root (e.g., "Daily/2024-01-02.md").
    pub path: PathBuf,

    /// Raw content of the note.
    pub content: String,
}

impl Note {
    /// Create a new note from path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Load a note from disk.
    pub fn load(vault_root: &Path, relative_path: &Path) -> Result<Self> {
        let full_path = vault_root.join(relative_path);
        let content = std::fs::read_to_string(&full_path)?;
        Ok(Self {
            path: relative_path.to_path_buf(),
            content,
        })
    }

    /// Save the note to disk.
    pub fn save(&self, vault_root: &Path) -> Result<()> {
        let full_path = vault_root.join(&self.path);

        // Ensure parent directory exists
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&full_path, &self.content)?;
        Ok(())
    }

    /// Get the note name (filename without .md extension).
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Parse frontmatter as YAML value.
    pub fn frontmatter(&self) -> Result<Option<YamlValue>> {
        parser::parse_frontmatter_with_path(&self.content, &self.path)
    }

    /// Aliases from the frontmatter, empty when there are none.
    pub fn aliases(&self) -> Result<Vec<String>> {
        Ok(self
            .frontmatter()?
            .map(|fm| parser::frontmatter_aliases(&fm))
            .unwrap_or_default())
    }

    /// Headings and list items of the note.
    pub fn outline(&self) -> Outline {
        Outline {
            headings: parse_headings(&self.content),
            list_items: parse_list_items(&self.content),
        }
    }

    /// The note's lines, without line terminators.
    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }

    /// Replace the content with `lines`, keeping the trailing newline if the
    /// original content had one.
    pub fn with_lines<S: AsRef<str>>(&self, lines: &[S]) -> Self {
        let mut new_content = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        if self.content.ends_with('\n') {
            new_content.push('\n');
        }

        Self {
            path: self.path.clone(),
            content: new_content,
        }
    }
}
