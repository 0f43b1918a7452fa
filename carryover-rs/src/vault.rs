//! Vault representation and operations.

use crate::error::{MigrationError, Result};
use crate::note::Note;
use crate::parser::link::{format_block_markdown_link, format_block_wikilink};
use crate::parser::LinkStyle;
use crate::store::{LinkResolver, NoteStore};
use glob::glob;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Represents an Obsidian-style vault on disk.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
}

impl Vault {
    /// Create a new vault instance.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(MigrationError::VaultNotFound(root));
        }

        Ok(Self { root })
    }

    /// Get the full path to a note.
    pub fn note_path(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Normalize a note path (add .md extension if needed).
    pub fn normalize_note_path(&self, path: &str) -> PathBuf {
        let path = path.trim();
        if path.ends_with(".md") {
            PathBuf::from(path)
        } else {
            PathBuf::from(format!("{}.md", path))
        }
    }

    /// Check if a note exists.
    pub fn note_exists(&self, relative_path: &Path) -> bool {
        self.note_path(relative_path).is_file()
    }

    /// Load a note from the vault.
    pub fn load_note(&self, relative_path: &Path) -> Result<Note> {
        if !self.note_exists(relative_path) {
            return Err(MigrationError::NoteNotFound(relative_path.to_path_buf()));
        }
        Note::load(&self.root, relative_path)
    }

    /// Save a note to the vault.
    pub fn save_note(&self, note: &Note) -> Result<()> {
        note.save(&self.root)
    }

    /// List all markdown files in the vault, sorted by path.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        self.list_notes_in(Path::new(""))
    }

    /// List markdown files below `folder` (relative to the vault root), sorted by path.
    ///
    /// Hidden files and directories are skipped.
    pub fn list_notes_in(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let pattern = self.root.join(folder).join("**/*.md");
        let pattern_str = pattern.to_string_lossy();

        let mut notes = Vec::new();

        for entry in glob(&pattern_str)? {
            match entry {
                Ok(path) => {
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        if !relative
                            .components()
                            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
                        {
                            notes.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }

        notes.sort();
        Ok(notes)
    }

    /// Resolve a note name to a path.
    ///
    /// Handles:
    /// - Exact path matches
    /// - Note name without extension
    /// - Aliases (requires loading and parsing notes)
    pub fn resolve_note(&self, query: &str) -> Result<PathBuf> {
        let normalized = self.normalize_note_path(query);

        if self.note_exists(&normalized) {
            return Ok(normalized);
        }

        let notes = self.list_notes()?;
        let query_lower = query.trim().trim_end_matches(".md").to_lowercase();

        let mut matches: Vec<PathBuf> = Vec::new();

        for note_path in notes {
            let name = note_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("");

            if name.to_lowercase() == query_lower {
                matches.push(note_path);
                continue;
            }

            // Check aliases (this is expensive - loads and parses the note)
            if let Ok(note) = self.load_note(&note_path) {
                if let Ok(aliases) = note.aliases() {
                    if aliases.iter().any(|a| a.to_lowercase() == query_lower) {
                        matches.push(note_path);
                    }
                }
            }
        }

        match matches.len() {
            0 => Err(MigrationError::NoteNotFound(PathBuf::from(query))),
            1 => Ok(matches.remove(0)),
            _ => Err(MigrationError::AmbiguousResolution {
                query: query.to_string(),
                count: matches.len(),
                matches,
            }),
        }
    }

    /// Shortest unambiguous link text for a note: its name when no other note
    /// shares it, otherwise its vault-relative path without `.md`.
    pub fn link_text(&self, target: &Path) -> Result<String> {
        Ok(link_text_for(target, &self.stem_counts()?))
    }

    /// Number of notes carrying each file name.
    pub fn stem_counts(&self) -> Result<HashMap<String, usize>> {
        let mut counts = HashMap::new();
        for path in self.list_notes()? {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                *counts.entry(stem.to_string()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    /// A link resolver writing links in `style`.
    ///
    /// The vault is listed once, on the first wikilink, and that listing is
    /// reused for the resolver's lifetime.
    pub fn link_resolver(&self, style: LinkStyle) -> VaultLinks<'_> {
        VaultLinks {
            vault: self,
            style,
            stem_counts: OnceCell::new(),
        }
    }
}

impl NoteStore for Vault {
    fn read_note(&self, path: &Path) -> Result<Note> {
        self.load_note(path)
    }

    fn write_note(&self, note: &Note) -> Result<()> {
        self.save_note(note)
    }
}

fn link_text_for(target: &Path, stem_counts: &HashMap<String, usize>) -> String {
    let stem = target.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if stem_counts.get(stem).copied().unwrap_or(0) <= 1 {
        stem.to_string()
    } else {
        let path = target.to_string_lossy().replace('\\', "/");
        path.trim_end_matches(".md").to_string()
    }
}

/// Resolves back-links against the notes of a vault.
#[derive(Debug, Clone)]
pub struct VaultLinks<'a> {
    vault: &'a Vault,
    style: LinkStyle,
    /// `None` when the vault could not be listed.
    stem_counts: OnceCell<Option<HashMap<String, usize>>>,
}

impl LinkResolver for VaultLinks<'_> {
    fn resolve_link(&self, _from: &Path, to: &Path, anchor: &str, alias: Option<&str>) -> String {
        match self.style {
            LinkStyle::Wikilink => {
                let counts = self.stem_counts.get_or_init(|| match self.vault.stem_counts() {
                    Ok(counts) => Some(counts),
                    Err(e) => {
                        tracing::warn!("could not list notes for link text: {}", e);
                        None
                    }
                });
                let text = match counts {
                    Some(counts) => link_text_for(to, counts),
                    None => to.to_string_lossy().trim_end_matches(".md").to_string(),
                };
                format_block_wikilink(&text, anchor, alias)
            }
            LinkStyle::Markdown => {
                let name = to.file_stem().and_then(|s| s.to_str()).unwrap_or("");
                let path = to.to_string_lossy().replace('\\', "/");
                format_block_markdown_link(alias.unwrap_or(name), &path, anchor)
            }
        }
    }
}
