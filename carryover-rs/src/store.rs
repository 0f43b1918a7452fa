//! Collaborator contracts the migration core is written against.
//!
//! [`Vault`](crate::Vault) implements both traits on the filesystem; tests
//! substitute in-memory stores and closures.

use crate::error::Result;
use crate::note::Note;
use std::path::Path;

/// Reads and writes whole notes by vault-relative path.
pub trait NoteStore {
    fn read_note(&self, path: &Path) -> Result<Note>;

    fn write_note(&self, note: &Note) -> Result<()>;
}

/// Builds the text of a link from one note to a block anchor in another.
pub trait LinkResolver {
    fn resolve_link(&self, from: &Path, to: &Path, anchor: &str, alias: Option<&str>) -> String;
}

impl<F> LinkResolver for F
where
    F: Fn(&Path, &Path, &str, Option<&str>) -> String,
{
    fn resolve_link(&self, from: &Path, to: &Path, anchor: &str, alias: Option<&str>) -> String {
        self(from, to, anchor, alias)
    }
}
