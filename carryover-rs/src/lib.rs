//! Carryover - carry unfinished tasks forward through a vault's daily notes.
//!
//! # Overview
//!
//! Each daily note keeps its checklist under a task heading (`## Tasks` by
//! default). Carryover walks back through the notes before a target note,
//! collects every open task together with the parent items that give it
//! context, marks the originals as migrated (`- [>]`) and appends the
//! collected lines to the target's task section. The walk stops at the first
//! note whose section shows nothing but migrated tasks, so repeated runs do
//! not pick up old work twice.
//!
//! Tasks can also be moved sideways into any note with a task heading, and
//! migrated lines can optionally link back to an anchor left on the original.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use carryover::{Config, DailyNoteLocation, DailyNotes, MigrationContext, Vault};
//!
//! let config = Config::default();
//! let vault = Vault::new("/path/to/vault").unwrap();
//! let location = DailyNoteLocation::resolve(&config.daily_notes, &vault.root).unwrap();
//! let daily = DailyNotes::load(&vault, &location).unwrap();
//!
//! let target = Path::new("2024-01-02.md");
//! let prior = daily.prior_paths(target).unwrap();
//! let links = vault.link_resolver(config.migration.link_style);
//! let report = MigrationContext::new(&vault, &links, &config.migration)
//!     .migrate_into(target, &prior)
//!     .unwrap();
//! println!("carried {} lines", report.lines.len());
//! ```

pub mod cli;
pub mod config;
pub mod daily;
pub mod error;
pub mod migrate;
pub mod note;
pub mod parser;
pub mod store;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::{Config, DailyNoteSettings, MigrationSettings};
pub use daily::{DailyNote, DailyNoteLocation, DailyNotes};
pub use error::{MigrationError, Result};
pub use migrate::{MigrationContext, MigrationOutcome, MigrationReport};
pub use note::Note;
pub use store::{LinkResolver, NoteStore};
pub use types::*;
pub use vault::Vault;
