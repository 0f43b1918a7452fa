//! Task migration: selecting open work in earlier notes and carrying it forward.
//!
//! The pipeline for one note is section location, tree building, pruning,
//! flattening and optional linking ([`extract_from_note`]). [`MigrationContext`]
//! runs it across notes and splices the result into the destination.

pub mod destination;
pub mod driver;
pub mod extract;
pub mod filter;
pub mod insert;
pub mod linker;
pub mod section;
pub mod tree;

pub use destination::resolve_destination;
pub use driver::{MigrationContext, MigrationReport, NoteVisit, VisitOutcome};
pub use extract::{extract_from_note, is_already_migrated, MigrationOutcome, NoteExtraction};
pub use filter::{flatten, migratable_forest, prune, select_migratable, MigratableNode};
pub use insert::{insert_after_last_task, insert_at_section_end};
pub use linker::{mint_anchor, LinkedLine, Linker};
pub use section::locate_task_section;
pub use tree::{ListItemForest, ListItemNode};
