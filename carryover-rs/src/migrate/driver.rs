//! Reverse scan over earlier notes, and sideways migration between two notes.

use crate::config::MigrationSettings;
use crate::error::{MigrationError, Result};
use crate::migrate::extract::{extract_from_note, MigrationOutcome};
use crate::migrate::insert::{insert_after_last_task, insert_at_section_end};
use crate::migrate::section::locate_task_section;
use crate::note::Note;
use crate::store::{LinkResolver, NoteStore};
use crate::types::TaskSection;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How a visited note was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOutcome {
    NoTasksHeading,
    AlreadyMigrated,
    Lines,
}

impl From<&MigrationOutcome> for VisitOutcome {
    fn from(outcome: &MigrationOutcome) -> Self {
        match outcome {
            MigrationOutcome::NoTasksHeading => VisitOutcome::NoTasksHeading,
            MigrationOutcome::AlreadyMigrated => VisitOutcome::AlreadyMigrated,
            MigrationOutcome::Lines(_) => VisitOutcome::Lines,
        }
    }
}

/// One source note looked at during a migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteVisit {
    pub path: PathBuf,
    pub outcome: VisitOutcome,
    pub lines: usize,
}

/// Result of a migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Note the lines were inserted into.
    pub target: PathBuf,
    /// Carried lines, in the order they were collected.
    pub lines: Vec<String>,
    pub visits: Vec<NoteVisit>,
    /// Note whose already-migrated section ended the scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<PathBuf>,
    /// Line of the target where the block starts, when anything was inserted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_at: Option<usize>,
    pub dry_run: bool,
}

impl MigrationReport {
    fn new(target: &Path, dry_run: bool) -> Self {
        Self {
            target: target.to_path_buf(),
            lines: Vec::new(),
            visits: Vec::new(),
            stopped_at: None,
            inserted_at: None,
            dry_run,
        }
    }

    fn visit(&mut self, path: &Path, outcome: &MigrationOutcome) {
        debug!("{}: {:?} ({} lines)", path.display(), VisitOutcome::from(outcome), outcome.line_count());
        self.visits.push(NoteVisit {
            path: path.to_path_buf(),
            outcome: outcome.into(),
            lines: outcome.line_count(),
        });
    }
}

/// Collaborators and options shared by both migration entry points.
pub struct MigrationContext<'a, S: NoteStore + ?Sized, R: LinkResolver + ?Sized> {
    pub store: &'a S,
    pub resolver: &'a R,
    pub settings: &'a MigrationSettings,
    pub dry_run: bool,
}

impl<'a, S: NoteStore + ?Sized, R: LinkResolver + ?Sized> MigrationContext<'a, S, R> {
    pub fn new(store: &'a S, resolver: &'a R, settings: &'a MigrationSettings) -> Self {
        Self {
            store,
            resolver,
            settings,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn task_section(&self, note: &Note) -> Result<TaskSection> {
        locate_task_section(
            &note.outline().headings,
            &self.settings.heading_name,
            self.settings.heading_level,
        )
        .ok_or_else(|| MigrationError::HeadingNotFound {
            note: note.path.clone(),
            heading: self.settings.heading_name.clone(),
        })
    }

    fn save(&self, note: &Note) -> Result<()> {
        if self.dry_run {
            debug!("dry run, not writing {}", note.path.display());
            return Ok(());
        }
        self.store.write_note(note)
    }

    /// Carry open tasks from earlier notes into `target`.
    ///
    /// `prior` lists the earlier notes newest first. Each source is rewritten
    /// before the next one is read; the scan stops at the first note whose
    /// section was already migrated. The target is written last.
    pub fn migrate_into(&self, target: &Path, prior: &[PathBuf]) -> Result<MigrationReport> {
        let target_note = self.store.read_note(target)?;
        let section = self.task_section(&target_note)?;
        let mut report = MigrationReport::new(target, self.dry_run);

        for path in prior {
            let note = self.store.read_note(path)?;
            let extraction = extract_from_note(&note, target, self.settings, self.resolver);
            report.visit(path, &extraction.outcome);

            match extraction.outcome {
                MigrationOutcome::NoTasksHeading => continue,
                MigrationOutcome::AlreadyMigrated => {
                    report.stopped_at = Some(path.clone());
                    break;
                }
                MigrationOutcome::Lines(lines) => {
                    if let Some(updated) = extraction.updated {
                        self.save(&updated)?;
                    }
                    report.lines.extend(lines);
                }
            }
        }

        if report.lines.is_empty() {
            info!("nothing to migrate into {}", target.display());
            return Ok(report);
        }

        let (lines, at) = insert_at_section_end(&target_note.lines(), &section, &report.lines);
        self.save(&target_note.with_lines(&lines))?;
        report.inserted_at = Some(at);

        info!(
            "migrated {} lines from {} notes into {}",
            report.lines.len(),
            report.visits.iter().filter(|v| v.lines > 0).count(),
            target.display()
        );
        Ok(report)
    }

    /// Move the open tasks of `source` into `destination`'s task section.
    ///
    /// Both notes must have the task heading; that is checked before
    /// anything is written. The lines go after the destination's last list
    /// item in that section.
    pub fn migrate_sideways(&self, source: &Path, destination: &Path) -> Result<MigrationReport> {
        if source == destination {
            return Err(MigrationError::SameSourceAndDestination(source.to_path_buf()));
        }

        let source_note = self.store.read_note(source)?;
        let destination_note = self.store.read_note(destination)?;
        self.task_section(&source_note)?;
        let section = self.task_section(&destination_note)?;

        let mut report = MigrationReport::new(destination, self.dry_run);
        let extraction = extract_from_note(&source_note, destination, self.settings, self.resolver);
        report.visit(source, &extraction.outcome);

        let lines = match extraction.outcome {
            MigrationOutcome::Lines(lines) if !lines.is_empty() => lines,
            MigrationOutcome::AlreadyMigrated => {
                report.stopped_at = Some(source.to_path_buf());
                return Ok(report);
            }
            _ => {
                info!("nothing to migrate from {}", source.display());
                return Ok(report);
            }
        };

        if let Some(updated) = extraction.updated {
            self.save(&updated)?;
        }

        let outline = destination_note.outline();
        let (new_lines, at) = insert_after_last_task(
            &destination_note.lines(),
            &section,
            &outline.list_items,
            &lines,
        );
        self.save(&destination_note.with_lines(&new_lines))?;

        info!(
            "migrated {} lines from {} into {}",
            lines.len(),
            source.display(),
            destination.display()
        );
        report.lines = lines;
        report.inserted_at = Some(at);
        Ok(report)
    }
}
