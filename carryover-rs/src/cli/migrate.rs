//! `migrate` and `sideways` commands.

use crate::cli::args::{MigrateArgs, SidewaysArgs};
use crate::cli::chooser::choose_on_terminal;
use crate::cli::output::{CommandResponse, Output};
use crate::config::Config;
use crate::daily::{DailyNoteLocation, DailyNotes};
use crate::error::{MigrationError, Result};
use crate::migrate::{resolve_destination, MigrationContext, MigrationReport};
use crate::vault::Vault;
use chrono::Local;
use std::path::PathBuf;

/// Carry open tasks from earlier daily notes into the target note.
pub fn migrate(vault: &Vault, config: &Config, args: &MigrateArgs, output: &Output) -> Result<()> {
    let location = DailyNoteLocation::resolve(&config.daily_notes, &vault.root)?;

    let target = match &args.note {
        Some(query) => vault.resolve_note(query)?,
        None => {
            let today = location.path_for(Local::now().date_naive());
            if !vault.note_exists(&today) {
                return Err(MigrationError::NoteNotFound(today));
            }
            today
        }
    };

    let daily = DailyNotes::load(vault, &location)?;
    let prior = daily.prior_paths(&target)?;
    tracing::debug!("{} notes before {}", prior.len(), target.display());

    let links = vault.link_resolver(config.migration.link_style);
    let report = MigrationContext::new(vault, &links, &config.migration)
        .dry_run(args.dry_run)
        .migrate_into(&target, &prior)?;

    print_report(report, output)
}

/// Move the open tasks of one note into another.
pub fn sideways(vault: &Vault, config: &Config, args: &SidewaysArgs, output: &Output) -> Result<()> {
    let source = vault.resolve_note(&args.note)?;
    let explicit = args.to.as_deref().map(|to| vault.resolve_note(to)).transpose()?;

    let destination = resolve_destination(explicit, &config.migration, || {
        let candidates: Vec<PathBuf> = vault
            .list_notes()?
            .into_iter()
            .filter(|path| *path != source)
            .collect();
        choose_on_terminal(&candidates)
    })?;

    let links = vault.link_resolver(config.migration.link_style);
    let report = MigrationContext::new(vault, &links, &config.migration)
        .dry_run(args.dry_run)
        .migrate_sideways(&source, &destination)?;

    print_report(report, output)
}

fn print_report(report: MigrationReport, output: &Output) -> Result<()> {
    let message = summary(&report);
    output.info(&message);
    output.print(&CommandResponse::data(report).with_message(message))
}

fn summary(report: &MigrationReport) -> String {
    let verb = if report.dry_run { "Would migrate" } else { "Migrated" };
    match report.lines.len() {
        0 => "Nothing to migrate".to_string(),
        1 => format!("{} 1 line into {}", verb, report.target.display()),
        n => format!("{} {} lines into {}", verb, n, report.target.display()),
    }
}
