//! Read-only commands: `preview`, `section` and `daily`.

use crate::cli::args::NoteArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::daily::{DailyNote, DailyNoteLocation, DailyNotes};
use crate::error::{MigrationError, Result};
use crate::migrate::{extract_from_note, locate_task_section, MigrationOutcome};
use crate::types::{ListItemRecord, TaskSection};
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;

/// Output for the preview command.
#[derive(Debug, Serialize)]
pub struct PreviewOutput {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: MigrationOutcome,
}

/// Output for the section command.
#[derive(Debug, Serialize)]
pub struct SectionOutput {
    pub path: PathBuf,
    pub heading: String,
    pub level: u8,
    pub section: TaskSection,
    pub content: Vec<String>,
    pub list_items: Vec<ListItemRecord>,
}

/// Output for the daily command.
#[derive(Debug, Serialize)]
pub struct DailyOutput {
    pub folder: PathBuf,
    pub format: String,
    pub count: usize,
    pub notes: Vec<DailyNote>,
}

/// Show what migrating from a note would take, without writing.
pub fn preview(vault: &Vault, config: &Config, args: &NoteArgs, output: &Output) -> Result<()> {
    let path = vault.resolve_note(&args.note)?;
    let note = vault.load_note(&path)?;

    let links = vault.link_resolver(config.migration.link_style);
    let extraction = extract_from_note(&note, &path, &config.migration, &links);

    output.print(&PreviewOutput {
        path,
        outcome: extraction.outcome,
    })
}

/// Show the task section of a note.
pub fn section(vault: &Vault, config: &Config, args: &NoteArgs, output: &Output) -> Result<()> {
    let path = vault.resolve_note(&args.note)?;
    let note = vault.load_note(&path)?;
    let settings = &config.migration;

    let outline = note.outline();
    let section = locate_task_section(&outline.headings, &settings.heading_name, settings.heading_level)
        .ok_or_else(|| MigrationError::HeadingNotFound {
            note: path.clone(),
            heading: settings.heading_name.clone(),
        })?;

    let lines = note.lines();
    let content = if section.is_empty() {
        Vec::new()
    } else {
        let end = section.last_line(lines.len());
        lines
            .get(section.start_line..=end)
            .unwrap_or_default()
            .iter()
            .map(|l| l.to_string())
            .collect()
    };

    output.print(&SectionOutput {
        heading: settings.heading_name.clone(),
        level: settings.heading_level,
        list_items: outline.list_items_in(&section),
        path,
        section,
        content,
    })
}

/// List the daily notes in date order.
pub fn daily(vault: &Vault, config: &Config, output: &Output) -> Result<()> {
    let location = DailyNoteLocation::resolve(&config.daily_notes, &vault.root)?;
    let daily = DailyNotes::load(vault, &location)?;

    output.print(&DailyOutput {
        count: daily.len(),
        notes: daily.notes().to_vec(),
        folder: location.folder,
        format: location.format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::note::Note;
    use tempfile::TempDir;

    fn setup(notes: &[(&str, &str)]) -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path()).unwrap();
        for (path, content) in notes {
            vault.save_note(&Note::new(*path, *content)).unwrap();
        }
        (dir, vault)
    }

    #[test]
    fn test_preview_does_not_write() {
        let (_dir, vault) = setup(&[("2024-01-01.md", "## Tasks\n- [ ] a\n")]);
        let output = Output::new(OutputFormat::Json, true);
        let args = NoteArgs { note: "2024-01-01".to_string() };

        preview(&vault, &Config::default(), &args, &output).unwrap();

        let note = vault.load_note(std::path::Path::new("2024-01-01.md")).unwrap();
        assert_eq!(note.content, "## Tasks\n- [ ] a\n");
    }

    #[test]
    fn test_preview_output_shape() {
        let value = serde_json::to_value(PreviewOutput {
            path: PathBuf::from("a.md"),
            outcome: MigrationOutcome::Lines(vec!["- [ ] a".to_string()]),
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"path": "a.md", "outcome": "lines", "lines": ["- [ ] a"]})
        );
    }

    #[test]
    fn test_section_missing_heading() {
        let (_dir, vault) = setup(&[("a.md", "# Just a title\n")]);
        let output = Output::new(OutputFormat::Json, true);
        let args = NoteArgs { note: "a".to_string() };

        let result = section(&vault, &Config::default(), &args, &output);
        assert!(matches!(result, Err(MigrationError::HeadingNotFound { .. })));
    }
}
