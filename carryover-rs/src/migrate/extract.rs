//! Per-note extraction: pick the lines to carry and mark them migrated.

use crate::config::MigrationSettings;
use crate::migrate::filter::select_migratable;
use crate::migrate::linker::Linker;
use crate::migrate::section::locate_task_section;
use crate::note::Note;
use crate::parser::{parse_block_ids, with_task_marker};
use crate::store::LinkResolver;
use crate::types::{ListItemRecord, MIGRATED_MARKER};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// What a single note contributed to a migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "lines", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// The note has no task heading; it says nothing either way.
    NoTasksHeading,
    /// Only migrated markers and no open ones: earlier notes were handled before.
    AlreadyMigrated,
    /// Lines to carry, possibly none.
    Lines(Vec<String>),
}

impl MigrationOutcome {
    /// Number of carried lines.
    pub fn line_count(&self) -> usize {
        match self {
            MigrationOutcome::Lines(lines) => lines.len(),
            _ => 0,
        }
    }
}

/// The outcome plus the rewritten source note, when anything changed.
#[derive(Debug, Clone)]
pub struct NoteExtraction {
    pub outcome: MigrationOutcome,
    pub updated: Option<Note>,
}

impl NoteExtraction {
    fn unchanged(outcome: MigrationOutcome) -> Self {
        Self { outcome, updated: None }
    }
}

/// Whether a section's list items show a finished earlier migration.
pub fn is_already_migrated(records: &[ListItemRecord], open_markers: &[char]) -> bool {
    let has_open = records.iter().any(|r| r.is_open(open_markers));
    let has_migrated = records.iter().any(ListItemRecord::is_migrated);
    has_migrated && !has_open
}

/// Extract the migratable lines of `note` bound for `destination`.
///
/// Nothing is written here; the caller saves `updated` if it wants the
/// source marked.
pub fn extract_from_note<R: LinkResolver + ?Sized>(
    note: &Note,
    destination: &Path,
    settings: &MigrationSettings,
    resolver: &R,
) -> NoteExtraction {
    let outline = note.outline();
    let Some(section) = locate_task_section(&outline.headings, &settings.heading_name, settings.heading_level) else {
        return NoteExtraction::unchanged(MigrationOutcome::NoTasksHeading);
    };

    let records = outline.list_items_in(&section);
    if is_already_migrated(&records, &settings.open_markers) {
        return NoteExtraction::unchanged(MigrationOutcome::AlreadyMigrated);
    }

    let selected = select_migratable(&records, &settings.open_markers);
    if selected.is_empty() {
        return NoteExtraction::unchanged(MigrationOutcome::Lines(Vec::new()));
    }

    let selected_lines: HashSet<usize> = selected.iter().map(|r| r.line).collect();
    let mut linker = settings.enable_linking_and_tagging.then(|| {
        Linker::new(&note.path, destination, resolver, parse_block_ids(&note.content))
            .with_alias(settings.link_alias.as_deref())
            .with_tag(settings.migration_tag.as_deref())
    });

    let mut lines: Vec<String> = note.lines().into_iter().map(str::to_string).collect();
    let mut carried = Vec::with_capacity(selected.len());

    for record in &selected {
        let Some(original) = lines.get(record.line).cloned() else {
            continue;
        };

        let top_level = record
            .parent_line
            .is_none_or(|parent| !selected_lines.contains(&parent));

        let (mut kept, moved) = match linker.as_mut() {
            Some(linker) if settings.tag_all_lines || top_level => {
                let linked = linker.link(&original);
                (linked.source, linked.carried)
            }
            _ => (original.clone(), original),
        };

        if record.is_open(&settings.open_markers) {
            if let Some(marked) = with_task_marker(&kept, MIGRATED_MARKER) {
                kept = marked;
            }
        }

        lines[record.line] = kept;
        carried.push(moved);
    }

    NoteExtraction {
        outcome: MigrationOutcome::Lines(carried),
        updated: Some(note.with_lines(&lines)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::trailing_block_id;
    use crate::store::memory::stem_links;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn settings() -> MigrationSettings {
        MigrationSettings::default()
    }

    fn extract(content: &str, settings: &MigrationSettings) -> NoteExtraction {
        let note = Note::new("Daily/2024-01-01.md", content);
        extract_from_note(&note, Path::new("Daily/2024-01-02.md"), settings, &stem_links)
    }

    #[test]
    fn test_no_heading() {
        let result = extract("# Day\n- [ ] loose", &settings());
        assert_eq!(result.outcome, MigrationOutcome::NoTasksHeading);
        assert!(result.updated.is_none());
    }

    #[test]
    fn test_already_migrated() {
        let result = extract("## Tasks\n- [>] moved\n- [x] done\n", &settings());
        assert_eq!(result.outcome, MigrationOutcome::AlreadyMigrated);
    }

    #[test]
    fn test_closed_only_is_not_already_migrated() {
        let result = extract("## Tasks\n- [x] done\n- [-] dropped\n", &settings());
        assert_eq!(result.outcome, MigrationOutcome::Lines(vec![]));
        assert!(result.updated.is_none());
    }

    #[test]
    fn test_empty_section() {
        let result = extract("## Tasks\n## Notes\n- [ ] not a task of ours", &settings());
        assert_eq!(result.outcome, MigrationOutcome::Lines(vec![]));
    }

    #[test]
    fn test_extract_marks_source() {
        let content = "# 2024-01-01\n## Tasks\n- [x] project\n  - [ ] step\n  - [x] done step\n- [ ] call\n## Notes\n- [ ] outside\n";
        let result = extract(content, &settings());

        assert_eq!(
            result.outcome,
            MigrationOutcome::Lines(vec![
                "- [x] project".to_string(),
                "  - [ ] step".to_string(),
                "- [ ] call".to_string(),
            ])
        );
        assert_eq!(
            result.updated.unwrap().content,
            "# 2024-01-01\n## Tasks\n- [x] project\n  - [>] step\n  - [x] done step\n- [>] call\n## Notes\n- [ ] outside\n"
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract("## Tasks\n- [ ] a\n  - [ ] b\n", &settings());
        let updated = first.updated.unwrap();

        let second = extract_from_note(&updated, Path::new("x.md"), &settings(), &stem_links);
        assert_eq!(second.outcome, MigrationOutcome::AlreadyMigrated);
    }

    #[test]
    fn test_linking_top_level_only() {
        let settings = MigrationSettings {
            enable_linking_and_tagging: true,
            migration_tag: Some("#migrated".to_string()),
            ..settings()
        };
        let result = extract("## Tasks\n- [ ] parent\n  - [ ] child\n", &settings);
        let updated = result.updated.unwrap();
        let source_lines = updated.lines();

        let anchor = trailing_block_id(source_lines[1]).unwrap().to_string();
        assert_eq!(source_lines[1], format!("- [>] parent ^{}", anchor));
        assert_eq!(source_lines[2], "  - [>] child");
        assert_eq!(
            result.outcome,
            MigrationOutcome::Lines(vec![
                format!("- [ ] parent #migrated [[2024-01-01#^{}]]", anchor),
                "  - [ ] child".to_string(),
            ])
        );
    }

    #[test]
    fn test_linking_all_lines() {
        let settings = MigrationSettings {
            enable_linking_and_tagging: true,
            tag_all_lines: true,
            ..settings()
        };
        let result = extract("## Tasks\n- [ ] parent\n  - [ ] child\n", &settings);
        let updated = result.updated.unwrap();
        assert!(updated.lines().iter().skip(1).all(|l| trailing_block_id(l).is_some()));
        assert_eq!(result.outcome.line_count(), 2);
    }

    #[test]
    fn test_context_parent_carries_the_link() {
        let settings = MigrationSettings {
            enable_linking_and_tagging: true,
            ..settings()
        };
        let note = Note::new(PathBuf::from("a.md"), "## Tasks\n- Errands\n  - [ ] post office\n");
        let result = extract_from_note(&note, Path::new("b.md"), &settings, &stem_links);

        let updated = result.updated.unwrap();
        let anchor = trailing_block_id(updated.lines()[1]).unwrap().to_string();
        assert_eq!(updated.lines()[2], "  - [>] post office");
        assert_eq!(
            result.outcome,
            MigrationOutcome::Lines(vec![
                format!("- Errands [[a#^{}]]", anchor),
                "  - [ ] post office".to_string(),
            ])
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(MigrationOutcome::Lines(vec!["- [ ] a".to_string()])).unwrap();
        assert_eq!(json, serde_json::json!({"outcome": "lines", "lines": ["- [ ] a"]}));
        let json = serde_json::to_value(MigrationOutcome::AlreadyMigrated).unwrap();
        assert_eq!(json, serde_json::json!({"outcome": "already_migrated"}));
    }
}
