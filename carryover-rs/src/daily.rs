//! Daily notes: locating them and ordering them by date.

use crate::config::DailyNoteSettings;
use crate::error::{MigrationError, Result};
use crate::vault::Vault;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Obsidian's daily notes plugin settings file, relative to the vault root.
pub const OBSIDIAN_DAILY_NOTES_FILE: &str = ".obsidian/daily-notes.json";

/// Date format used when neither the config nor Obsidian names one.
pub const DEFAULT_MOMENT_FORMAT: &str = "YYYY-MM-DD";

/// Subset of `.obsidian/daily-notes.json` we read.
#[derive(Debug, Default, Deserialize)]
struct ObsidianDailyNotes {
    #[serde(default)]
    folder: Option<String>,
    #[serde(default)]
    format: Option<String>,
}

/// Fully resolved daily-note location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyNoteLocation {
    /// Folder relative to the vault root (empty for the root itself).
    pub folder: PathBuf,
    /// chrono format of a note's folder-relative path without `.md`.
    pub format: String,
}

impl DailyNoteLocation {
    /// Fill unset settings from `.obsidian/daily-notes.json`, then from defaults.
    pub fn resolve(settings: &DailyNoteSettings, vault_root: &Path) -> Result<Self> {
        let obsidian = if settings.folder.is_some() && settings.format.is_some() {
            ObsidianDailyNotes::default()
        } else {
            read_obsidian_settings(vault_root)?
        };

        let folder = settings.folder.clone().unwrap_or_else(|| {
            obsidian
                .folder
                .as_deref()
                .map(|f| PathBuf::from(f.trim_matches('/')))
                .unwrap_or_default()
        });

        let format = match &settings.format {
            Some(format) => format.clone(),
            None => {
                let moment = obsidian
                    .format
                    .as_deref()
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or(DEFAULT_MOMENT_FORMAT);
                moment_to_chrono(moment)?
            }
        };
        validate_format(&format)?;

        Ok(Self { folder, format })
    }

    /// Vault-relative path of the daily note for `date`.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.folder
            .join(format!("{}.md", date.format(&self.format)))
    }

    /// Date of a vault-relative note path, if it is a daily note.
    pub fn date_of(&self, path: &Path) -> Option<NaiveDate> {
        let relative = path.strip_prefix(&self.folder).ok()?;
        let name = relative.to_string_lossy().replace('\\', "/");
        let name = name.strip_suffix(".md")?;
        NaiveDate::parse_from_str(name, &self.format).ok()
    }
}

fn validate_format(format: &str) -> Result<()> {
    use chrono::format::{Item, StrftimeItems};

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(MigrationError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

fn read_obsidian_settings(vault_root: &Path) -> Result<ObsidianDailyNotes> {
    let path = vault_root.join(OBSIDIAN_DAILY_NOTES_FILE);
    if !path.is_file() {
        return Ok(ObsidianDailyNotes::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Translate a moment.js date format into a chrono one.
///
/// Supports the year, month, day-of-month, day-of-year and weekday tokens and
/// `[bracketed]` literals; anything else is copied through.
pub fn moment_to_chrono(moment: &str) -> Result<String> {
    const TOKENS: &[(&str, &str)] = &[
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("M", "%-m"),
        ("DDDD", "%j"),
        ("DDD", "%-j"),
        ("DD", "%d"),
        ("D", "%-d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut out = String::new();
    let mut rest = moment;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '[' {
            let end = rest
                .find(']')
                .ok_or_else(|| MigrationError::InvalidDateFormat(moment.to_string()))?;
            out.push_str(&rest[1..end].replace('%', "%%"));
            rest = &rest[end + 1..];
            continue;
        }

        for (token, chrono) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(chrono);
                rest = after;
                continue 'outer;
            }
        }

        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    Ok(out)
}

/// A daily note and the date it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyNote {
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// All daily notes of a vault, oldest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DailyNotes {
    notes: Vec<DailyNote>,
}

impl DailyNotes {
    /// Collect the daily notes below the configured folder.
    pub fn load(vault: &Vault, location: &DailyNoteLocation) -> Result<Self> {
        let mut notes = Vec::new();
        for path in vault.list_notes_in(&location.folder)? {
            match location.date_of(&path) {
                Some(date) => notes.push(DailyNote { date, path }),
                None => tracing::debug!("{} is not a daily note", path.display()),
            }
        }
        Ok(Self::from_notes(notes))
    }

    /// Order arbitrary daily notes by date, then by path.
    pub fn from_notes(mut notes: Vec<DailyNote>) -> Self {
        notes.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.path.cmp(&b.path)));
        Self { notes }
    }

    /// Index of `path` in date order.
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.notes.iter().position(|note| note.path == path)
    }

    /// Notes strictly before `index`, newest first.
    pub fn prior(&self, index: usize) -> impl Iterator<Item = &DailyNote> {
        self.notes[..index.min(self.notes.len())].iter().rev()
    }

    /// Paths of the notes strictly before `path`, newest first.
    ///
    /// Fails with [`MigrationError::NoteNotOrdered`] when `path` is not a daily note.
    pub fn prior_paths(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let index = self
            .position(path)
            .ok_or_else(|| MigrationError::NoteNotOrdered(path.to_path_buf()))?;
        Ok(self.prior(index).map(|note| note.path.clone()).collect())
    }

    pub fn notes(&self) -> &[DailyNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono("YYYY-MM-DD").unwrap(), "%Y-%m-%d");
        assert_eq!(moment_to_chrono("YYYY/MMMM/D").unwrap(), "%Y/%B/%-d");
        assert_eq!(moment_to_chrono("dddd, MMM Do").unwrap(), "%A, %b %-do");
        assert_eq!(moment_to_chrono("[Week] YY").unwrap(), "Week %y");
        assert!(moment_to_chrono("[unclosed").is_err());
    }

    #[test]
    fn test_date_of_and_path_for() {
        let location = DailyNoteLocation {
            folder: PathBuf::from("Daily"),
            format: "%Y-%m-%d".to_string(),
        };
        assert_eq!(
            location.date_of(Path::new("Daily/2024-01-02.md")),
            Some(date(2024, 1, 2))
        );
        assert_eq!(location.date_of(Path::new("Daily/Template.md")), None);
        assert_eq!(location.date_of(Path::new("Other/2024-01-02.md")), None);
        assert_eq!(
            location.path_for(date(2024, 3, 9)),
            PathBuf::from("Daily/2024-03-09.md")
        );
    }

    #[test]
    fn test_nested_format() {
        let location = DailyNoteLocation {
            folder: PathBuf::new(),
            format: moment_to_chrono("YYYY/MM/YYYY-MM-DD").unwrap(),
        };
        assert_eq!(
            location.date_of(Path::new("2024/02/2024-02-29.md")),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn test_resolve_reads_obsidian_settings() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".obsidian")).unwrap();
        std::fs::write(
            dir.path().join(OBSIDIAN_DAILY_NOTES_FILE),
            r#"{"folder": "Journal/", "format": "DD.MM.YYYY"}"#,
        )
        .unwrap();

        let location = DailyNoteLocation::resolve(&DailyNoteSettings::default(), dir.path()).unwrap();
        assert_eq!(location.folder, PathBuf::from("Journal"));
        assert_eq!(location.format, "%d.%m.%Y");

        let overridden = DailyNoteSettings {
            folder: Some(PathBuf::from("Days")),
            format: None,
        };
        let location = DailyNoteLocation::resolve(&overridden, dir.path()).unwrap();
        assert_eq!(location.folder, PathBuf::from("Days"));
        assert_eq!(location.format, "%d.%m.%Y");
    }

    #[test]
    fn test_resolve_rejects_invalid_format() {
        let dir = TempDir::new().unwrap();
        let settings = DailyNoteSettings {
            folder: None,
            format: Some("%Y-%Q".to_string()),
        };
        assert!(matches!(
            DailyNoteLocation::resolve(&settings, dir.path()),
            Err(MigrationError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_resolve_defaults() {
        let dir = TempDir::new().unwrap();
        let location = DailyNoteLocation::resolve(&DailyNoteSettings::default(), dir.path()).unwrap();
        assert_eq!(location.folder, PathBuf::new());
        assert_eq!(location.format, "%Y-%m-%d");
    }

    #[test]
    fn test_load_orders_by_date() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path()).unwrap();
        for name in ["Daily/2024-01-03.md", "Daily/2024-01-01.md", "Daily/notes.md", "Daily/2023-12-31.md"] {
            vault.save_note(&Note::new(name, "")).unwrap();
        }

        let location = DailyNoteLocation {
            folder: PathBuf::from("Daily"),
            format: "%Y-%m-%d".to_string(),
        };
        let daily = DailyNotes::load(&vault, &location).unwrap();
        let dates: Vec<_> = daily.notes().iter().map(|n| n.date).collect();
        assert_eq!(dates, vec![date(2023, 12, 31), date(2024, 1, 1), date(2024, 1, 3)]);
    }

    #[test]
    fn test_prior_paths() {
        let daily = DailyNotes::from_notes(vec![
            DailyNote { date: date(2024, 1, 3), path: PathBuf::from("c.md") },
            DailyNote { date: date(2024, 1, 1), path: PathBuf::from("a.md") },
            DailyNote { date: date(2024, 1, 2), path: PathBuf::from("b.md") },
        ]);

        assert_eq!(
            daily.prior_paths(Path::new("c.md")).unwrap(),
            vec![PathBuf::from("b.md"), PathBuf::from("a.md")]
        );
        assert!(daily.prior_paths(Path::new("a.md")).unwrap().is_empty());
        assert!(matches!(
            daily.prior_paths(Path::new("zzz.md")),
            Err(MigrationError::NoteNotOrdered(_))
        ));
    }
}
