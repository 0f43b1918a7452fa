//! Choosing where a sideways migration goes.

use crate::config::MigrationSettings;
use crate::error::{MigrationError, Result};
use std::path::{Path, PathBuf};

/// Pick the sideways destination: `explicit`, then the configured
/// `sideways_file`, then whatever `choose` returns.
///
/// `choose` runs at most once and only when nothing else names a
/// destination. Returning `None` from it cancels the migration.
pub fn resolve_destination<F>(
    explicit: Option<PathBuf>,
    settings: &MigrationSettings,
    choose: F,
) -> Result<PathBuf>
where
    F: FnOnce() -> Result<Option<PathBuf>>,
{
    if let Some(path) = explicit {
        return Ok(path);
    }

    if let Some(configured) = settings.sideways_file.as_deref() {
        return Ok(with_md_extension(configured));
    }

    tracing::debug!("no destination configured, asking");
    choose()?.ok_or(MigrationError::DestinationNotChosen)
}

fn with_md_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "md") {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".md");
        PathBuf::from(name)
    }
}
