//! CLI argument definitions using clap.

use crate::config::MigrationSettings;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "carryover")]
#[command(author, version, about = "Carry unfinished tasks forward through daily notes", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Path to a config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

/// One-off overrides of the `[migration]` config section.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsOverrides {
    /// Name of the task heading
    #[arg(long, global = true)]
    pub heading: Option<String>,

    /// Level of the task heading (1-6)
    #[arg(long, global = true)]
    pub level: Option<u8>,

    /// Link migrated lines back to their origin
    #[arg(long, global = true)]
    pub link: bool,

    /// Tag appended to migrated lines (implies --link)
    #[arg(long, global = true)]
    pub tag: Option<String>,

    /// Display text of the back-link
    #[arg(long, global = true)]
    pub alias: Option<String>,

    /// Link and tag nested lines as well as top-level ones
    #[arg(long, global = true)]
    pub tag_all_lines: bool,
}

impl SettingsOverrides {
    pub fn apply(&self, settings: &mut MigrationSettings) {
        if let Some(heading) = &self.heading {
            settings.heading_name = heading.clone();
        }
        if let Some(level) = self.level {
            settings.heading_level = level;
        }
        if self.link || self.tag.is_some() {
            settings.enable_linking_and_tagging = true;
        }
        if let Some(tag) = &self.tag {
            settings.migration_tag = Some(tag.clone());
        }
        if let Some(alias) = &self.alias {
            settings.link_alias = Some(alias.clone());
        }
        if self.tag_all_lines {
            settings.tag_all_lines = true;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Carry open tasks from earlier daily notes into a note
    Migrate(MigrateArgs),

    /// Move the open tasks of one note into another note
    Sideways(SidewaysArgs),

    /// Show what would be taken from a note, without writing
    Preview(NoteArgs),

    /// Show the task section of a note
    Section(NoteArgs),

    /// List daily notes in date order
    Daily,
}

impl Commands {
    /// Name used when reporting a failure.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Migrate(_) => "migrate",
            Commands::Sideways(_) => "sideways",
            Commands::Preview(_) => "preview",
            Commands::Section(_) => "section",
            Commands::Daily => "daily",
        }
    }
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Target note (default: today's daily note)
    pub note: Option<String>,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct SidewaysArgs {
    /// Note to take tasks from
    pub note: String,

    /// Destination note (default: sideways_file from config, else ask)
    #[arg(long)]
    pub to: Option<String>,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct NoteArgs {
    /// Note name or path
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_migrate() {
        let cli = Cli::try_parse_from(["carryover", "--vault", "/v", "migrate", "2024-01-02", "--dry-run"]).unwrap();
        assert_eq!(cli.vault, Some(PathBuf::from("/v")));
        match cli.command {
            Commands::Migrate(args) => {
                assert_eq!(args.note.as_deref(), Some("2024-01-02"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_overrides_after_subcommand() {
        let cli = Cli::try_parse_from(["carryover", "sideways", "Daily", "--to", "Inbox", "--tag", "#moved", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), "debug");

        let mut settings = MigrationSettings::default();
        cli.overrides.apply(&mut settings);
        assert!(settings.enable_linking_and_tagging);
        assert_eq!(settings.migration_tag.as_deref(), Some("#moved"));
        assert_eq!(cli.command.name(), "sideways");
    }

    #[test]
    fn test_output_format_conflicts() {
        assert!(Cli::try_parse_from(["carryover", "--json", "--yaml", "daily"]).is_err());
        let cli = Cli::try_parse_from(["carryover", "--toml", "daily"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Toml);
    }
}
