//! Carryover CLI entry point.

use carryover::cli::args::{Cli, Commands};
use carryover::cli::output::Output;
use carryover::cli::{inspect, migrate};
use carryover::config::Config;
use carryover::error::{exit_code, MigrationError};
use carryover::vault::Vault;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}: {}", cli.command.name(), e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), MigrationError> {
    // Load config: explicit file, else user config, replaced by a vault-local one
    let config = Config::load(cli.config.as_deref())?;
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::new(vault_path)?;

    let mut config = match cli.config {
        Some(_) => config,
        None => config.for_vault(&vault.root)?,
    };
    cli.overrides.apply(&mut config.migration);
    config.migration.validate()?;
    tracing::debug!("vault at {}", vault.root.display());

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Migrate(args) => migrate::migrate(&vault, &config, args, &output),
        Commands::Sideways(args) => migrate::sideways(&vault, &config, args, &output),
        Commands::Preview(args) => inspect::preview(&vault, &config, args, &output),
        Commands::Section(args) => inspect::section(&vault, &config, args, &output),
        Commands::Daily => inspect::daily(&vault, &config, &output),
    }
}
