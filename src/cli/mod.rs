//! CLI command handling
//!
//! Dispatches CLI commands and formats console output.

pub mod spawn;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::{report, runner, scenarios};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run { filter, config } => {
            let config = match config {
                Some(path) => Config::load_from(&path)?,
                None => Config::load()?,
            };

            let summary = runner::run(&config, filter.as_deref()).await?;
            if summary.failed() > 0 {
                return Err(Error::Internal(format!(
                    "{} of {} scenarios failed",
                    summary.failed(),
                    summary.results.len()
                )));
            }
            Ok(())
        }

        Commands::List => {
            let scenarios = scenarios::all();
            println!("{}", "Collected scenarios:".blue().bold());
            for s in &scenarios {
                println!(
                    "  {} {} {}",
                    s.name.white().bold(),
                    format!("[{}]", s.profile).dimmed(),
                    s.description.dimmed()
                );
            }
            println!("\n{} scenarios", scenarios.len());
            Ok(())
        }

        Commands::Manifest { output } => {
            let config = Config::load()?;
            let path = output.unwrap_or(config.paths.manifest);
            let scenarios = scenarios::all();
            report::write_manifest(&path, &scenarios)?;
            println!("Wrote {} scenarios to {}", scenarios.len(), path.display());
            Ok(())
        }
    }
}
