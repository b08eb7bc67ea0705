//! Automated UI test harness for the aPOS payment terminal application
//!
//! Drives the terminal UI through a WebDriver-compatible automation server
//! and runs localized sale scenarios end to end.

use apos_autotest::commands::Commands;
use apos_autotest::{cli, common};
use clap::Parser;

#[derive(Parser)]
#[command(name = "apos-autotest", about = "aPOS terminal UI test harness")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A run gets a log file next to the console output; the lighter
    // commands only log to the console
    let _guard = match cli.command {
        Commands::Run { .. } => {
            let (log_path, guard) = common::logging::init_run();
            if let Some(path) = log_path {
                tracing::info!("logging to {}", path.display());
            }
            guard
        }
        _ => {
            common::logging::init_cli();
            None
        }
    };

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
