//! CLI command definitions
//!
//! Defines the clap commands for the terminal test harness.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run test scenarios against the connected terminal
    Run {
        /// Only run scenarios whose name contains this substring
        filter: Option<String>,

        /// Configuration file (default: the per-user config, when present)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// List collected scenarios without touching the device
    List,

    /// Export the scenario manifest as CSV
    Manifest {
        /// Output file (default: TestList.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
