//! Command routing and execution

use crate::cli::args::{Commands, RunArgs};
use crate::cli::commands::{run_list_command, run_pipeline_command};
use anyhow::Result;

/// Execute a CLI command; no subcommand means `run` with defaults
pub fn execute_command(command: Option<Commands>) -> Result<()> {
    match command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => run_pipeline_command(args),
        Commands::List(args) => run_list_command(args),
    }
}
