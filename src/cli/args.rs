//! CLI argument structures

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Execute the analysis notebook pipeline
#[derive(Parser, Debug)]
#[command(name = "nbpipe")]
#[command(about = "nbpipe - Execute analysis notebooks in order and save their outputs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute every notebook in the pipeline (default command)
    #[command(name = "run")]
    Run(RunArgs),

    /// Show the notebooks the pipeline would execute
    #[command(name = "list")]
    List(PipelineArgs),
}

/// Options shared by every command that resolves a pipeline
#[derive(Args, Debug, Default, Clone)]
pub struct PipelineArgs {
    /// Pipeline root; notebook paths are relative to it (defaults to current directory)
    #[arg(short = 'r', long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Pipeline file (defaults to nbpipe.yml in the root, if present)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Program providing `nbconvert` (overrides executor.program)
    #[arg(long, value_name = "PROGRAM")]
    pub jupyter: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Show what would be executed without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}
