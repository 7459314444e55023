//! Command implementation modules

pub mod list;
pub mod run;

pub use list::run_list_command;
pub use run::run_pipeline_command;

use crate::cli::args::PipelineArgs;
use crate::config::{load_pipeline_config, LoadedConfig};
use crate::error::{ErrorCode, NbpipeError};
use anyhow::Result;
use std::path::PathBuf;

/// Pipeline root and configuration resolved from the command line
pub struct ResolvedPipeline {
    pub root: PathBuf,
    pub loaded: LoadedConfig,
}

/// Resolve the pipeline root and load its configuration
///
/// Blocking: this runs before the async runtime is built, because the
/// runtime flavor comes from the configuration.
pub fn resolve_pipeline(args: &PipelineArgs) -> Result<ResolvedPipeline> {
    let root = match &args.root {
        Some(root) => std::fs::canonicalize(root).map_err(|e| {
            NbpipeError::config_with_code(
                ErrorCode::CONFIG_PATH_ERROR,
                format!("pipeline root is not accessible: {}", e),
                Some(root.clone()),
            )
            .with_source(e)
        })?,
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(NbpipeError::config_with_code(
            ErrorCode::CONFIG_PATH_ERROR,
            "pipeline root is not a directory",
            Some(root),
        )
        .into());
    }

    let mut loaded = load_pipeline_config(&root, args.config.as_deref())?;
    if let Some(program) = &args.jupyter {
        loaded.config.executor.program = program.clone();
    }

    Ok(ResolvedPipeline { root, loaded })
}
