use super::resolve_pipeline;
use crate::app::RuntimePolicy;
use crate::cli::args::RunArgs;
use crate::config::PipelineConfig;
use crate::executor::JupyterExecutor;
use crate::pipeline::PipelineRunner;
use crate::subprocess::SubprocessManager;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Execute the pipeline
///
/// The runtime is configured here, once, before the first notebook runs.
pub fn run_pipeline_command(args: RunArgs) -> Result<()> {
    let resolved = resolve_pipeline(&args.pipeline)?;
    let config = resolved.loaded.config;

    let runtime = RuntimePolicy::from_settings(&config.runtime).build()?;
    runtime.block_on(execute_pipeline(
        resolved.root,
        config,
        args.dry_run,
        args.report,
    ))
}

async fn execute_pipeline(
    root: PathBuf,
    config: PipelineConfig,
    dry_run: bool,
    report_path: Option<PathBuf>,
) -> Result<()> {
    info!(
        "Running {} notebook(s) from {}",
        config.steps.len(),
        root.display()
    );

    let executor = Arc::new(JupyterExecutor::new(
        SubprocessManager::production(),
        config.executor.clone(),
        root,
    ));
    let outcome = PipelineRunner::new(executor)
        .with_dry_run(dry_run)
        .run(&config.steps)
        .await;

    for line in outcome.report.summary_lines() {
        println!("{line}");
    }

    if let Some(path) = &report_path {
        outcome.report.write_json(path).await?;
        info!("Report written to {}", path.display());
    }

    let report = outcome.into_result()?;
    if !report.dry_run {
        println!("{} notebook(s) executed", report.succeeded());
    }
    Ok(())
}
