use super::{PipelineConfig, RuntimeFlavor};
use crate::error::{ErrorCode, NbpipeError, Result};
use std::collections::HashSet;
use std::path::Path;

const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Check a pipeline configuration, reporting every problem at once
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    let mut problems = Vec::new();

    if config.steps.is_empty() {
        problems.push("pipeline has no steps".to_string());
    }

    let mut names = HashSet::new();
    let mut outputs = HashSet::new();
    for step in &config.steps {
        let name = step.name();
        if !names.insert(name.clone()) {
            problems.push(format!("duplicate step name '{}'", name));
        }
        if !is_notebook_path(&step.notebook) {
            problems.push(format!(
                "step '{}': notebook {} is not an .ipynb file",
                name,
                step.notebook.display()
            ));
        }
        if !is_notebook_path(&step.output) {
            problems.push(format!(
                "step '{}': output {} is not an .ipynb file",
                name,
                step.output.display()
            ));
        }
        if step.output == step.notebook {
            problems.push(format!(
                "step '{}': output would overwrite the input notebook",
                name
            ));
        }
        if step.save_output && !outputs.insert(step.output.clone()) {
            problems.push(format!(
                "step '{}': output {} is written by an earlier step",
                name,
                step.output.display()
            ));
        }
    }

    if config.executor.program.trim().is_empty() {
        problems.push("executor.program cannot be empty".to_string());
    }

    match (config.runtime.flavor, config.runtime.worker_threads) {
        (_, Some(0)) => problems.push("runtime.worker_threads must be greater than 0".to_string()),
        (RuntimeFlavor::CurrentThread, Some(_)) => {
            tracing::warn!("runtime.worker_threads is ignored for the current_thread runtime");
        }
        _ => {}
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(NbpipeError::config_with_code(
            ErrorCode::CONFIG_VALIDATION_FAILED,
            problems.join("; "),
            None,
        ))
    }
}

fn is_notebook_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTEBOOK_EXTENSION))
}
