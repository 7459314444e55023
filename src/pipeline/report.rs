use super::step::NotebookStep;
use crate::error::{ErrorCode, NbpipeError, Result};
use crate::executor::NotebookRun;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What happened to each step of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub dry_run: bool,
    pub steps: Vec<StepReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub name: String,
    pub notebook: PathBuf,
    pub output: PathBuf,
    pub save_output: bool,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Succeeded { run: NotebookRun },
    Failed { code: u16, error: String },
    /// Not run because an earlier step failed
    Skipped,
    /// Dry run only
    Planned,
}

impl StepReport {
    pub fn new(step: &NotebookStep, outcome: StepOutcome) -> Self {
        Self {
            name: step.name(),
            notebook: step.notebook.clone(),
            output: step.output.clone(),
            save_output: step.save_output,
            outcome,
        }
    }
}

impl PipelineReport {
    pub fn start(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            dry_run,
            steps: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn succeeded(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Succeeded { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Skipped))
            .count()
    }

    pub fn failed_step(&self) -> Option<&StepReport> {
        self.steps
            .iter()
            .find(|s| matches!(s.outcome, StepOutcome::Failed { .. }))
    }

    /// One line per step for terminal output
    pub fn summary_lines(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| match &step.outcome {
                StepOutcome::Succeeded { run } => match &run.output {
                    Some(output) => format!(
                        "  ok       {} -> {} ({:.1}s)",
                        step.name,
                        output.display(),
                        run.duration.as_secs_f64()
                    ),
                    None => format!(
                        "  ok       {} ({:.1}s, output not saved)",
                        step.name,
                        run.duration.as_secs_f64()
                    ),
                },
                StepOutcome::Failed { code, .. } => {
                    format!("  FAILED   {} [E{:04}]", step.name, code)
                }
                StepOutcome::Skipped => format!("  skipped  {}", step.name),
                StepOutcome::Planned => format!(
                    "  planned  {} -> {}",
                    step.notebook.display(),
                    step.output.display()
                ),
            })
            .collect()
    }

    /// Write the report as pretty JSON, creating parent directories
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let storage_err = |e: std::io::Error| {
            NbpipeError::storage_with_code(
                ErrorCode::STORAGE_IO_ERROR,
                format!("could not write report: {}", e),
                Some(path.to_path_buf()),
            )
            .with_source(e)
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
        }
        tokio::fs::write(path, json).await.map_err(storage_err)
    }
}
