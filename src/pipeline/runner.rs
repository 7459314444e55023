use super::report::{PipelineReport, StepOutcome, StepReport};
use super::step::NotebookStep;
use crate::error::{NbpipeError, Result};
use crate::executor::NotebookExecutor;
use std::sync::Arc;
use tracing::{error, info};

/// Report of a finished run and the error that stopped it, if any
#[derive(Debug)]
pub struct PipelineOutcome {
    pub report: PipelineReport,
    pub error: Option<NbpipeError>,
}

impl PipelineOutcome {
    pub fn into_result(self) -> Result<PipelineReport> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.report),
        }
    }
}

/// Drives the executor over the steps one at a time
///
/// Each call is awaited before the next starts. The first failure stops the
/// run; the remaining steps are reported as skipped.
pub struct PipelineRunner {
    executor: Arc<dyn NotebookExecutor>,
    dry_run: bool,
}

impl PipelineRunner {
    pub fn new(executor: Arc<dyn NotebookExecutor>) -> Self {
        Self {
            executor,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, steps: &[NotebookStep]) -> PipelineOutcome {
        let mut report = PipelineReport::start(self.dry_run);
        let mut failure = None;
        let total = steps.len();

        for (index, step) in steps.iter().enumerate() {
            let name = step.name();

            if failure.is_some() {
                report
                    .steps
                    .push(StepReport::new(step, StepOutcome::Skipped));
                continue;
            }

            if self.dry_run {
                info!(
                    "[{}/{}] Would execute {} -> {} (save_output={})",
                    index + 1,
                    total,
                    step.notebook.display(),
                    step.output.display(),
                    step.save_output
                );
                report
                    .steps
                    .push(StepReport::new(step, StepOutcome::Planned));
                continue;
            }

            info!(
                "[{}/{}] Executing {}",
                index + 1,
                total,
                step.notebook.display()
            );

            match self
                .executor
                .run_notebook(&step.notebook, step.save_output, &step.output)
                .await
            {
                Ok(run) => {
                    report
                        .steps
                        .push(StepReport::new(step, StepOutcome::Succeeded { run }));
                }
                Err(err) => {
                    error!("Step '{}' failed: {}", name, err);
                    report.steps.push(StepReport::new(
                        step,
                        StepOutcome::Failed {
                            code: err.code(),
                            error: err.to_string(),
                        },
                    ));
                    failure = Some(
                        NbpipeError::pipeline_step(name, err.user_message()).with_source(err),
                    );
                }
            }
        }

        report.finish();
        PipelineOutcome {
            report,
            error: failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::executor::RecordingExecutor;
    use crate::pipeline::step::builtin_steps;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_runs_every_step_in_order() {
        let executor = RecordingExecutor::new();
        let runner = PipelineRunner::new(Arc::new(executor.clone()));

        let report = runner.run(&builtin_steps()).await.into_result().unwrap();
        assert_eq!(report.succeeded(), 4);

        let calls: Vec<(PathBuf, bool, PathBuf)> = executor
            .calls()
            .into_iter()
            .map(|c| (c.notebook, c.save_output, c.output))
            .collect();
        let expected: Vec<(PathBuf, bool, PathBuf)> = [
            "eda",
            "baseline_models",
            "feature_engineering",
            "model",
        ]
        .iter()
        .map(|stem| {
            (
                PathBuf::from(format!("notebooks/{stem}.ipynb")),
                true,
                PathBuf::from(format!("notebooks/outputs/{stem}_executed.ipynb")),
            )
        })
        .collect();
        assert_eq!(calls, expected);
    }

    #[tokio::test]
    async fn test_failure_stops_later_steps() {
        let executor = RecordingExecutor::failing_on("notebooks/baseline_models.ipynb");
        let runner = PipelineRunner::new(Arc::new(executor.clone()));

        let outcome = runner.run(&builtin_steps()).await;

        let called: Vec<PathBuf> = executor.calls().into_iter().map(|c| c.notebook).collect();
        assert_eq!(
            called,
            vec![
                PathBuf::from("notebooks/eda.ipynb"),
                PathBuf::from("notebooks/baseline_models.ipynb"),
            ]
        );

        assert_eq!(outcome.report.succeeded(), 1);
        assert_eq!(outcome.report.skipped(), 2);
        assert_eq!(
            outcome.report.failed_step().map(|s| s.name.as_str()),
            Some("baseline_models")
        );

        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.code(), ErrorCode::PIPELINE_STEP_FAILED);
        assert_eq!(err.exit_code(), 5);
        assert!(err
            .user_message()
            .starts_with("Pipeline stopped at step 'baseline_models'"));
    }

    #[tokio::test]
    async fn test_first_step_failure_runs_nothing_else() {
        let executor = RecordingExecutor::failing_on("notebooks/eda.ipynb");
        let runner = PipelineRunner::new(Arc::new(executor.clone()));

        let outcome = runner.run(&builtin_steps()).await;
        assert_eq!(executor.calls().len(), 1);
        assert_eq!(outcome.report.skipped(), 3);
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_dry_run_calls_nothing() {
        let executor = RecordingExecutor::new();
        let runner = PipelineRunner::new(Arc::new(executor.clone())).with_dry_run(true);

        let report = runner.run(&builtin_steps()).await.into_result().unwrap();
        assert!(executor.calls().is_empty());
        assert!(report.dry_run);
        assert!(report
            .steps
            .iter()
            .all(|s| s.outcome == StepOutcome::Planned));
    }

    #[tokio::test]
    async fn test_save_output_flag_is_passed_through() {
        let executor = RecordingExecutor::new();
        let runner = PipelineRunner::new(Arc::new(executor.clone()));
        let steps = vec![NotebookStep::new("a.ipynb", "out/a.ipynb").with_save_output(false)];

        let report = runner.run(&steps).await.into_result().unwrap();
        assert!(!executor.calls()[0].save_output);
        match &report.steps[0].outcome {
            StepOutcome::Succeeded { run } => assert!(run.output.is_none()),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
