use super::{NotebookExecutor, NotebookRun};
use crate::config::ExecutorSettings;
use crate::error::{ErrorCode, NbpipeError, Result};
use crate::notebook::Notebook;
use crate::subprocess::{ExitStatus, ProcessCommand, ProcessCommandBuilder, SubprocessManager};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Lines of executor stderr quoted in a failure message
const STDERR_TAIL_LINES: usize = 20;

/// Runs notebooks with `jupyter nbconvert --execute`
///
/// Paths are resolved against `root`, which is also the working directory of
/// the executor process so that notebooks see the same relative paths as
/// when run by hand.
pub struct JupyterExecutor {
    subprocess: SubprocessManager,
    settings: ExecutorSettings,
    root: PathBuf,
}

impl JupyterExecutor {
    pub fn new(subprocess: SubprocessManager, settings: ExecutorSettings, root: PathBuf) -> Self {
        Self {
            subprocess,
            settings,
            root,
        }
    }

    fn build_command(
        &self,
        notebook: &Path,
        save_output: bool,
        output_path: &Path,
    ) -> ProcessCommand {
        let mut builder = ProcessCommandBuilder::new(&self.settings.program)
            .args(["nbconvert", "--to", "notebook", "--execute"]);

        if let Some(kernel) = &self.settings.kernel {
            builder = builder.arg(format!("--ExecutePreprocessor.kernel_name={}", kernel));
        }
        if let Some(cell_timeout) = self.settings.cell_timeout {
            builder = builder.arg(format!(
                "--ExecutePreprocessor.timeout={}",
                cell_timeout.as_secs().max(1)
            ));
        }
        if self.settings.allow_errors {
            builder = builder.arg("--allow-errors");
        }

        builder = builder.arg(notebook.to_string_lossy());

        if save_output {
            let (dir, file_name) = split_output(output_path);
            builder = builder
                .arg("--output")
                .arg(file_name)
                .arg("--output-dir")
                .arg(dir.to_string_lossy());
        } else {
            builder = builder.arg("--stdout");
        }

        builder
            .current_dir(&self.root)
            .maybe_timeout(self.settings.timeout)
            .build()
    }

    fn check_status(status: &ExitStatus, stderr: &str, command: &ProcessCommand) -> Result<()> {
        let command_str = command.display();
        match status {
            ExitStatus::Success => Ok(()),
            ExitStatus::Error(code) => Err(NbpipeError::execution_with_code(
                ErrorCode::EXEC_SUBPROCESS_FAILED,
                format!("exited with code {}{}", code, format_stderr_tail(stderr)),
                Some(command_str),
            )
            .with_exit_code(*code)),
            ExitStatus::Signal(signal) => Err(NbpipeError::execution_with_code(
                ErrorCode::EXEC_SIGNAL_RECEIVED,
                format!("terminated by signal {}", signal),
                Some(command_str),
            )),
        }
    }
}

#[async_trait]
impl NotebookExecutor for JupyterExecutor {
    async fn run_notebook(
        &self,
        notebook: &Path,
        save_output: bool,
        output_path: &Path,
    ) -> Result<NotebookRun> {
        let input = self.root.join(notebook);
        let document = Notebook::load(&input).await?;
        debug!(
            "Loaded {} ({} cells, kernel {})",
            notebook.display(),
            document.cells.len(),
            document.kernel_name().unwrap_or("unspecified")
        );

        let resolved_output = self.root.join(output_path);
        if save_output {
            if let Some(parent) = resolved_output.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    NbpipeError::storage_with_code(
                        ErrorCode::STORAGE_IO_ERROR,
                        format!("could not create output directory: {}", e),
                        Some(parent.to_path_buf()),
                    )
                    .with_source(e)
                })?;
            }
        }

        let command = self.build_command(notebook, save_output, output_path);
        let output = self.subprocess.runner().run(command.clone()).await?;
        Self::check_status(&output.status, &output.stderr, &command)?;

        let summary = if save_output {
            if !tokio::fs::try_exists(&resolved_output).await.unwrap_or(false) {
                return Err(NbpipeError::notebook_with_code(
                    ErrorCode::NOTEBOOK_OUTPUT_MISSING,
                    "executor reported success but wrote no output",
                    output_path.to_path_buf(),
                ));
            }
            match Notebook::load(&resolved_output).await {
                Ok(executed) => Some(executed.summary()),
                Err(e) => {
                    warn!("Could not summarise {}: {}", output_path.display(), e);
                    None
                }
            }
        } else {
            match Notebook::parse(&output.stdout, notebook) {
                Ok(executed) => Some(executed.summary()),
                Err(e) => {
                    warn!("Could not summarise executed {}: {}", notebook.display(), e);
                    None
                }
            }
        };

        if let Some(summary) = &summary {
            if summary.has_errors() {
                warn!(
                    "{} finished with {} error output(s); first: {}",
                    notebook.display(),
                    summary.error_outputs,
                    summary.first_error.as_deref().unwrap_or("unknown")
                );
            }
        }

        info!(
            "Executed {} in {:.1}s",
            notebook.display(),
            output.duration.as_secs_f64()
        );

        Ok(NotebookRun {
            notebook: notebook.to_path_buf(),
            output: save_output.then(|| output_path.to_path_buf()),
            duration: output.duration,
            summary,
        })
    }
}

/// Split an output path into the directory and file name nbconvert expects
fn split_output(output_path: &Path) -> (PathBuf, String) {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, file_name)
}

fn format_stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    format!("\n{}", lines[start..].join("\n"))
}
