use super::{NotebookExecutor, NotebookRun};
use crate::config::RuntimeFlavor;
use crate::error::{NbpipeError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded `run_notebook` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorCall {
    pub notebook: PathBuf,
    pub save_output: bool,
    pub output: PathBuf,
    /// Flavor of the runtime the call was made on
    pub runtime_flavor: Option<RuntimeFlavor>,
}

/// Executor that records calls instead of running anything
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    calls: Arc<Mutex<Vec<ExecutorCall>>>,
    fail_on: Option<PathBuf>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when asked to execute `notebook`
    pub fn failing_on(notebook: impl Into<PathBuf>) -> Self {
        Self {
            calls: Arc::default(),
            fail_on: Some(notebook.into()),
        }
    }

    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotebookExecutor for RecordingExecutor {
    async fn run_notebook(
        &self,
        notebook: &Path,
        save_output: bool,
        output_path: &Path,
    ) -> Result<NotebookRun> {
        self.calls.lock().unwrap().push(ExecutorCall {
            notebook: notebook.to_path_buf(),
            save_output,
            output: output_path.to_path_buf(),
            runtime_flavor: current_flavor(),
        });

        if self.fail_on.as_deref() == Some(notebook) {
            return Err(NbpipeError::execution(format!(
                "{} raised an exception",
                notebook.display()
            )));
        }

        Ok(NotebookRun {
            notebook: notebook.to_path_buf(),
            output: save_output.then(|| output_path.to_path_buf()),
            duration: Duration::from_millis(5),
            summary: None,
        })
    }
}

fn current_flavor() -> Option<RuntimeFlavor> {
    match tokio::runtime::Handle::try_current().ok()?.runtime_flavor() {
        tokio::runtime::RuntimeFlavor::CurrentThread => Some(RuntimeFlavor::CurrentThread),
        tokio::runtime::RuntimeFlavor::MultiThread => Some(RuntimeFlavor::MultiThread),
        _ => None,
    }
}
