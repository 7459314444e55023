//! Notebook execution
//!
//! [`NotebookExecutor`] is the seam between the pipeline and whatever
//! actually runs a notebook. Production uses [`JupyterExecutor`]; tests use
//! [`RecordingExecutor`].

pub mod jupyter;
pub mod mock;

pub use jupyter::JupyterExecutor;
pub use mock::{ExecutorCall, RecordingExecutor};

use crate::error::Result;
use crate::notebook::ExecutionSummary;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of one successful notebook execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookRun {
    pub notebook: PathBuf,
    /// Where the executed notebook was written; `None` when output was not saved
    pub output: Option<PathBuf>,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    /// Counts read back from the executed document, when it could be parsed
    pub summary: Option<ExecutionSummary>,
}

#[async_trait]
pub trait NotebookExecutor: Send + Sync {
    /// Execute `notebook`, writing the executed document to `output_path`
    /// when `save_output` is set
    async fn run_notebook(
        &self,
        notebook: &Path,
        save_output: bool,
        output_path: &Path,
    ) -> Result<NotebookRun>;
}
