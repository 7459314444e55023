use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One call to the notebook executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotebookStep {
    /// Display name; defaults to the notebook file stem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Notebook to execute, relative to the pipeline root
    pub notebook: PathBuf,
    /// Persist the executed notebook to `output`
    #[serde(default = "default_save_output")]
    pub save_output: bool,
    /// Where the executed notebook is written, relative to the pipeline root
    pub output: PathBuf,
}

fn default_save_output() -> bool {
    true
}

impl NotebookStep {
    pub fn new(notebook: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            name: None,
            notebook: notebook.into(),
            save_output: true,
            output: output.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_save_output(mut self, save_output: bool) -> Self {
        self.save_output = save_output;
        self
    }

    pub fn name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => notebook_stem(&self.notebook),
        }
    }
}

fn notebook_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The analysis pipeline run when no pipeline file is given
pub fn builtin_steps() -> Vec<NotebookStep> {
    [
        "eda",
        "baseline_models",
        "feature_engineering",
        "model",
    ]
    .into_iter()
    .map(|stem| {
        NotebookStep::new(
            format!("notebooks/{stem}.ipynb"),
            format!("notebooks/outputs/{stem}_executed.ipynb"),
        )
    })
    .collect()
}
