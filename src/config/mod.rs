//! Pipeline configuration
//!
//! A pipeline file (`nbpipe.yml`) may replace the built-in notebook list and
//! tune the executor and runtime. Every section is optional:
//!
//! ```yaml
//! steps:
//!   - notebook: notebooks/eda.ipynb
//!     output: notebooks/outputs/eda_executed.ipynb
//! executor:
//!   program: jupyter
//!   kernel: python3
//!   cell_timeout: 10m
//!   timeout: 2h
//!   allow_errors: false
//! runtime:
//!   flavor: current_thread
//! ```

pub mod loader;
pub mod validator;

pub use loader::{load_pipeline_config, LoadedConfig, DEFAULT_CONFIG_FILE};
pub use validator::validate_config;

use crate::pipeline::step::{builtin_steps, NotebookStep};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default = "builtin_steps")]
    pub steps: Vec<NotebookStep>,

    #[serde(default)]
    pub executor: ExecutorSettings,

    #[serde(default)]
    pub runtime: RuntimeSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            steps: builtin_steps(),
            executor: ExecutorSettings::default(),
            runtime: RuntimeSettings::default(),
        }
    }
}

/// Settings for the `jupyter nbconvert` executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorSettings {
    /// Program providing the `nbconvert` subcommand
    #[serde(default = "default_program")]
    pub program: String,

    /// Kernel to execute with; the notebook's own kernelspec when unset
    #[serde(default)]
    pub kernel: Option<String>,

    /// Per-cell timeout handed to the execute preprocessor
    #[serde(with = "humantime_serde", default)]
    pub cell_timeout: Option<Duration>,

    /// Wall-clock limit for a whole notebook
    #[serde(with = "humantime_serde", default)]
    pub timeout: Option<Duration>,

    /// Keep executing after a cell raises
    #[serde(default)]
    pub allow_errors: bool,
}

fn default_program() -> String {
    "jupyter".to_string()
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            kernel: None,
            cell_timeout: None,
            timeout: None,
            allow_errors: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeFlavor {
    #[default]
    CurrentThread,
    MultiThread,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub flavor: RuntimeFlavor,

    /// Only meaningful for `multi_thread`
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_builtin_pipeline() {
        let config: PipelineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.steps.len(), 4);
        assert_eq!(config.executor.program, "jupyter");
        assert_eq!(config.runtime.flavor, RuntimeFlavor::CurrentThread);
    }

    #[test]
    fn test_parse_full_document() {
        let yaml = r#"
steps:
  - name: explore
    notebook: analysis/explore.ipynb
    output: analysis/out/explore.ipynb
  - notebook: analysis/train.ipynb
    output: analysis/out/train.ipynb
    save_output: false
executor:
  program: /opt/conda/bin/jupyter
  kernel: python3
  cell_timeout: 10m
  timeout: 1h 30m
  allow_errors: true
runtime:
  flavor: multi_thread
  worker_threads: 2
"#;
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.steps.len(), 2);
        assert_eq!(config.steps[0].name(), "explore");
        assert!(!config.steps[1].save_output);
        assert_eq!(config.executor.kernel.as_deref(), Some("python3"));
        assert_eq!(config.executor.cell_timeout, Some(Duration::from_secs(600)));
        assert_eq!(config.executor.timeout, Some(Duration::from_secs(5400)));
        assert!(config.executor.allow_errors);
        assert_eq!(config.runtime.flavor, RuntimeFlavor::MultiThread);
        assert_eq!(config.runtime.worker_threads, Some(2));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<PipelineConfig, _> = serde_yaml::from_str("schedule: daily\n");
        assert!(result.is_err());
    }
}
