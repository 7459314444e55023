use super::{validate_config, PipelineConfig};
use crate::error::{ErrorCode, NbpipeError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Pipeline file picked up from the pipeline root when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "nbpipe.yml";

/// A validated configuration and the file it came from, if any
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: PipelineConfig,
    pub source: Option<PathBuf>,
}

/// Resolve and load the pipeline configuration
///
/// An explicit path must exist. Otherwise `<root>/nbpipe.yml` is used when
/// present, and the built-in pipeline when it is not. This runs before the
/// async runtime exists, so it uses blocking I/O.
pub fn load_pipeline_config(root: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(NbpipeError::config_with_code(
                    ErrorCode::CONFIG_NOT_FOUND,
                    "pipeline file does not exist",
                    Some(path.to_path_buf()),
                ));
            }
            Some(path.to_path_buf())
        }
        None => {
            let candidate = root.join(DEFAULT_CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    };

    let config = match &path {
        Some(path) => {
            info!("Loading pipeline from {}", path.display());
            parse_config_file(path)?
        }
        None => {
            debug!("No pipeline file found, using the built-in pipeline");
            PipelineConfig::default()
        }
    };

    validate_config(&config).map_err(|e| match (e, &path) {
        (NbpipeError::Config { code, message, source, .. }, Some(p)) => NbpipeError::Config {
            code,
            message,
            path: Some(p.clone()),
            source,
        },
        (e, _) => e,
    })?;

    Ok(LoadedConfig {
        config,
        source: path,
    })
}

fn parse_config_file(path: &Path) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        NbpipeError::config_with_code(
            ErrorCode::CONFIG_PATH_ERROR,
            format!("could not read pipeline file: {}", e),
            Some(path.to_path_buf()),
        )
        .with_source(e)
    })?;

    serde_yaml::from_str(&content).map_err(|e| {
        NbpipeError::config_with_code(
            ErrorCode::CONFIG_INVALID_YAML,
            e.to_string(),
            Some(path.to_path_buf()),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_when_no_file() {
        let dir = TempDir::new().unwrap();
        let loaded = load_pipeline_config(dir.path(), None).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config, PipelineConfig::default());
    }

    #[test]
    fn test_picks_up_default_file_in_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "steps:\n  - notebook: nb/a.ipynb\n    output: out/a.ipynb\n",
        )
        .unwrap();

        let loaded = load_pipeline_config(dir.path(), None).unwrap();
        assert_eq!(loaded.source, Some(dir.path().join(DEFAULT_CONFIG_FILE)));
        assert_eq!(loaded.config.steps.len(), 1);
        assert_eq!(loaded.config.steps[0].name(), "a");
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.yml");
        let err = load_pipeline_config(dir.path(), Some(&missing)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_yaml_reported_with_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("pipeline.yml");
        std::fs::write(&file, "steps: [unterminated").unwrap();

        let err = load_pipeline_config(dir.path(), Some(&file)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_YAML);
        assert!(err.user_message().contains("pipeline.yml"));
    }

    #[test]
    fn test_validation_failure_carries_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("pipeline.yml");
        std::fs::write(&file, "steps: []\n").unwrap();

        let err = load_pipeline_config(dir.path(), Some(&file)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_VALIDATION_FAILED);
        assert!(err.user_message().contains("pipeline.yml"));
    }
}
