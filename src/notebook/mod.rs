//! Minimal nbformat v4 document model
//!
//! Only the parts of a notebook needed to validate inputs and summarise an
//! executed document are modelled; other cell and output fields are kept as
//! raw JSON.

use crate::error::{ErrorCode, NbpipeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lowest major nbformat version accepted
pub const MIN_NBFORMAT: u32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub nbformat: u32,
    #[serde(default)]
    pub nbformat_minor: u32,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    #[serde(default)]
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Output>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
}

/// Cell source is either a single string or a list of lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Text(String),
    Lines(Vec<String>),
}

impl Default for Source {
    fn default() -> Self {
        Source::Text(String::new())
    }
}

impl Source {
    pub fn text(&self) -> String {
        match self {
            Source::Text(s) => s.clone(),
            Source::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub output_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evalue: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Output {
    pub fn is_error(&self) -> bool {
        self.output_type == "error"
    }
}

/// Counts describing how much of a notebook was executed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub total_cells: usize,
    pub code_cells: usize,
    pub executed_cells: usize,
    pub error_outputs: usize,
    /// `ename: evalue` of the first error output, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_error: Option<String>,
}

impl ExecutionSummary {
    pub fn has_errors(&self) -> bool {
        self.error_outputs > 0
    }
}

impl Notebook {
    /// Parse a notebook from JSON text
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let notebook: Notebook = serde_json::from_str(content).map_err(|e| {
            NbpipeError::notebook_with_code(
                ErrorCode::NOTEBOOK_INVALID_FORMAT,
                format!("not a valid notebook document: {}", e),
                path.to_path_buf(),
            )
            .with_source(e)
        })?;

        if notebook.nbformat < MIN_NBFORMAT {
            return Err(NbpipeError::notebook_with_code(
                ErrorCode::NOTEBOOK_INVALID_FORMAT,
                format!(
                    "nbformat {} is not supported (need {} or newer)",
                    notebook.nbformat, MIN_NBFORMAT
                ),
                path.to_path_buf(),
            ));
        }

        Ok(notebook)
    }

    /// Read and parse a notebook file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(NbpipeError::notebook_with_code(
                    ErrorCode::NOTEBOOK_NOT_FOUND,
                    "file does not exist",
                    path.to_path_buf(),
                ));
            }
            Err(e) => {
                return Err(NbpipeError::notebook_with_code(
                    ErrorCode::NOTEBOOK_GENERIC,
                    format!("could not read file: {}", e),
                    path.to_path_buf(),
                )
                .with_source(e));
            }
        };

        Self::parse(&content, path)
    }

    pub fn code_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.cell_type == CellType::Code)
    }

    /// Kernel name recorded in the notebook metadata, if any
    pub fn kernel_name(&self) -> Option<&str> {
        self.metadata
            .get("kernelspec")
            .and_then(|k| k.get("name"))
            .and_then(|n| n.as_str())
    }

    pub fn summary(&self) -> ExecutionSummary {
        let mut summary = ExecutionSummary {
            total_cells: self.cells.len(),
            ..ExecutionSummary::default()
        };

        for cell in self.code_cells() {
            summary.code_cells += 1;
            if cell.execution_count.is_some() {
                summary.executed_cells += 1;
            }
            for output in cell.outputs.iter().filter(|o| o.is_error()) {
                summary.error_outputs += 1;
                if summary.first_error.is_none() {
                    summary.first_error = Some(format!(
                        "{}: {}",
                        output.ename.as_deref().unwrap_or("Error"),
                        output.evalue.as_deref().unwrap_or_default()
                    ));
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const EXECUTED: &str = r##"{
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {"kernelspec": {"name": "python3", "display_name": "Python 3"}},
        "cells": [
            {"cell_type": "markdown", "metadata": {}, "source": ["# EDA\n"]},
            {"cell_type": "code", "metadata": {}, "execution_count": 1,
             "source": ["import pandas as pd\n", "df = pd.read_csv('data.csv')"],
             "outputs": []},
            {"cell_type": "code", "metadata": {}, "execution_count": 2,
             "source": "df.describe()",
             "outputs": [{"output_type": "error", "ename": "KeyError", "evalue": "'price'", "traceback": []}]},
            {"cell_type": "code", "metadata": {}, "execution_count": null,
             "source": "", "outputs": []}
        ]
    }"##;

    fn path() -> PathBuf {
        PathBuf::from("notebooks/eda.ipynb")
    }

    #[test]
    fn test_parse_and_summarise() {
        let nb = Notebook::parse(EXECUTED, &path()).unwrap();
        assert_eq!(nb.kernel_name(), Some("python3"));

        let summary = nb.summary();
        assert_eq!(summary.total_cells, 4);
        assert_eq!(summary.code_cells, 3);
        assert_eq!(summary.executed_cells, 2);
        assert_eq!(summary.error_outputs, 1);
        assert!(summary.has_errors());
        assert_eq!(summary.first_error.as_deref(), Some("KeyError: 'price'"));
    }

    #[test]
    fn test_source_forms() {
        let nb = Notebook::parse(EXECUTED, &path()).unwrap();
        assert_eq!(
            nb.cells[1].source.text(),
            "import pandas as pd\ndf = pd.read_csv('data.csv')"
        );
        assert_eq!(nb.cells[2].source.text(), "df.describe()");
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let nb = Notebook::parse(EXECUTED, &path()).unwrap();
        let json = serde_json::to_value(&nb).unwrap();
        assert_eq!(json["cells"][0]["metadata"], serde_json::json!({}));
        assert_eq!(json["cells"][2]["outputs"][0]["traceback"], serde_json::json!([]));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = Notebook::parse("not json", &path()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NOTEBOOK_INVALID_FORMAT);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_rejects_old_nbformat() {
        let err = Notebook::parse(r#"{"nbformat": 3, "cells": []}"#, &path()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NOTEBOOK_INVALID_FORMAT);
        assert!(err.to_string().contains("nbformat 3"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Notebook::load(&dir.path().join("missing.ipynb"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NOTEBOOK_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("eda.ipynb");
        std::fs::write(&file, EXECUTED).unwrap();
        let nb = Notebook::load(&file).await.unwrap();
        assert_eq!(nb.code_cells().count(), 3);
    }
}
