//! Common test utilities and helpers

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Notebook stems of the built-in pipeline, in execution order
pub const BUILTIN_STEMS: [&str; 4] = ["eda", "baseline_models", "feature_engineering", "model"];

/// Marker that makes the fake executor fail on a notebook
pub const FAIL_MARKER: &str = "FAIL_ME";

/// Stand-in for `jupyter nbconvert --to notebook --execute`.
///
/// Appends each input path to `calls.log` in its working directory, fails
/// on notebooks containing the fail marker, and otherwise copies the input
/// to the requested output (or stdout).
const FAKE_JUPYTER: &str = r#"#!/bin/sh
input=""
output=""
outdir="."
to_stdout=0
shift
while [ $# -gt 0 ]; do
  case "$1" in
    --to) shift 2 ;;
    --output) output="$2"; shift 2 ;;
    --output-dir) outdir="$2"; shift 2 ;;
    --stdout) to_stdout=1; shift ;;
    --*) shift ;;
    *) input="$1"; shift ;;
  esac
done
echo "$input" >> calls.log
if grep -q FAIL_ME "$input"; then
  echo "[NbConvertApp] Executing notebook with kernel: python3" >&2
  echo "CellExecutionError: ZeroDivisionError: division by zero" >&2
  exit 1
fi
if [ "$to_stdout" = 1 ]; then
  cat "$input"
else
  mkdir -p "$outdir"
  cp "$input" "$outdir/$output"
fi
"#;

pub fn notebook_json(source: &str) -> String {
    serde_json::json!({
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {"kernelspec": {"name": "python3", "display_name": "Python 3"}},
        "cells": [
            {"cell_type": "markdown", "metadata": {}, "source": ["# Analysis\n"]},
            {"cell_type": "code", "metadata": {}, "execution_count": null,
             "source": [source], "outputs": []}
        ]
    })
    .to_string()
}

/// Temporary pipeline root with notebooks and a fake executor
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Workspace containing the four built-in notebooks
    pub fn with_builtin_notebooks() -> Self {
        let ws = Self::new();
        for stem in BUILTIN_STEMS {
            ws.write_notebook(&format!("notebooks/{stem}.ipynb"), "print('ok')");
        }
        ws
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write_notebook(&self, rel: &str, source: &str) {
        self.write_file(rel, &notebook_json(source));
    }

    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, content).expect("write file");
    }

    /// Install the fake executor and return its absolute path
    pub fn fake_jupyter(&self) -> PathBuf {
        let path = self.path("bin/jupyter");
        self.write_file("bin/jupyter", FAKE_JUPYTER);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    }

    /// Notebook paths the fake executor was called with, in order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.path("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn builtin_output(&self, stem: &str) -> PathBuf {
        self.path(&format!("notebooks/outputs/{stem}_executed.ipynb"))
    }
}
