//! # nbpipe
//!
//! Executes a fixed sequence of analysis notebooks through `jupyter nbconvert`
//! and saves each executed notebook, outputs included.
//!
//! ## Usage
//!
//! ```bash
//! nbpipe [run] [--root DIR] [--config FILE] [--dry-run] [--report FILE]
//! nbpipe list
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging, runtime selection and fatal error handling
//! - `cli` - Argument parsing and command implementations
//! - `config` - Pipeline file loading and validation
//! - `error` - Crate-wide error type and error codes
//! - `executor` - The notebook execution seam and its Jupyter implementation
//! - `notebook` - Minimal nbformat v4 document model
//! - `pipeline` - Pipeline steps, sequential runner and run reports
//! - `subprocess` - Subprocess abstraction layer for testing
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod notebook;
pub mod pipeline;
pub mod subprocess;

pub use error::{NbpipeError, Result};
