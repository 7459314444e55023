use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for nbpipe
#[derive(Error, Debug)]
pub enum NbpipeError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Execution error: {message}")]
    Execution {
        code: u16,
        message: String,
        command: Option<String>,
        exit_code: Option<i32>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Pipeline error: {message}")]
    Pipeline {
        code: u16,
        message: String,
        step: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Notebook error: {message}")]
    Notebook {
        code: u16,
        message: String,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type Result<T> = std::result::Result<T, NbpipeError>;

impl NbpipeError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message, None)
    }

    /// Create a configuration error with specific code and optional file path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create an execution error with default code
    pub fn execution(message: impl Into<String>) -> Self {
        Self::execution_with_code(ErrorCode::EXEC_GENERIC, message, None)
    }

    /// Create an execution error with specific code and command
    pub fn execution_with_code(
        code: u16,
        message: impl Into<String>,
        command: Option<String>,
    ) -> Self {
        Self::Execution {
            code,
            message: message.into(),
            command,
            exit_code: None,
            source: None,
        }
    }

    /// Create a pipeline error for a named step
    pub fn pipeline_step(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pipeline {
            code: ErrorCode::PIPELINE_STEP_FAILED,
            message: message.into(),
            step: Some(step.into()),
            source: None,
        }
    }

    /// Create a notebook error with specific code
    pub fn notebook_with_code(code: u16, message: impl Into<String>, path: PathBuf) -> Self {
        Self::Notebook {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Attach an underlying cause
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Storage { source: src, .. }
            | Self::Execution { source: src, .. }
            | Self::Pipeline { source: src, .. }
            | Self::Notebook { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Prefix the message with additional context
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Storage { message, .. }
            | Self::Execution { message, .. }
            | Self::Pipeline { message, .. }
            | Self::Notebook { message, .. } => {
                *message = format!("{}: {}", context, message);
            }
        }
        self
    }

    /// Record the exit code of a failed subprocess
    pub fn with_exit_code(mut self, code: i32) -> Self {
        if let Self::Execution { exit_code, .. } = &mut self {
            *exit_code = Some(code);
        }
        self
    }

    /// Process exit code for this error category
    ///
    /// Pipeline failures report the exit code of the step error that caused them.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Notebook { .. } => 3,
            Self::Storage { .. } => 4,
            Self::Execution { .. } => 5,
            Self::Pipeline { source, .. } => source
                .as_deref()
                .and_then(|s| s.downcast_ref::<NbpipeError>())
                .map(NbpipeError::exit_code)
                .unwrap_or(6),
        }
    }

    /// Numeric error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Storage { code, .. }
            | Self::Execution { code, .. }
            | Self::Pipeline { code, .. }
            | Self::Notebook { code, .. } => *code,
        }
    }

    /// Message suitable for showing to the user without the error chain
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => match path {
                Some(p) => format!("Configuration problem in {}: {}", p.display(), message),
                None => format!("Configuration problem: {}", message),
            },
            Self::Storage { message, path, .. } => match path {
                Some(p) => format!("Storage error at {}: {}", p.display(), message),
                None => format!("Storage error: {}", message),
            },
            Self::Execution {
                message, command, ..
            } => match command {
                Some(cmd) => format!("Command '{}' failed: {}", cmd, message),
                None => format!("Execution error: {}", message),
            },
            Self::Pipeline { message, step, .. } => match step {
                Some(s) => format!("Pipeline stopped at step '{}': {}", s, message),
                None => format!("Pipeline error: {}", message),
            },
            Self::Notebook { message, path, .. } => {
                format!("Notebook {}: {}", path.display(), message)
            }
        }
    }

    /// Full message including every source in the chain
    pub fn developer_message(&self) -> String {
        let mut msg = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            msg.push_str(&format!("\n  caused by: {}", cause));
            current = cause.source();
        }
        msg
    }
}

impl From<std::io::Error> for NbpipeError {
    fn from(err: std::io::Error) -> Self {
        NbpipeError::storage_with_code(ErrorCode::STORAGE_IO_ERROR, err.to_string(), None)
            .with_source(err)
    }
}

impl From<serde_json::Error> for NbpipeError {
    fn from(err: serde_json::Error) -> Self {
        NbpipeError::storage_with_code(
            ErrorCode::STORAGE_SERIALIZATION_ERROR,
            err.to_string(),
            None,
        )
        .with_source(err)
    }
}
