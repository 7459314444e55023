use crate::error::{ErrorCode, NbpipeError};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Process timed out after {duration:?}")]
    Timeout { command: String, duration: Duration },

    #[error("Interrupted")]
    Interrupted(String),

    #[error("Failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mock expectation not met: {0}")]
    MockExpectationNotMet(String),
}

impl From<ProcessError> for NbpipeError {
    fn from(err: ProcessError) -> Self {
        let (code, command) = match &err {
            ProcessError::CommandNotFound(cmd) => {
                (ErrorCode::EXEC_COMMAND_NOT_FOUND, Some(cmd.clone()))
            }
            ProcessError::Timeout { command, .. } => {
                (ErrorCode::EXEC_TIMEOUT, Some(command.clone()))
            }
            ProcessError::Interrupted(command) => {
                (ErrorCode::EXEC_INTERRUPTED, Some(command.clone()))
            }
            ProcessError::SpawnFailed { command, .. } => {
                (ErrorCode::EXEC_SPAWN_FAILED, Some(command.clone()))
            }
            ProcessError::Io(_) => (ErrorCode::EXEC_OUTPUT_ERROR, None),
            ProcessError::MockExpectationNotMet(_) => (ErrorCode::EXEC_GENERIC, None),
        };

        NbpipeError::execution_with_code(code, err.to_string(), command).with_source(err)
    }
}
