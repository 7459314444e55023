/// Error code registry for nbpipe
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 3000-3999: Storage errors
/// - 4000-4999: Execution errors
/// - 5000-5999: Pipeline errors
/// - 8000-8999: Notebook errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_YAML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_PATH_ERROR: u16 = 1006;
    pub const CONFIG_VALIDATION_FAILED: u16 = 1008;

    // Storage errors (3000-3999)
    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3011;

    // Execution errors (4000-4999)
    pub const EXEC_GENERIC: u16 = 4000;
    pub const EXEC_COMMAND_NOT_FOUND: u16 = 4001;
    pub const EXEC_TIMEOUT: u16 = 4002;
    pub const EXEC_SUBPROCESS_FAILED: u16 = 4003;
    pub const EXEC_SIGNAL_RECEIVED: u16 = 4005;
    pub const EXEC_SPAWN_FAILED: u16 = 4006;
    pub const EXEC_OUTPUT_ERROR: u16 = 4007;
    pub const EXEC_RUNTIME_FAILED: u16 = 4008;
    pub const EXEC_INTERRUPTED: u16 = 4009;

    // Pipeline errors (5000-5999)
    pub const PIPELINE_GENERIC: u16 = 5000;
    pub const PIPELINE_STEP_FAILED: u16 = 5001;

    // Notebook errors (8000-8999)
    pub const NOTEBOOK_GENERIC: u16 = 8000;
    pub const NOTEBOOK_NOT_FOUND: u16 = 8001;
    pub const NOTEBOOK_INVALID_FORMAT: u16 = 8002;
    pub const NOTEBOOK_OUTPUT_MISSING: u16 = 8003;
}

/// Short human readable description of an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "Configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_YAML => "Configuration file is not valid YAML",
        ErrorCode::CONFIG_INVALID_VALUE => "Invalid configuration value",
        ErrorCode::CONFIG_PATH_ERROR => "Invalid path in configuration",
        ErrorCode::CONFIG_VALIDATION_FAILED => "Configuration validation failed",
        ErrorCode::STORAGE_GENERIC => "Storage error",
        ErrorCode::STORAGE_IO_ERROR => "I/O error while writing results",
        ErrorCode::STORAGE_SERIALIZATION_ERROR => "Failed to serialize results",
        ErrorCode::EXEC_GENERIC => "Execution error",
        ErrorCode::EXEC_COMMAND_NOT_FOUND => "Executor program not found",
        ErrorCode::EXEC_TIMEOUT => "Notebook execution timed out",
        ErrorCode::EXEC_SUBPROCESS_FAILED => "Notebook executor exited with an error",
        ErrorCode::EXEC_SIGNAL_RECEIVED => "Notebook executor terminated by signal",
        ErrorCode::EXEC_SPAWN_FAILED => "Failed to start notebook executor",
        ErrorCode::EXEC_OUTPUT_ERROR => "Could not read executor output",
        ErrorCode::EXEC_RUNTIME_FAILED => "Failed to start async runtime",
        ErrorCode::EXEC_INTERRUPTED => "Notebook execution interrupted",
        ErrorCode::PIPELINE_GENERIC => "Pipeline error",
        ErrorCode::PIPELINE_STEP_FAILED => "Pipeline step failed",
        ErrorCode::NOTEBOOK_GENERIC => "Notebook error",
        ErrorCode::NOTEBOOK_NOT_FOUND => "Notebook not found",
        ErrorCode::NOTEBOOK_INVALID_FORMAT => "Notebook is not a valid nbformat document",
        ErrorCode::NOTEBOOK_OUTPUT_MISSING => "Executed notebook was not written",
        _ => "Unknown error",
    }
}
