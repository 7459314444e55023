//! Error handling utilities

use crate::error::NbpipeError;
use tracing::error;

/// Exit code for errors that are not an [`NbpipeError`]
const GENERAL_ERROR: i32 = 1;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `NbpipeError`: shows the user message, and the full source chain
///   in verbose mode
/// - For other errors: shows the error and, in verbose mode, its chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    eprintln!("{}", render_error(&error, verbose));
    std::process::exit(exit_code_for(&error))
}

/// Text printed to stderr for a fatal error
pub fn render_error(error: &anyhow::Error, verbose: u8) -> String {
    if let Some(err) = error.downcast_ref::<NbpipeError>() {
        let mut out = format!("Error: {}", err.user_message());
        if verbose >= 1 {
            out.push_str(&format!("\n\nContext Chain:\n{}", err.developer_message()));
        }
        return out;
    }

    let mut out = format!("Error: {error}");
    if verbose >= 1 {
        out.push_str("\n\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            out.push_str(&format!("\n  {}: {}", i, cause));
        }
    }
    out
}

pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<NbpipeError>()
        .map(NbpipeError::exit_code)
        .unwrap_or(GENERAL_ERROR)
}
