//! Application module
//!
//! This module contains application-level functionality including:
//! - Configuration handling
//! - Logging setup
//! - Runtime selection

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
pub use runtime::RuntimePolicy;
