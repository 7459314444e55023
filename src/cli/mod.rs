//! CLI command handlers
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Command implementations
//! - Routing

pub mod args;
pub mod commands;
pub mod router;

pub use args::{Cli, Commands};
pub use router::execute_command;
