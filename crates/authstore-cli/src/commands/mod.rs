//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod account;
pub mod shell;

use crate::output::OutputFormat;
use authstore_core::AuthState;

/// Shared context for all commands
pub struct Context {
    pub state: AuthState,
    pub format: OutputFormat,
    pub quiet: bool,
}
