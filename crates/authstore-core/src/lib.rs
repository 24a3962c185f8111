//! # authstore-core
//!
//! Core account store and session state for authstore - shared by every front end.
//!
//! This crate provides:
//! - The auth state container (`state` module)
//! - Key-value persistence adapters (`storage` and `db` modules)
//! - Credential encoding and verification (`auth` module)
//! - Data models (`models` module)
//! - Configuration (`config` module)
//! - Unified error handling (`error` module)

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;

// Re-exports for convenience
pub use auth::PasswordScheme;
pub use config::{AuthConfig, SeedAccount};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{NavigationRoot, Session, User, UserResponse};
pub use state::AuthState;
pub use storage::{KeyValueStore, MemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
