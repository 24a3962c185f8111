//! Unified error handling for authstore-core

use thiserror::Error;

/// Core error type for authstore-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password longer than {max} bytes is not supported")]
    PasswordTooLong { max: usize },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already taken: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for authstore-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a conflict error for a taken username
    pub fn conflict(username: impl Into<String>) -> Self {
        Error::Conflict(username.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether the failure came from the persistence layer rather than the caller's input
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Storage(_) | Error::Json(_) | Error::Io(_)
        )
    }
}

// Convert to String for front ends that only surface messages
impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
