//! Authentication module - credential encoding and verification

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// bcrypt only reads this many bytes of input; anything past it is ignored
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// How credentials are written into the user collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// bcrypt hash stored in the `password` field
    #[default]
    Bcrypt,
    /// Raw password stored and compared by exact equality.
    /// Insecure; kept for compatibility with existing plaintext blobs.
    Plaintext,
}

impl std::str::FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bcrypt" => Ok(PasswordScheme::Bcrypt),
            "plaintext" | "plain" => Ok(PasswordScheme::Plaintext),
            _ => Err(format!(
                "Invalid password scheme: {}. Use 'bcrypt' or 'plaintext'",
                s
            )),
        }
    }
}

impl std::fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordScheme::Bcrypt => write!(f, "bcrypt"),
            PasswordScheme::Plaintext => write!(f, "plaintext"),
        }
    }
}

/// Hash a password
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

/// Whether a stored credential looks like a bcrypt hash
pub fn is_bcrypt_hash(stored: &str) -> bool {
    stored.len() == 60
        && (stored.starts_with("$2a$")
            || stored.starts_with("$2b$")
            || stored.starts_with("$2x$")
            || stored.starts_with("$2y$"))
}

/// Reject passwords bcrypt would silently truncate
pub fn check_bcrypt_length(password: &str) -> crate::Result<()> {
    if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
        return Err(Error::PasswordTooLong {
            max: BCRYPT_MAX_PASSWORD_BYTES,
        });
    }
    Ok(())
}

/// Turn a raw password into the value written to storage
pub fn encode_password(scheme: PasswordScheme, password: &str, cost: u32) -> crate::Result<String> {
    match scheme {
        PasswordScheme::Bcrypt => {
            check_bcrypt_length(password)?;
            Ok(hash_password(password, cost)?)
        }
        PasswordScheme::Plaintext => Ok(password.to_string()),
    }
}

/// Check a candidate password against a stored credential
///
/// Under bcrypt a candidate longer than [`BCRYPT_MAX_PASSWORD_BYTES`] never
/// matches: no stored hash can have been made from it without truncation.
pub fn password_matches(scheme: PasswordScheme, candidate: &str, stored: &str) -> crate::Result<bool> {
    match scheme {
        PasswordScheme::Plaintext => Ok(candidate == stored),
        PasswordScheme::Bcrypt if is_bcrypt_hash(stored) => {
            if candidate.len() > BCRYPT_MAX_PASSWORD_BYTES {
                return Ok(false);
            }
            Ok(verify_password(candidate, stored)?)
        }
        PasswordScheme::Bcrypt => {
            log::warn!("[auth] Stored credential is not a bcrypt hash, comparing as plaintext");
            Ok(candidate == stored)
        }
    }
}
