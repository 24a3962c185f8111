//! Configuration for the auth state container
//!
//! Defaults match the layout existing installs already have on disk; every
//! field can be overridden through `AUTHSTORE_*` environment variables.

use crate::auth::PasswordScheme;
use crate::error::{Error, Result};

/// Storage key the user collection lives under
pub const DEFAULT_STORAGE_KEY: &str = "@users";

/// Display name of the seeded administrator
pub const DEFAULT_ADMIN_NAME: &str = "Администратор";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Account created when the stored collection is empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl Default for SeedAccount {
    fn default() -> Self {
        Self {
            name: DEFAULT_ADMIN_NAME.to_string(),
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

/// Auth state configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Key of the JSON blob holding all users
    pub storage_key: String,
    /// Default administrator account
    pub seed: SeedAccount,
    /// How passwords are stored and compared
    pub password_scheme: PasswordScheme,
    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed: SeedAccount::default(),
            password_scheme: PasswordScheme::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    /// Build a config from defaults plus environment overrides
    ///
    /// Recognized variables: `AUTHSTORE_STORAGE_KEY`, `AUTHSTORE_PASSWORD_SCHEME`,
    /// `AUTHSTORE_BCRYPT_COST`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup("AUTHSTORE_STORAGE_KEY") {
            if key.is_empty() {
                return Err(Error::config("AUTHSTORE_STORAGE_KEY must not be empty"));
            }
            config.storage_key = key;
        }

        if let Some(scheme) = lookup("AUTHSTORE_PASSWORD_SCHEME") {
            config.password_scheme = scheme.parse().map_err(Error::config)?;
        }

        if let Some(cost) = lookup("AUTHSTORE_BCRYPT_COST") {
            config.bcrypt_cost = cost
                .parse()
                .map_err(|_| Error::config(format!("Invalid AUTHSTORE_BCRYPT_COST: {}", cost)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values bcrypt would refuse at hashing time
    pub fn validate(&self) -> Result<()> {
        if self.password_scheme == PasswordScheme::Bcrypt && !(4..=31).contains(&self.bcrypt_cost) {
            return Err(Error::config(format!(
                "bcrypt cost must be between 4 and 31, got {}",
                self.bcrypt_cost
            )));
        }
        if self.password_scheme == PasswordScheme::Bcrypt {
            crate::auth::check_bcrypt_length(&self.seed.password)?;
        }
        Ok(())
    }
}
