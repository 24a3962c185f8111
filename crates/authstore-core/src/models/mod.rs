//! Data models for authstore

use serde::{Deserialize, Serialize};

/// User record as persisted in the user collection blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub username: String,
    /// Stored credential: plaintext or a bcrypt hash depending on the password scheme
    pub password: String,
}

/// User response (without the credential)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub name: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            username: user.username,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
        }
    }
}

/// Snapshot of the current sign-in state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub current_user: Option<UserResponse>,
    pub is_authenticated: bool,
}

/// Which navigation tree a front end should present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationRoot {
    /// Sign-in and registration screens
    Auth,
    /// Screens for a signed-in user
    App,
}

impl NavigationRoot {
    pub fn from_authenticated(is_authenticated: bool) -> Self {
        if is_authenticated {
            NavigationRoot::App
        } else {
            NavigationRoot::Auth
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationRoot::Auth => "auth",
            NavigationRoot::App => "app",
        }
    }
}

impl std::fmt::Display for NavigationRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
