//! Auth state container
//!
//! Owns the user collection and the current session. Every change to
//! collection membership is written through to the key-value store as one
//! JSON array before memory is updated, so a failed write leaves the
//! in-memory state exactly as it was.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::{watch, Mutex};

use crate::auth::{encode_password, password_matches};
use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::models::{NavigationRoot, Session, User, UserResponse};
use crate::storage::KeyValueStore;

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    current: Option<User>,
}

/// Session and user-collection state backed by a key-value store
pub struct AuthState {
    storage: Arc<dyn KeyValueStore>,
    config: AuthConfig,
    inner: RwLock<Inner>,
    /// Serializes read-modify-write cycles against the stored blob
    write_lock: Mutex<()>,
    auth_tx: watch::Sender<bool>,
}

impl AuthState {
    /// Create an empty, signed-out state. Call [`AuthState::initialize`] before use.
    pub fn new(storage: Arc<dyn KeyValueStore>, config: AuthConfig) -> Self {
        let (auth_tx, _) = watch::channel(false);
        Self {
            storage,
            config,
            inner: RwLock::new(Inner::default()),
            write_lock: Mutex::new(()),
            auth_tx,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Load the user collection, seeding the default administrator when it is empty
    ///
    /// Returns the number of users now held in memory. On any storage or parse
    /// failure the in-memory collection keeps its previous value.
    pub async fn initialize(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let key = &self.config.storage_key;

        let raw = self
            .storage
            .get(key)
            .await
            .map_err(log_failure("initialize: read"))?;

        let mut users: Vec<User> = match raw.as_deref() {
            None | Some("") => Vec::new(),
            Some(json) => serde_json::from_str(json)
                .map_err(Error::from)
                .map_err(log_failure("initialize: parse"))?,
        };

        if users.is_empty() {
            users = vec![self.seed_user()?];
            self.persist(&users).await?;
            log::info!(
                "[auth:init] No users stored under {}, seeded default account '{}'",
                key,
                self.config.seed.username
            );
        }

        let count = users.len();
        self.write_inner().users = users;
        log::info!("[auth:init] Loaded {} users", count);

        Ok(count)
    }

    /// Sign in with an exact username and password match
    ///
    /// The first record, in stored order, whose username and credential both
    /// match becomes the current user.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let candidates: Vec<User> = self
            .read_inner()
            .users
            .iter()
            .filter(|u| u.username == username)
            .cloned()
            .collect();

        let mut matched = None;
        for user in candidates {
            match password_matches(self.config.password_scheme, password, &user.password) {
                Ok(true) => {
                    matched = Some(user);
                    break;
                }
                Ok(false) => {}
                Err(err) => {
                    log::warn!(
                        "[auth:login] Unreadable credential for '{}', skipping record: {}",
                        user.username,
                        err
                    );
                }
            }
        }

        let Some(user) = matched else {
            log::info!("[auth:login] Rejected sign-in for '{}'", username);
            return Err(Error::InvalidCredentials);
        };

        self.write_inner().current = Some(user.clone());
        self.publish(true);
        log::info!("[auth:login] '{}' signed in", user.username);

        Ok(user)
    }

    /// Add a new account. Does not sign it in.
    pub async fn register(&self, name: &str, username: &str, password: &str) -> Result<UserResponse> {
        let _guard = self.write_lock.lock().await;

        let users = self.read_inner().users.clone();
        if users.iter().any(|u| u.username == username) {
            log::info!("[auth:register] Username '{}' already taken", username);
            return Err(Error::conflict(username));
        }

        let password = encode_password(
            self.config.password_scheme,
            password,
            self.config.bcrypt_cost,
        )?;
        let user = User {
            name: name.to_string(),
            username: username.to_string(),
            password,
        };
        let response = UserResponse::from(&user);

        let mut updated = users;
        updated.push(user);
        self.persist(&updated).await?;

        self.write_inner().users = updated;
        log::info!("[auth:register] Registered '{}'", username);

        Ok(response)
    }

    /// Clear the session. The stored collection is untouched.
    pub fn logout(&self) {
        let previous = self.write_inner().current.take();
        self.publish(false);

        if let Some(user) = previous {
            log::info!("[auth:logout] '{}' signed out", user.username);
        }
    }

    /// Remove the signed-in user's account and end the session
    ///
    /// Returns `Ok(None)` without touching storage when nobody is signed in.
    pub async fn delete_account(&self) -> Result<Option<UserResponse>> {
        let _guard = self.write_lock.lock().await;

        let (current, users) = {
            let inner = self.read_inner();
            (inner.current.clone(), inner.users.clone())
        };

        let Some(current) = current else {
            log::debug!("[auth:delete] No user signed in, nothing to delete");
            return Ok(None);
        };

        let before = users.len();
        let remaining: Vec<User> = users
            .into_iter()
            .filter(|u| u.username != current.username)
            .collect();

        if remaining.len() == before {
            log::warn!(
                "[auth:delete] '{}' is signed in but not in the user collection",
                current.username
            );
        }

        self.persist(&remaining).await?;

        let still_authenticated = {
            let mut inner = self.write_inner();
            inner.users = remaining;
            if inner
                .current
                .as_ref()
                .is_some_and(|u| u.username == current.username)
            {
                inner.current = None;
            }
            inner.current.is_some()
        };
        self.publish(still_authenticated);

        log::info!("[auth:delete] Deleted account '{}'", current.username);
        Ok(Some(UserResponse::from(current)))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.read_inner().current.is_some()
    }

    /// Currently signed-in user, without the credential
    pub fn current_user(&self) -> Option<UserResponse> {
        self.read_inner().current.as_ref().map(UserResponse::from)
    }

    /// Like [`AuthState::current_user`] but fails when nobody is signed in
    pub fn require_user(&self) -> Result<UserResponse> {
        self.current_user().ok_or(Error::NotAuthenticated)
    }

    pub fn session(&self) -> Session {
        let inner = self.read_inner();
        Session {
            current_user: inner.current.as_ref().map(UserResponse::from),
            is_authenticated: inner.current.is_some(),
        }
    }

    pub fn navigation_root(&self) -> NavigationRoot {
        NavigationRoot::from_authenticated(self.is_authenticated())
    }

    /// All users in stored order, without credentials
    pub fn users(&self) -> Vec<UserResponse> {
        self.read_inner().users.iter().map(UserResponse::from).collect()
    }

    pub fn user_count(&self) -> usize {
        self.read_inner().users.len()
    }

    pub fn find_user(&self, username: &str) -> Result<UserResponse> {
        self.read_inner()
            .users
            .iter()
            .find(|u| u.username == username)
            .map(UserResponse::from)
            .ok_or_else(|| Error::not_found(format!("user '{}'", username)))
    }

    /// Watch `is_authenticated` for changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.auth_tx.subscribe()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn seed_user(&self) -> Result<User> {
        let seed = &self.config.seed;
        Ok(User {
            name: seed.name.clone(),
            username: seed.username.clone(),
            password: encode_password(
                self.config.password_scheme,
                &seed.password,
                self.config.bcrypt_cost,
            )?,
        })
    }

    async fn persist(&self, users: &[User]) -> Result<()> {
        let json = serde_json::to_string(users)?;
        self.storage
            .set(&self.config.storage_key, &json)
            .await
            .map_err(log_failure("persist"))
    }

    fn publish(&self, is_authenticated: bool) {
        self.auth_tx.send_if_modified(|value| {
            if *value == is_authenticated {
                false
            } else {
                *value = is_authenticated;
                true
            }
        });
    }

    fn read_inner(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_inner(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_failure(context: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| {
        log::error!("[auth] {} failed: {}", context, err);
        err
    }
}
