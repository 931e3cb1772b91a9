//! Credential resolution.
//!
//! Each credential is resolved on its own: an explicit override wins, then the
//! matching environment variable, otherwise it stays unset. The data-node
//! password never stands in for the sentinel password or the other way round.

use crate::env::{EnvSource, REDIS_PASSWORD, REDIS_SENTINEL_PASSWORD, REDIS_USERNAME};
use serde::Serializer;

/// Explicitly supplied credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialsOverride {
    /// Username.
    pub username: Option<String>,
    /// Data-node password.
    pub password: Option<String>,
    /// Sentinel-process password.
    pub sentinel_password: Option<String>,
}

impl CredentialsOverride {
    /// Create an empty override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the data-node password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the sentinel password.
    pub fn sentinel_password(mut self, password: impl Into<String>) -> Self {
        self.sentinel_password = Some(password.into());
        self
    }
}

impl std::fmt::Debug for CredentialsOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsOverride")
            .field("username", &self.username)
            .field("password", &mask(self.password.as_deref()))
            .field("sentinel_password", &mask(self.sentinel_password.as_deref()))
            .finish()
    }
}

/// Resolved credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: Option<String>,
    password: Option<String>,
    sentinel_password: Option<String>,
}

impl Credentials {
    /// Resolve credentials from an override and an environment source.
    pub fn resolve(overrides: &CredentialsOverride, env: &impl EnvSource) -> Self {
        Self {
            username: overrides
                .username
                .clone()
                .or_else(|| env.get(REDIS_USERNAME)),
            password: overrides
                .password
                .clone()
                .or_else(|| env.get(REDIS_PASSWORD)),
            sentinel_password: overrides
                .sentinel_password
                .clone()
                .or_else(|| env.get(REDIS_SENTINEL_PASSWORD)),
        }
    }

    /// Get the username.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Get the data-node password.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Get the sentinel password.
    pub fn sentinel_password(&self) -> Option<&str> {
        self.sentinel_password.as_deref()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &mask(self.password.as_deref()))
            .field("sentinel_password", &mask(self.sentinel_password.as_deref()))
            .finish()
    }
}

/// Render a secret as `***` when set.
pub fn mask(secret: Option<&str>) -> Option<&'static str> {
    secret.map(|_| "***")
}

pub(crate) fn mask_secret<S: Serializer>(
    secret: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match mask(secret.as_deref()) {
        Some(masked) => serializer.serialize_str(masked),
        None => serializer.serialize_none(),
    }
}
