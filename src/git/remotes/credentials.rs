//! Credential providers for fetch and push.
//!
//! Providers are asked again on every credential callback, so a password
//! rotated outside the process is picked up by the next network call.

use tracing::debug;

use crate::error::{InsertionError, Result};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Supplies a username/password pair on demand
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials>;
}

/// Credentials fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials {
                username: username.into(),
                password: password.into(),
            },
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials> {
        debug!("Getting credentials");
        Ok(self.credentials.clone())
    }
}

/// Password read from an environment variable at each request
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    username: String,
    password_var: String,
}

impl EnvCredentials {
    pub fn new(username: impl Into<String>, password_var: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_var: password_var.into(),
        }
    }
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Result<Credentials> {
        debug!("Getting credentials from ${}", self.password_var);
        let password = std::env::var(&self.password_var).map_err(|e| {
            InsertionError::Credentials(format!("{}: {e}", self.password_var))
        })?;

        Ok(Credentials {
            username: self.username.clone(),
            password,
        })
    }
}
