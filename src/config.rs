//! Run configuration.
//!
//! Every option can be passed on the command line or through an
//! `INSERTION_*` environment variable.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use crate::git::remotes::credentials::{CredentialProvider, EnvCredentials, StaticCredentials};

#[derive(Debug, Clone, Args, Serialize)]
pub struct InsertionOptions {
    /// Path to the local working copy
    #[arg(long, env = "INSERTION_ENLISTMENT_PATH")]
    pub enlistment_path: PathBuf,

    /// Commit email and credential user name
    #[arg(long, env = "INSERTION_USERNAME")]
    pub username: String,

    /// Credential password or token
    #[arg(long, env = "INSERTION_PASSWORD", hide_env_values = true)]
    #[serde(skip)]
    pub password: Option<String>,

    /// Environment variable re-read for the password on every credential request
    #[arg(long, env = "INSERTION_PASSWORD_ENV", conflicts_with = "password")]
    pub password_env: Option<String>,

    /// Name used in commit messages and pull request titles
    #[arg(long, env = "INSERTION_NAME")]
    pub insertion_name: String,

    /// Prefix for generated branch names
    #[arg(long, env = "INSERTION_NEW_BRANCH_PREFIX", default_value = "dev/insertions/")]
    pub new_branch_prefix: String,

    /// Branch insertions are based on
    #[arg(long, env = "INSERTION_SOURCE_BRANCH", default_value = "main")]
    pub source_branch: String,

    /// Hosting project (repository owner); parsed from origin when omitted
    #[arg(long, env = "INSERTION_PROJECT")]
    pub project: Option<String>,

    /// Hosting repository name; parsed from origin when omitted
    #[arg(long, env = "INSERTION_REPOSITORY")]
    pub repository: Option<String>,

    #[arg(long, env = "INSERTION_TITLE_PREFIX", default_value = "")]
    pub title_prefix: String,

    /// Author name on insertion commits
    #[arg(long, env = "INSERTION_AUTHOR_NAME", default_value = "Insertion Tool")]
    pub author_name: String,

    /// File deleted by the placeholder commit
    #[arg(long, env = "INSERTION_PLACEHOLDER_PATH", default_value = "Init.ps1")]
    pub placeholder_path: String,
}

impl InsertionOptions {
    pub fn credential_provider(&self) -> Arc<dyn CredentialProvider> {
        match &self.password_env {
            Some(var) => Arc::new(EnvCredentials::new(&self.username, var)),
            None => Arc::new(StaticCredentials::new(
                &self.username,
                self.password.clone().unwrap_or_default(),
            )),
        }
    }

    /// Token for the hosting API, resolved at call time
    pub fn api_token(&self) -> Option<String> {
        match &self.password_env {
            Some(var) => std::env::var(var).ok(),
            None => self.password.clone(),
        }
    }
}

#[cfg(test)]
impl InsertionOptions {
    pub fn for_enlistment(path: impl Into<PathBuf>) -> Self {
        Self {
            enlistment_path: path.into(),
            username: "builder@example.com".to_string(),
            password: Some("secret".to_string()),
            password_env: None,
            insertion_name: "Roslyn".to_string(),
            new_branch_prefix: "dev/insertions/".to_string(),
            source_branch: "main".to_string(),
            project: None,
            repository: None,
            title_prefix: "[Auto] ".to_string(),
            author_name: "Insertion Tool".to_string(),
            placeholder_path: "Init.ps1".to_string(),
        }
    }
}
