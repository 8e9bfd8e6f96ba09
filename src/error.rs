//! Error taxonomy for insertion runs.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for insertion operations
pub type Result<T> = std::result::Result<T, InsertionError>;

/// Errors surfaced by the branch, staging, commit and push pipelines.
///
/// Nothing here is retried internally. The caller decides whether a failure
/// aborts the whole run.
#[derive(Debug, Error)]
pub enum InsertionError {
    /// The cancellation token was signaled at a checkpoint or mid-transfer
    #[error("operation canceled")]
    Canceled,

    /// A repository, enlistment path or remote tracking branch is missing
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A path requested for staging does not exist in the working tree or index
    #[error("path could not be matched '{}'", .0.display())]
    UnmatchedPath(PathBuf),

    #[error("nothing staged to commit")]
    EmptyCommit,

    /// Fetch or push against the remote failed (network, auth, non-fast-forward)
    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: git2::Error,
    },

    #[error("failed to obtain credentials: {0}")]
    Credentials(String),

    #[error("pull request service error: {0}")]
    Service(String),

    #[error(transparent)]
    Git(#[from] git2::Error),
}

impl InsertionError {
    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            InsertionError::Canceled => 130,
            _ => 1,
        }
    }
}
