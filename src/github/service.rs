//! Hosted pull-request service interface.
//!
//! The placeholder flow creates a branch and a pull request entirely
//! server-side. Only this trait is visible to it; the GitHub client and the
//! test mock sit behind it.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// Create `name` pointing at `old_object_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefUpdate {
    /// Fully qualified ref, e.g. `refs/heads/dev/insertions/main.20240101120000`
    pub name: String,
    pub old_object_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Delete { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitChange {
    pub comment: String,
    pub changes: Vec<FileChange>,
}

/// Ref updates applied first, then commits on top of the last updated ref
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    pub ref_updates: Vec<RefUpdate>,
    pub commits: Vec<CommitChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushResult {
    pub branch: String,
    pub head: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    pub source_branch: String,
    pub target_branch: String,
    pub title: String,
    pub description: String,
    pub title_prefix: String,
}

impl PullRequestRequest {
    pub fn full_title(&self) -> String {
        format!("{}{}", self.title_prefix, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestHandle {
    pub number: u64,
    pub url: String,
    pub source_branch: String,
    pub title: String,
}

#[async_trait]
pub trait PullRequestService: Send + Sync {
    /// Commit id at the tip of `branch`
    async fn branch_tip(&self, branch: &str) -> Result<String>;

    async fn create_push(&self, request: PushRequest) -> Result<PushResult>;

    async fn create_pull_request(&self, request: PullRequestRequest) -> Result<PullRequestHandle>;
}
