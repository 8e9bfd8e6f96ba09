//! In-memory pull-request service that records every request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::service::{
    PullRequestHandle, PullRequestRequest, PullRequestService, PushRequest, PushResult,
};
use crate::error::{InsertionError, Result};
use crate::git::branches::naming::short_branch_name;

#[derive(Debug, Clone, Default)]
pub struct MockPullRequestService {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug, Default)]
struct MockInner {
    branches: HashMap<String, String>,
    pushes: Vec<PushRequest>,
    pull_requests: Vec<PullRequestRequest>,
    fail_pull_request: bool,
}

impl MockPullRequestService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(self, branch: &str, sha: &str) -> Self {
        self.lock()
            .branches
            .insert(branch.to_string(), sha.to_string());
        self
    }

    pub fn failing_pull_requests(self) -> Self {
        self.lock().fail_pull_request = true;
        self
    }

    pub fn pushes(&self) -> Vec<PushRequest> {
        self.lock().pushes.clone()
    }

    pub fn pull_requests(&self) -> Vec<PullRequestRequest> {
        self.lock().pull_requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap()
    }
}

#[async_trait]
impl PullRequestService for MockPullRequestService {
    async fn branch_tip(&self, branch: &str) -> Result<String> {
        self.lock()
            .branches
            .get(branch)
            .cloned()
            .ok_or_else(|| InsertionError::NotFound(format!("branch {branch}")))
    }

    async fn create_push(&self, request: PushRequest) -> Result<PushResult> {
        let mut inner = self.lock();
        let update = request
            .ref_updates
            .last()
            .ok_or_else(|| InsertionError::Service("push request carries no ref update".into()))?;
        let branch = short_branch_name(&update.name).to_string();
        let head = format!("{}-{}", update.old_object_id, request.commits.len());

        inner.branches.insert(branch.clone(), head.clone());
        inner.pushes.push(request);

        Ok(PushResult { branch, head })
    }

    async fn create_pull_request(&self, request: PullRequestRequest) -> Result<PullRequestHandle> {
        let mut inner = self.lock();
        if inner.fail_pull_request {
            return Err(InsertionError::Service("pull request creation failed".into()));
        }
        inner.pull_requests.push(request.clone());

        let number = inner.pull_requests.len() as u64;
        Ok(PullRequestHandle {
            number,
            url: format!("https://example.com/pull/{number}"),
            title: request.full_title(),
            source_branch: request.source_branch,
        })
    }
}
