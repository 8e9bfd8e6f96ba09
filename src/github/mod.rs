//! Hosted pull-request service: the trait, its GitHub implementation and a
//! recording mock for tests.

pub mod client;
#[cfg(test)]
pub mod mock;
pub mod service;

pub use client::GitHubClient;
pub use service::{
    CommitChange, FileChange, PullRequestHandle, PullRequestRequest, PullRequestService,
    PushRequest, PushResult, RefUpdate,
};
