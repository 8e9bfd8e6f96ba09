use anyhow::{Context, Error};
use async_trait::async_trait;
use octocrab::models::repos::Object;
use octocrab::params::repos::Reference;
use octocrab::Octocrab;
use tracing::{debug, info};

use super::service::{
    FileChange, PullRequestHandle, PullRequestRequest, PullRequestService, PushRequest, PushResult,
};
use crate::config::InsertionOptions;
use crate::error::InsertionError;
use crate::git::branches::naming::short_branch_name;

pub struct GitHubClient {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(owner: String, repo: String, token: Option<String>) -> Result<Self, Error> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        let octocrab = builder.build().context("Failed to create GitHub client")?;

        Ok(Self {
            octocrab,
            owner,
            repo,
        })
    }

    /// Owner and repository come from the options, falling back to the origin URL
    pub fn from_options(options: &InsertionOptions, origin_url: Option<&str>) -> Result<Self, Error> {
        let (owner, repo) = match (&options.project, &options.repository) {
            (Some(owner), Some(repo)) => (owner.clone(), repo.clone()),
            (project, repository) => {
                let url = origin_url
                    .context("No --project/--repository given and no origin URL to parse")?;
                let (owner, repo) = parse_github_url(url)?;
                (
                    project.clone().unwrap_or(owner),
                    repository.clone().unwrap_or(repo),
                )
            }
        };
        debug!("Using GitHub repository {owner}/{repo}");

        Self::new(owner, repo, options.api_token())
    }

    async fn get_branch_sha(&self, branch: &str) -> Result<String, Error> {
        let reference = self
            .octocrab
            .repos(&self.owner, &self.repo)
            .get_ref(&Reference::Branch(branch.to_string()))
            .await
            .with_context(|| format!("Failed to get ref for branch {branch}"))?;

        match reference.object {
            Object::Commit { sha, .. } | Object::Tag { sha, .. } => Ok(sha),
            _ => Err(anyhow::anyhow!("Unsupported object behind branch {branch}")),
        }
    }

    async fn push(&self, request: PushRequest) -> Result<PushResult, Error> {
        let mut branch = None;
        for update in &request.ref_updates {
            let name = short_branch_name(&update.name).to_string();
            info!("Creating branch {name} at {}", update.old_object_id);
            self.octocrab
                .repos(&self.owner, &self.repo)
                .create_ref(&Reference::Branch(name.clone()), update.old_object_id.clone())
                .await
                .with_context(|| format!("Failed to create branch {name}"))?;
            branch = Some(name);
        }
        let branch = branch.context("Push request carries no ref update")?;

        for commit in &request.commits {
            for change in &commit.changes {
                match change {
                    FileChange::Delete { path } => self.delete_file(&branch, path, &commit.comment).await?,
                }
            }
        }

        let head = self.get_branch_sha(&branch).await?;
        Ok(PushResult { branch, head })
    }

    async fn delete_file(&self, branch: &str, path: &str, message: &str) -> Result<(), Error> {
        let repos = self.octocrab.repos(&self.owner, &self.repo);
        let content = repos
            .get_content()
            .path(path)
            .r#ref(branch)
            .send()
            .await
            .with_context(|| format!("Failed to read {path} on {branch}"))?;
        let sha = content
            .items
            .first()
            .map(|item| item.sha.clone())
            .with_context(|| format!("{path} not found on {branch}"))?;

        info!("Deleting {path} on {branch}");
        repos
            .delete_file(path, message, sha)
            .branch(branch)
            .send()
            .await
            .with_context(|| format!("Failed to delete {path} on {branch}"))?;

        Ok(())
    }

    async fn open_pull_request(&self, request: PullRequestRequest) -> Result<PullRequestHandle, Error> {
        let title = request.full_title();
        let pull = self
            .octocrab
            .pulls(&self.owner, &self.repo)
            .create(&title, &request.source_branch, &request.target_branch)
            .body(&request.description)
            .send()
            .await
            .context("Failed to create pull request")?;

        Ok(PullRequestHandle {
            number: pull.number,
            url: pull
                .html_url
                .as_ref()
                .map(|u| u.to_string())
                .unwrap_or_default(),
            source_branch: request.source_branch,
            title,
        })
    }
}

#[async_trait]
impl PullRequestService for GitHubClient {
    async fn branch_tip(&self, branch: &str) -> crate::Result<String> {
        self.get_branch_sha(branch).await.map_err(service_error)
    }

    async fn create_push(&self, request: PushRequest) -> crate::Result<PushResult> {
        self.push(request).await.map_err(service_error)
    }

    async fn create_pull_request(
        &self,
        request: PullRequestRequest,
    ) -> crate::Result<PullRequestHandle> {
        self.open_pull_request(request).await.map_err(service_error)
    }
}

fn service_error(error: Error) -> InsertionError {
    InsertionError::Service(format!("{error:#}"))
}

/// Split a GitHub remote URL into owner and repository
pub fn parse_github_url(url: &str) -> Result<(String, String), Error> {
    // Handle SSH format: git@github.com:owner/repo.git
    if let Some(ssh_part) = url.strip_prefix("git@github.com:") {
        let repo_part = ssh_part.strip_suffix(".git").unwrap_or(ssh_part);
        let parts: Vec<&str> = repo_part.split('/').collect();
        if parts.len() == 2 {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    // Handle HTTPS format: https://github.com/owner/repo.git
    if let Some(https_part) = url.strip_prefix("https://github.com/") {
        let repo_part = https_part.strip_suffix(".git").unwrap_or(https_part);
        let parts: Vec<&str> = repo_part.split('/').collect();
        if parts.len() == 2 {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    Err(anyhow::anyhow!("Invalid GitHub URL format: {}", url))
}
