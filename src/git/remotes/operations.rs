use std::time::Instant;

use git2::{AutotagOption, Cred, ErrorCode, FetchOptions, PushOptions, Remote, RemoteCallbacks};
use tracing::info;

use super::credentials::CredentialProvider;
use crate::cancellation::CancellationToken;
use crate::error::{InsertionError, Result};
use crate::git::repository::core::GitRepo;

/// Credential callbacks per network call before giving up
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

impl GitRepo {
    /// Add a remote repository
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.repo().remote(name, url)?;
        Ok(())
    }

    /// Get the URL of a specific remote
    pub fn get_remote_url(&self, name: &str) -> Result<String> {
        let remote = self.find_remote(name)?;
        let url = remote
            .url()
            .ok_or_else(|| InsertionError::NotFound(format!("URL of remote '{name}'")))?;

        Ok(url.to_string())
    }

    /// Fetch a single refspec, e.g. `+refs/heads/main:refs/remotes/origin/main`
    pub fn fetch_refspec(
        &self,
        remote_name: &str,
        refspec: &str,
        credentials: &dyn CredentialProvider,
        token: &CancellationToken,
    ) -> Result<()> {
        token.check()?;
        let mut remote = self.find_remote(remote_name)?;

        info!("Fetching {refspec} from {remote_name}");
        let watch = Instant::now();

        let mut callbacks = credential_callbacks(credentials);
        callbacks.transfer_progress(|_progress| !token.is_canceled());

        let mut options = FetchOptions::new();
        options
            .remote_callbacks(callbacks)
            .download_tags(AutotagOption::None);

        remote
            .fetch(&[refspec], Some(&mut options), None)
            .map_err(|e| network_error("fetch", e, token))?;

        info!("Fetching took {} seconds", watch.elapsed().as_secs_f64());
        Ok(())
    }

    /// Push a single refspec, e.g. `+refs/heads/topic:refs/heads/topic`
    pub fn push_refspec(
        &self,
        remote_name: &str,
        refspec: &str,
        credentials: &dyn CredentialProvider,
        token: &CancellationToken,
    ) -> Result<()> {
        token.check()?;
        let mut remote = self.find_remote(remote_name)?;

        info!("Pushing {refspec} to {remote_name}");
        let watch = Instant::now();

        let mut callbacks = credential_callbacks(credentials);
        callbacks.push_negotiation(|_updates| {
            if token.is_canceled() {
                Err(git2::Error::from_str("push canceled"))
            } else {
                Ok(())
            }
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "remote rejected {refname}: {message}"
            ))),
            None => Ok(()),
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        remote
            .push(&[refspec], Some(&mut options))
            .map_err(|e| network_error("push", e, token))?;

        info!("Pushing took {} seconds", watch.elapsed().as_secs_f64());
        Ok(())
    }

    fn find_remote(&self, name: &str) -> Result<Remote<'_>> {
        self.repo().find_remote(name).map_err(|e| match e.code() {
            ErrorCode::NotFound | ErrorCode::InvalidSpec => {
                InsertionError::NotFound(format!("remote '{name}'"))
            }
            _ => InsertionError::Git(e),
        })
    }
}

fn credential_callbacks(provider: &dyn CredentialProvider) -> RemoteCallbacks<'_> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts = 0;
    callbacks.credentials(move |_url, _username_from_url, _allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("credentials were rejected"));
        }
        let credentials = provider
            .credentials()
            .map_err(|e| git2::Error::from_str(&e.to_string()))?;
        Cred::userpass_plaintext(&credentials.username, &credentials.password)
    });
    callbacks
}

fn network_error(operation: &'static str, source: git2::Error, token: &CancellationToken) -> InsertionError {
    if token.is_canceled() {
        InsertionError::Canceled
    } else {
        InsertionError::Transport { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        cancellation::CancellationToken,
        error::InsertionError,
        git::remotes::credentials::StaticCredentials,
        test_utils::{create_test_bare_repo, create_test_repo, RepoTestOperations},
    };

    fn credentials() -> StaticCredentials {
        StaticCredentials::new("builder", "secret")
    }

    #[test]
    fn get_remote_url_works() {
        let (_temp_dir, repo) = create_test_repo();
        repo.add_remote("origin", "https://github.com/owner/repo.git")
            .unwrap();

        assert_eq!(
            repo.get_remote_url("origin").unwrap(),
            "https://github.com/owner/repo.git"
        );
        assert!(matches!(
            repo.get_remote_url("upstream"),
            Err(InsertionError::NotFound(_))
        ));
    }

    #[test]
    fn push_then_fetch_updates_tracking_ref() {
        let (_remote_dir, remote_repo) = create_test_bare_repo();
        let (_local_dir, local_repo) = create_test_repo();
        local_repo
            .add_file_and_commit("test.txt", "content", "Initial commit")
            .unwrap()
            .add_local_remote("origin", &remote_repo)
            .unwrap();
        let token = CancellationToken::new();

        local_repo
            .push_refspec(
                "origin",
                "refs/heads/main:refs/heads/main",
                &credentials(),
                &token,
            )
            .unwrap();
        assert_eq!(remote_repo.get_all_branches().unwrap(), vec!["main"]);

        local_repo
            .fetch_refspec(
                "origin",
                "+refs/heads/main:refs/remotes/origin/main",
                &credentials(),
                &token,
            )
            .unwrap();
        let tracking = local_repo.find_remote_branch("origin/main").unwrap().unwrap();
        assert_eq!(tracking.tip, local_repo.head_info().unwrap().tip);
    }

    #[test]
    fn network_calls_refuse_canceled_token() {
        let (_remote_dir, remote_repo) = create_test_bare_repo();
        let (_local_dir, local_repo) = create_test_repo();
        local_repo
            .add_file_and_commit("test.txt", "content", "Initial commit")
            .unwrap()
            .add_local_remote("origin", &remote_repo)
            .unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let fetch = local_repo.fetch_refspec(
            "origin",
            "+refs/heads/main:refs/remotes/origin/main",
            &credentials(),
            &token,
        );
        let push = local_repo.push_refspec(
            "origin",
            "refs/heads/main:refs/heads/main",
            &credentials(),
            &token,
        );

        assert!(matches!(fetch, Err(InsertionError::Canceled)));
        assert!(matches!(push, Err(InsertionError::Canceled)));
        assert!(remote_repo.get_all_branches().unwrap().is_empty());
    }

    #[test]
    fn fetch_from_missing_remote_is_not_found() {
        let (_local_dir, local_repo) = create_test_repo();

        let result = local_repo.fetch_refspec(
            "origin",
            "+refs/heads/main:refs/remotes/origin/main",
            &credentials(),
            &CancellationToken::new(),
        );

        assert!(matches!(result, Err(InsertionError::NotFound(_))));
    }
}
