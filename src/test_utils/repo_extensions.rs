use std::path::PathBuf;

use anyhow::{Context, Error};

use crate::cancellation::CancellationToken;
use crate::git::branches::naming::{tracking_fetch_refspec, ORIGIN};
use crate::git::remotes::credentials::StaticCredentials;
use crate::git::{GitRepo, InsertionSignature};

/// Create a new temporary repository whose HEAD points at an unborn `main`
pub fn create_test_repo() -> (assert_fs::TempDir, GitRepo) {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let repo = GitRepo::init(temp_dir.path()).unwrap();
    (temp_dir, repo)
}

/// Create a new temporary bare repository for testing
pub fn create_test_bare_repo() -> (assert_fs::TempDir, GitRepo) {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let repo = GitRepo::init_bare(temp_dir.path()).unwrap();
    (temp_dir, repo)
}

pub fn test_signature() -> InsertionSignature {
    InsertionSignature::new("Test User", "test@example.com").unwrap()
}

fn test_credentials() -> StaticCredentials {
    StaticCredentials::new("test@example.com", "secret")
}

/// Test-only trait that adds assertion methods to GitRepo
pub trait RepoAssertions {
    /// Assert that HEAD's symbolic target matches the expected value
    fn assert_head_symbolic_target(&self, expected_target: &str) -> &Self;

    /// Assert that the current branch matches the expected branch name
    fn assert_current_branch(&self, branch_name: &str) -> &Self;

    fn assert_file_exists(&self, filename: &str) -> &Self;

    fn assert_file_not_exists(&self, filename: &str) -> &Self;

    fn assert_file_content(&self, filename: &str, expected: &str) -> &Self;

    /// Assert that commit messages match the expected order (newest first)
    fn assert_commit_messages(&self, expected_messages: &[&str]) -> &Self;
}

/// Test-only trait that adds test helper operations to GitRepo
pub trait RepoTestOperations {
    /// Write a file with content (fluent)
    fn add_file(&self, filename: &str, content: &str) -> Result<&Self, Error>;

    /// Append content to an existing file (fluent)
    fn append_to_file(&self, filename: &str, content: &str) -> Result<&Self, Error>;

    fn remove_file(&self, filename: &str) -> Result<&Self, Error>;

    /// Write, stage and commit one file (fluent)
    fn add_file_and_commit(
        &self,
        filename: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<&Self, Error>;

    /// Add a remote pointing to another local GitRepo
    fn add_local_remote(&self, name: &str, other_repo: &GitRepo) -> Result<&Self, Error>;

    /// Push a local branch to the same name on `origin`
    fn push_branch(&self, branch_name: &str) -> Result<&Self, Error>;

    /// Update `origin/<branch>` from the remote
    fn fetch_branch(&self, branch_name: &str) -> Result<&Self, Error>;
}

impl RepoAssertions for GitRepo {
    fn assert_head_symbolic_target(&self, expected_target: &str) -> &Self {
        match self.get_head_symbolic_target() {
            Ok(actual_target) => {
                if actual_target != expected_target {
                    panic!(
                        "HEAD symbolic target mismatch. Expected: '{expected_target}', Found: '{actual_target}'"
                    );
                }
            }
            Err(e) => {
                panic!("Failed to get HEAD symbolic target: {e}");
            }
        }
        self
    }

    fn assert_current_branch(&self, branch_name: &str) -> &Self {
        let expected_target = format!("refs/heads/{branch_name}");
        self.assert_head_symbolic_target(&expected_target);
        self
    }

    fn assert_file_exists(&self, filename: &str) -> &Self {
        let file_path = self.path().join(filename);
        if !file_path.exists() {
            panic!("Expected file '{filename}' to exist at path: {file_path:?}");
        }
        self
    }

    fn assert_file_not_exists(&self, filename: &str) -> &Self {
        let file_path = self.path().join(filename);
        if file_path.exists() {
            panic!("Expected file '{filename}' to not exist at path: {file_path:?}");
        }
        self
    }

    fn assert_file_content(&self, filename: &str, expected: &str) -> &Self {
        let file_path = self.path().join(filename);
        let actual = std::fs::read_to_string(&file_path)
            .unwrap_or_else(|e| panic!("Failed to read '{filename}': {e}"));
        if actual != expected {
            panic!("Content mismatch in '{filename}'. Expected: {expected:?}, Found: {actual:?}");
        }
        self
    }

    fn assert_commit_messages(&self, expected_messages: &[&str]) -> &Self {
        let commits = self.list_commits().unwrap_or_else(|_| Vec::new());

        if commits.len() != expected_messages.len() {
            panic!(
                "Expected {} commits, but found {}. Commits: {:?}",
                expected_messages.len(),
                commits.len(),
                commits.iter().map(|c| &c.message).collect::<Vec<_>>()
            );
        }

        for (i, (commit, expected)) in commits.iter().zip(expected_messages.iter()).enumerate() {
            if commit.message != *expected {
                panic!(
                    "Commit {} message mismatch. Expected: '{}', Found: '{}'",
                    i, expected, commit.message
                );
            }
        }

        self
    }
}

impl RepoTestOperations for GitRepo {
    fn add_file(&self, filename: &str, content: &str) -> Result<&Self, Error> {
        let file_path = self.path().join(filename);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(file_path, content)?;
        Ok(self)
    }

    fn append_to_file(&self, filename: &str, content: &str) -> Result<&Self, Error> {
        let file_path = self.path().join(filename);

        let mut existing_content = std::fs::read_to_string(&file_path)
            .context(format!("Failed to read existing file '{filename}'"))?;
        existing_content.push_str(content);

        std::fs::write(&file_path, existing_content)
            .context(format!("Failed to write to file '{filename}'"))?;

        Ok(self)
    }

    fn remove_file(&self, filename: &str) -> Result<&Self, Error> {
        std::fs::remove_file(self.path().join(filename))
            .context(format!("Failed to remove file '{filename}'"))?;
        Ok(self)
    }

    fn add_file_and_commit(
        &self,
        filename: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<&Self, Error> {
        self.add_file(filename, content)?;
        self.stage_paths(&[PathBuf::from(filename)])?;
        self.commit(commit_message, &test_signature().signature()?)?;

        Ok(self)
    }

    fn add_local_remote(&self, name: &str, other_repo: &GitRepo) -> Result<&Self, Error> {
        let remote_path = other_repo
            .path()
            .to_str()
            .context("Failed to convert remote repository path to string")?;

        self.add_remote(name, remote_path)?;
        Ok(self)
    }

    fn push_branch(&self, branch_name: &str) -> Result<&Self, Error> {
        let refspec = format!("refs/heads/{branch_name}:refs/heads/{branch_name}");
        self.push_refspec(
            ORIGIN,
            &refspec,
            &test_credentials(),
            &CancellationToken::new(),
        )?;
        Ok(self)
    }

    fn fetch_branch(&self, branch_name: &str) -> Result<&Self, Error> {
        self.fetch_refspec(
            ORIGIN,
            &tracking_fetch_refspec(branch_name),
            &test_credentials(),
            &CancellationToken::new(),
        )?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_to_file_keeps_existing_content() {
        let (_temp_dir, repo) = create_test_repo();
        repo.add_file("notes.txt", "one\n")
            .unwrap()
            .append_to_file("notes.txt", "two\n")
            .unwrap();

        repo.assert_file_content("notes.txt", "one\ntwo\n");
    }

    #[test]
    fn add_file_creates_parent_directories() {
        let (_temp_dir, repo) = create_test_repo();
        repo.add_file_and_commit("src/nested/file.txt", "nested\n", "Nested commit")
            .unwrap();

        repo.assert_file_exists("src/nested/file.txt")
            .assert_commit_messages(&["Nested commit"]);
    }
}
