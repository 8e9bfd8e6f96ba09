use git2::{Oid, Signature};

use crate::error::{InsertionError, Result};
#[cfg(test)]
use crate::git::repository::core::CommitInfo;
use crate::git::repository::core::GitRepo;

impl GitRepo {
    #[cfg(test)]
    pub fn list_commits(&self) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo().revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

        // Unborn HEAD has no history
        if self.repo().head().is_err() {
            return Ok(Vec::new());
        }
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo().find_commit(oid)?;

            commits.push(CommitInfo {
                hash: oid.to_string(),
                message: commit.message().unwrap_or("").to_string(),
            });
        }

        Ok(commits)
    }

    /// Check if the index differs from HEAD's tree
    pub fn has_staged_changes(&self) -> Result<bool> {
        let mut index = self.repo().index()?;

        match self.repo().head() {
            Ok(head) => {
                let head_tree = head.peel_to_tree()?;
                Ok(head_tree.id() != index.write_tree()?)
            }
            Err(_) => Ok(!index.is_empty()),
        }
    }

    /// Commit the index on top of HEAD, using `signature` as author and committer.
    ///
    /// Fails with [`InsertionError::EmptyCommit`] when nothing is staged.
    pub fn commit(&self, message: &str, signature: &Signature<'_>) -> Result<Oid> {
        if !self.has_staged_changes()? {
            return Err(InsertionError::EmptyCommit);
        }

        let mut index = self.repo().index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo().find_tree(tree_id)?;

        let parent_commit = match self.repo().head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None, // First commit, no parent
        };
        let parents: Vec<_> = parent_commit.iter().collect();

        let commit_id = self.repo().commit(
            Some("HEAD"),
            signature,
            signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(commit_id)
    }
}
