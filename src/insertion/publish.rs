use std::time::Instant;

use git2::Oid;
use tracing::info;

use super::context::RunContext;
use super::version::BuildVersion;
use crate::cancellation::CancellationToken;
use crate::error::Result;
use crate::git::branches::naming::ORIGIN;
use crate::git::BranchInfo;

impl RunContext {
    pub fn commit_message(&self, version: &BuildVersion) -> String {
        format!("Updating {} to {version}", self.options().insertion_name)
    }

    /// Commit the index with the run signature as author and committer.
    ///
    /// Nothing staged is an error ([`crate::InsertionError::EmptyCommit`]).
    pub fn commit_staged_changes(
        &self,
        version: &BuildVersion,
        token: &CancellationToken,
    ) -> Result<Oid> {
        token.check()?;
        let message = self.commit_message(version);

        info!("Committing file(s)");
        let watch = Instant::now();
        let commit_id = self
            .enlistment()
            .commit(&message, &self.signature().signature()?)?;
        info!("Committing took {} seconds", watch.elapsed().as_secs_f64());

        Ok(commit_id)
    }

    /// Stage, commit and push the working tree to `branch` on origin
    pub fn push_changes(
        &self,
        branch: &BranchInfo,
        version: &BuildVersion,
        token: &CancellationToken,
        force_push: bool,
    ) -> Result<BranchInfo> {
        self.stage_changes(version, token)?;
        self.commit_staged_changes(version, token)?;
        self.push_head(branch, token, force_push)
    }

    /// Move the working-tree edits onto a new insertion branch, then stage,
    /// commit and push them
    pub fn insert_changes(
        &self,
        version: &BuildVersion,
        token: &CancellationToken,
        force_push: bool,
    ) -> Result<BranchInfo> {
        let branch = self.create_branch_keeping_changes(token)?;
        self.push_changes(&branch, version, token, force_push)
    }

    /// Push HEAD's branch to `branch` on origin; `force_push` allows non-fast-forward
    pub fn push_head(
        &self,
        branch: &BranchInfo,
        token: &CancellationToken,
        force_push: bool,
    ) -> Result<BranchInfo> {
        token.check()?;
        let enlistment = self.enlistment();

        info!("Pushing branch {}", branch.name);
        let watch = Instant::now();

        let mut source_spec = enlistment.get_head_symbolic_target()?;
        if force_push {
            source_spec.insert(0, '+');
        }
        let refspec = format!("{source_spec}:{}", branch.canonical_name);

        enlistment.push_refspec(ORIGIN, &refspec, self.credentials(), token)?;
        info!("Pushing took {} seconds", watch.elapsed().as_secs_f64());

        enlistment.head_info()
    }
}
