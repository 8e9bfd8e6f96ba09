use std::path::{Path, PathBuf};
use std::time::Instant;

use git2::build::CheckoutBuilder;
use git2::{Branch, BranchType, ErrorCode, Oid, ResetType, Status, StatusOptions, Tree};
use tracing::{info, warn};

use super::naming::{short_branch_name, REFS_HEADS_PREFIX};
use crate::error::{InsertionError, Result};
use crate::git::repository::core::{BranchInfo, GitRepo, Upstream};

/// Outcome of a forced checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReport {
    pub branch: String,
    /// Working-tree paths that conflicted and were overwritten
    pub conflicts: Vec<PathBuf>,
}

impl GitRepo {
    #[cfg(test)]
    pub fn get_all_branches(&self) -> Result<Vec<String>> {
        let mut branches = Vec::new();

        for branch in self.repo().branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                branches.push(name.to_string());
            }
        }

        Ok(branches)
    }

    pub fn find_local_branch(&self, name: &str) -> Result<Option<BranchInfo>> {
        self.find_branch(short_branch_name(name), BranchType::Local)
    }

    /// Look up a remote tracking branch by friendly name, e.g. `origin/main`
    pub fn find_remote_branch(&self, name: &str) -> Result<Option<BranchInfo>> {
        self.find_branch(name, BranchType::Remote)
    }

    fn find_branch(&self, name: &str, branch_type: BranchType) -> Result<Option<BranchInfo>> {
        match self.repo().find_branch(name, branch_type) {
            Ok(branch) => Ok(Some(self.branch_info(&branch)?)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create a local branch pointing at `target`
    pub fn create_branch_at(&self, name: &str, target: Oid) -> Result<BranchInfo> {
        let commit = self.repo().find_commit(target)?;
        let branch = self.repo().branch(short_branch_name(name), &commit, false)?;
        self.branch_info(&branch)
    }

    /// Create a local branch at the current HEAD commit
    pub fn create_branch_at_head(&self, name: &str) -> Result<BranchInfo> {
        let head = self.repo().head()?.peel_to_commit()?;
        self.create_branch_at(name, head.id())
    }

    /// Record `remote`/`upstream_branch` as the branch's upstream
    pub fn set_branch_upstream(
        &self,
        name: &str,
        remote: &str,
        upstream_branch: &str,
    ) -> Result<BranchInfo> {
        let name = short_branch_name(name);
        let mut config = self.repo().config()?;
        config.set_str(&format!("branch.{name}.remote"), remote)?;
        config.set_str(
            &format!("branch.{name}.merge"),
            &format!("{REFS_HEADS_PREFIX}{}", short_branch_name(upstream_branch)),
        )?;

        self.find_local_branch(name)?
            .ok_or_else(|| InsertionError::NotFound(format!("local branch {name}")))
    }

    /// Check out a local branch, discarding conflicting working-tree changes
    pub fn checkout_branch_force(&self, name: &str) -> Result<CheckoutReport> {
        self.checkout_branch_with(name, true)
    }

    /// Check out a local branch, keeping local edits the target does not touch.
    ///
    /// Fails with [`InsertionError::InvalidArgument`] instead of overwriting.
    pub fn checkout_branch_keeping_changes(&self, name: &str) -> Result<CheckoutReport> {
        self.checkout_branch_with(name, false)
    }

    fn checkout_branch_with(&self, name: &str, force: bool) -> Result<CheckoutReport> {
        let name = short_branch_name(name);
        let refname = format!("{REFS_HEADS_PREFIX}{name}");

        info!("Checking out branch {name}");
        let watch = Instant::now();

        let target = self.repo().find_reference(&refname)?.peel_to_commit()?;
        let conflicts = if force {
            self.paths_overwritten_by(&target.tree()?)?
        } else {
            Vec::new()
        };

        let mut checkout = CheckoutBuilder::new();
        if force {
            checkout.force();
        } else {
            checkout.safe();
        }
        self.repo()
            .checkout_tree(target.as_object(), Some(&mut checkout))
            .map_err(|e| match e.code() {
                ErrorCode::Conflict => InsertionError::InvalidArgument(format!(
                    "local changes would be overwritten by checking out {name}"
                )),
                _ => InsertionError::Git(e),
            })?;
        self.repo().set_head(&refname)?;

        info!(
            "Checking out branch took {} seconds",
            watch.elapsed().as_secs_f64()
        );
        for path in &conflicts {
            warn!("Checkout overwrote conflicting path {}", path.display());
        }

        if self.get_current_branch()? == name {
            info!("{name} is the current repository head.");
        } else {
            warn!("{name} is NOT the current repository head.");
        }

        Ok(CheckoutReport {
            branch: name.to_string(),
            conflicts,
        })
    }

    /// Working-tree paths a forced checkout of `target` would replace.
    ///
    /// Every dirty tracked path is reset; an untracked file only when `target`
    /// has the same path.
    fn paths_overwritten_by(&self, target: &Tree<'_>) -> Result<Vec<PathBuf>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let mut paths = Vec::new();
        for entry in self.repo().statuses(Some(&mut options))?.iter() {
            let Some(path) = entry.path() else {
                continue;
            };
            let status = entry.status();
            let overwritten = if status == Status::WT_NEW {
                target.get_path(Path::new(path)).is_ok()
            } else {
                status != Status::CURRENT && !status.contains(Status::IGNORED)
            };
            if overwritten {
                paths.push(PathBuf::from(path));
            }
        }

        Ok(paths)
    }

    /// Move the current branch, index and working tree to `target`
    pub fn hard_reset_to(&self, target: Oid) -> Result<()> {
        let commit = self.repo().find_commit(target)?;
        let mut checkout = CheckoutBuilder::new();
        checkout.force();

        self.repo()
            .reset(commit.as_object(), ResetType::Hard, Some(&mut checkout))?;

        Ok(())
    }

    pub fn get_head_symbolic_target(&self) -> Result<String> {
        let head_ref = self.repo().find_reference("HEAD")?;

        head_ref
            .symbolic_target()
            .map(str::to_string)
            .ok_or_else(|| InsertionError::InvalidArgument("HEAD is not a symbolic reference".into()))
    }

    /// Get the current branch name
    pub fn get_current_branch(&self) -> Result<String> {
        let head_target = self.get_head_symbolic_target()?;

        head_target
            .strip_prefix(REFS_HEADS_PREFIX)
            .map(str::to_string)
            .ok_or_else(|| InsertionError::InvalidArgument("HEAD is not pointing to a branch".into()))
    }

    /// Snapshot of the branch HEAD points at
    pub fn head_info(&self) -> Result<BranchInfo> {
        let current = self.get_current_branch()?;
        self.find_local_branch(&current)?
            .ok_or_else(|| InsertionError::NotFound(format!("local branch {current}")))
    }

    fn branch_info(&self, branch: &Branch<'_>) -> Result<BranchInfo> {
        let name = branch
            .name()?
            .ok_or_else(|| InsertionError::InvalidArgument("branch name is not valid UTF-8".into()))?
            .to_string();
        let reference = branch.get();
        let canonical_name = reference
            .name()
            .ok_or_else(|| InsertionError::InvalidArgument("ref name is not valid UTF-8".into()))?
            .to_string();
        let tip = reference.resolve()?.target().ok_or_else(|| {
            InsertionError::InvalidArgument(format!("{canonical_name} has no target"))
        })?;

        let upstream = if reference.is_branch() {
            self.upstream_of(&canonical_name)
        } else {
            None
        };

        Ok(BranchInfo {
            name,
            canonical_name,
            upstream,
            tip,
        })
    }

    fn upstream_of(&self, canonical_name: &str) -> Option<Upstream> {
        let remote = self.repo().branch_upstream_remote(canonical_name).ok()?;
        let merge = self.repo().branch_upstream_merge(canonical_name).ok()?;

        Some(Upstream {
            remote: remote.as_str()?.to_string(),
            branch: short_branch_name(merge.as_str()?).to_string(),
        })
    }
}
