use std::time::Instant;

use chrono::Local;
use tracing::{debug, info};

use super::context::RunContext;
use crate::cancellation::CancellationToken;
use crate::error::{InsertionError, Result};
use crate::git::branches::naming::{
    new_branch_name, remote_branch_name, short_branch_name, tracking_fetch_refspec, ORIGIN,
};
use crate::git::BranchInfo;

impl RunContext {
    /// Name for a new insertion branch, stamped with the local time
    pub fn new_branch_name(&self) -> String {
        let options = self.options();
        new_branch_name(
            &options.new_branch_prefix,
            &options.source_branch,
            &Local::now(),
        )
    }

    /// Create a fresh insertion branch from `origin/<source branch>` and check it out.
    ///
    /// The branch tracks `origin/<source branch>`. Conflicting working-tree
    /// files are overwritten and logged.
    pub fn create_branch(&self, token: &CancellationToken) -> Result<BranchInfo> {
        self.create_branch_with(token, true)
    }

    /// Like [`RunContext::create_branch`], but carries local edits onto the new
    /// branch.
    ///
    /// Fails without touching the working tree when `origin/<source branch>`
    /// changes a file that is also edited locally.
    pub fn create_branch_keeping_changes(&self, token: &CancellationToken) -> Result<BranchInfo> {
        self.create_branch_with(token, false)
    }

    fn create_branch_with(&self, token: &CancellationToken, force: bool) -> Result<BranchInfo> {
        token.check()?;
        let enlistment = self.enlistment();
        let source_branch = &self.options().source_branch;

        let branch_name = self.new_branch_name();
        info!("Creating new branch {branch_name}");
        let watch = Instant::now();

        let remote_tracking_name = format!("{ORIGIN}/{source_branch}");
        let remote_tracking = enlistment
            .find_remote_branch(&remote_tracking_name)?
            .ok_or_else(|| {
                InsertionError::NotFound(format!("remote tracking branch {remote_tracking_name}"))
            })?;

        enlistment.create_branch_at(&branch_name, remote_tracking.tip)?;
        enlistment.set_branch_upstream(&branch_name, ORIGIN, source_branch)?;
        info!(
            "Creating branch took {} seconds",
            watch.elapsed().as_secs_f64()
        );

        token.check()?;
        if force {
            enlistment.checkout_branch_force(&branch_name)?;
        } else {
            enlistment.checkout_branch_keeping_changes(&branch_name)?;
        }

        enlistment.head_info()
    }

    /// Switch to `target` and hard-reset it to its remote baseline.
    ///
    /// The baseline is `base` when `overwrite_existing` is set, otherwise
    /// `target` itself. A missing local `target` is created first; its content
    /// is discarded by the reset.
    pub fn switch_to_branch_and_update(
        &self,
        target: &str,
        base: &str,
        overwrite_existing: bool,
        token: &CancellationToken,
    ) -> Result<BranchInfo> {
        token.check()?;
        let enlistment = self.enlistment();

        let target = short_branch_name(target);
        let baseline = short_branch_name(if overwrite_existing { base } else { target });
        info!("Switching to branch {target} resetting it to {baseline}");

        if enlistment.find_local_branch(target)?.is_none() {
            // Created on another machine; any local content will do
            debug!("Branch {target} does not exist locally, creating it");
            enlistment.create_branch_at_head(target)?;
        }

        enlistment.fetch_refspec(
            ORIGIN,
            &tracking_fetch_refspec(baseline),
            self.credentials(),
            token,
        )?;

        token.check()?;
        enlistment.checkout_branch_force(target)?;

        let remote_baseline = remote_branch_name(baseline);
        let remote_branch = enlistment
            .find_remote_branch(&remote_baseline)?
            .ok_or_else(|| {
                InsertionError::InvalidArgument(format!("branch {remote_baseline} not found"))
            })?;

        enlistment.hard_reset_to(remote_branch.tip)?;
        enlistment.head_info()
    }
}
