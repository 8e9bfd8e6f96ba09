use std::time::Instant;

use serde::Serialize;
use tracing::info;

use super::context::RunContext;
use super::version::BuildVersion;
use super::whitespace::is_whitespace_only_change;
use crate::cancellation::CancellationToken;
use crate::error::Result;

/// What `stage_changes` did to the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    /// Working tree had no changes
    Clean,
    /// Every change was whitespace; index left untouched
    WhitespaceOnly,
    /// Number of paths staged
    Staged(usize),
}

impl RunContext {
    /// Stage every changed path unless the aggregate diff is whitespace-only
    pub fn stage_changes(
        &self,
        version: &BuildVersion,
        token: &CancellationToken,
    ) -> Result<StageOutcome> {
        token.check()?;
        let enlistment = self.enlistment();

        let files_to_stage = enlistment.changed_paths()?;
        if files_to_stage.is_empty() {
            info!("No changes to stage for {version}");
            return Ok(StageOutcome::Clean);
        }

        token.check()?;
        let patches = enlistment.patches_for(&files_to_stage)?;
        if is_whitespace_only_change(&patches) {
            info!("Only whitespace changes found");
            return Ok(StageOutcome::WhitespaceOnly);
        }

        info!("Staging {} file(s)", files_to_stage.len());
        let watch = Instant::now();
        enlistment.stage_paths(&files_to_stage)?;
        info!("Staging took {} seconds", watch.elapsed().as_secs_f64());

        Ok(StageOutcome::Staged(files_to_stage.len()))
    }
}
