use super::output::Output;
use super::with_context;
use crate::cancellation::CancellationToken;
use crate::config::InsertionOptions;
use crate::insertion::{BuildVersion, StageOutcome};

pub async fn handle_stage(
    options: InsertionOptions,
    token: CancellationToken,
    output: Output,
    version: BuildVersion,
) -> anyhow::Result<()> {
    let outcome = with_context(options, move |ctx| ctx.stage_changes(&version, &token)).await?;

    output.emit(&outcome, || match outcome {
        StageOutcome::Clean => "Nothing to stage".to_string(),
        StageOutcome::WhitespaceOnly => "Only whitespace changes, nothing staged".to_string(),
        StageOutcome::Staged(count) => format!("Staged {count} file(s)"),
    })
}
