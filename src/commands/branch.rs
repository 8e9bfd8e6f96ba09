use console::style;

use super::output::Output;
use super::with_context;
use crate::cancellation::CancellationToken;
use crate::config::InsertionOptions;

pub async fn handle_create_branch(
    options: InsertionOptions,
    token: CancellationToken,
    output: Output,
) -> anyhow::Result<()> {
    let branch = with_context(options, move |ctx| ctx.create_branch(&token)).await?;

    output.emit(&branch, || {
        format!("Created and checked out {}", style(&branch.name).cyan())
    })
}

pub async fn handle_switch(
    options: InsertionOptions,
    token: CancellationToken,
    output: Output,
    target: String,
    base: String,
    overwrite: bool,
) -> anyhow::Result<()> {
    let branch = with_context(options, move |ctx| {
        ctx.switch_to_branch_and_update(&target, &base, overwrite, &token)
    })
    .await?;

    output.emit(&branch, || {
        format!(
            "On {} at {}",
            style(&branch.name).cyan(),
            style(branch.tip).dim()
        )
    })
}
