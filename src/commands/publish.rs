use console::style;
use serde_json::json;

use super::output::Output;
use super::with_context;
use crate::cancellation::CancellationToken;
use crate::config::InsertionOptions;
use crate::error::InsertionError;
use crate::insertion::BuildVersion;

pub async fn handle_commit(
    options: InsertionOptions,
    token: CancellationToken,
    output: Output,
    version: BuildVersion,
) -> anyhow::Result<()> {
    let (commit, message) = with_context(options, move |ctx| {
        let commit = ctx.commit_staged_changes(&version, &token)?;
        Ok((commit, ctx.commit_message(&version)))
    })
    .await?;

    output.emit(
        &json!({ "commit": commit.to_string(), "message": message }),
        || format!("Committed {} {message}", style(commit).dim()),
    )
}

pub async fn handle_push(
    options: InsertionOptions,
    token: CancellationToken,
    output: Output,
    version: BuildVersion,
    branch: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let head = with_context(options, move |ctx| {
        let target = match branch {
            Some(name) => ctx
                .enlistment()
                .find_local_branch(&name)?
                .ok_or_else(|| InsertionError::NotFound(format!("local branch {name}")))?,
            None => ctx.enlistment().head_info()?,
        };
        ctx.push_changes(&target, &version, &token, force)
    })
    .await?;

    output.emit(&head, || {
        format!("Pushed {} at {}", style(&head.name).cyan(), style(head.tip).dim())
    })
}

pub async fn handle_insert(
    options: InsertionOptions,
    token: CancellationToken,
    output: Output,
    version: BuildVersion,
    force: bool,
) -> anyhow::Result<()> {
    let head = with_context(options, move |ctx| ctx.insert_changes(&version, &token, force)).await?;

    output.emit(&head, || {
        format!("Inserted on {} at {}", style(&head.name).cyan(), style(head.tip).dim())
    })
}
