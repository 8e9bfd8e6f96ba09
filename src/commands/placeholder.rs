use anyhow::Context;
use console::style;

use super::output::Output;
use crate::cancellation::CancellationToken;
use crate::config::InsertionOptions;
use crate::git::branches::naming::ORIGIN;
use crate::git::GitRepo;
use crate::github::GitHubClient;
use crate::insertion::create_placeholder_branch;

pub async fn handle_placeholder(
    options: InsertionOptions,
    token: CancellationToken,
    output: Output,
) -> anyhow::Result<()> {
    let origin_url = if options.project.is_some() && options.repository.is_some() {
        None
    } else {
        let path = options.enlistment_path.clone();
        tokio::task::spawn_blocking(move || GitRepo::open(path)?.get_remote_url(ORIGIN))
            .await
            .context("Reading the origin URL stopped unexpectedly")?
            .map(Some)
            .context("Failed to read the origin URL of the enlistment")?
    };

    let client = GitHubClient::from_options(&options, origin_url.as_deref())?;
    let pull_request = create_placeholder_branch(&options, &client, &token).await?;

    output.emit(&pull_request, || {
        format!(
            "Opened #{} {} from {}",
            pull_request.number,
            style(&pull_request.url).underlined(),
            style(&pull_request.source_branch).cyan()
        )
    })
}
