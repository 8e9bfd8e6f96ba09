use chrono::Local;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::config::InsertionOptions;
use crate::error::Result;
use crate::git::branches::naming::{new_branch_name, REFS_HEADS_PREFIX};
use crate::github::{
    CommitChange, FileChange, PullRequestHandle, PullRequestRequest, PullRequestService,
    PushRequest, RefUpdate,
};

const PLACEHOLDER_DESCRIPTION: &str = "Not Specified";

pub fn placeholder_title(insertion_name: &str) -> String {
    format!("PLACEHOLDER INSERTION FOR {insertion_name}")
}

/// Create a branch off the source branch and open a pull request for it,
/// entirely through `service`.
///
/// The branch carries one commit deleting the placeholder path. Local git
/// state is never read or written.
pub async fn create_placeholder_branch<S: PullRequestService + ?Sized>(
    options: &InsertionOptions,
    service: &S,
    token: &CancellationToken,
) -> Result<PullRequestHandle> {
    token.check()?;
    let source_branch = &options.source_branch;
    let tip = service.branch_tip(source_branch).await?;

    let branch_name = new_branch_name(&options.new_branch_prefix, source_branch, &Local::now());
    let title = placeholder_title(&options.insertion_name);
    info!("Creating placeholder branch {branch_name} from {source_branch} at {tip}");

    token.check()?;
    let push = service
        .create_push(PushRequest {
            ref_updates: vec![RefUpdate {
                name: format!("{REFS_HEADS_PREFIX}{branch_name}"),
                old_object_id: tip,
            }],
            commits: vec![CommitChange {
                comment: title.clone(),
                changes: vec![FileChange::Delete {
                    path: options.placeholder_path.clone(),
                }],
            }],
        })
        .await?;
    info!("Pushed {} at {}", push.branch, push.head);

    token.check()?;
    let pull_request = service
        .create_pull_request(PullRequestRequest {
            source_branch: push.branch,
            target_branch: source_branch.clone(),
            title,
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            title_prefix: options.title_prefix.clone(),
        })
        .await?;
    info!(
        "Created pull request #{} {}",
        pull_request.number, pull_request.url
    );

    Ok(pull_request)
}
