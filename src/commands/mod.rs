pub mod branch;
pub mod output;
pub mod placeholder;
pub mod publish;
pub mod stage;

use anyhow::Context;
use tracing::warn;

use crate::cancellation::CancellationToken;
use crate::cli::{Cli, Commands};
use crate::config::InsertionOptions;
use crate::insertion::RunContext;
use output::Output;

/// Dispatch one subcommand; Ctrl-C cancels the run at its next checkpoint
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let token = CancellationToken::new();
    cancel_on_ctrl_c(token.clone());
    let output = Output::new(cli.json);
    let options = cli.options;

    match cli.command {
        Commands::CreateBranch => branch::handle_create_branch(options, token, output).await,
        Commands::Switch {
            target,
            base,
            overwrite,
        } => branch::handle_switch(options, token, output, target, base, overwrite).await,
        Commands::Stage { version } => stage::handle_stage(options, token, output, version).await,
        Commands::Commit { version } => {
            publish::handle_commit(options, token, output, version).await
        }
        Commands::Push {
            version,
            branch,
            force,
        } => publish::handle_push(options, token, output, version, branch, force).await,
        Commands::Insert { version, force } => {
            publish::handle_insert(options, token, output, version, force).await
        }
        Commands::Placeholder => placeholder::handle_placeholder(options, token, output).await,
    }
}

fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Cancellation requested, stopping at the next checkpoint");
            token.cancel();
        }
    });
}

/// Open the enlistment and run `work` on the blocking pool
async fn with_context<T, F>(options: InsertionOptions, work: F) -> anyhow::Result<T>
where
    F: FnOnce(RunContext) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || {
        let ctx = RunContext::new(options)?;
        work(ctx)
    })
    .await
    .context("Insertion worker stopped unexpectedly")?;

    Ok(result?)
}
