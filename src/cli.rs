use clap::{Parser, Subcommand};

use crate::config::InsertionOptions;
use crate::insertion::BuildVersion;

#[derive(Parser)]
#[command(name = "insync")]
#[command(about = "Sync a git enlistment for build insertions")]
pub struct Cli {
    #[command(flatten)]
    pub options: InsertionOptions,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new insertion branch from origin/<source branch> and check it out
    CreateBranch,
    /// Switch to a branch and hard-reset it to its remote baseline
    Switch {
        /// Branch to switch to
        target: String,
        /// Baseline used with --overwrite
        #[arg(long)]
        base: String,
        /// Reset to --base instead of the target's own remote state
        #[arg(long)]
        overwrite: bool,
    },
    /// Stage working-tree changes unless they are whitespace-only
    Stage {
        #[arg(long)]
        version: BuildVersion,
    },
    /// Commit staged changes
    Commit {
        #[arg(long)]
        version: BuildVersion,
    },
    /// Stage, commit and push to a branch on origin
    Push {
        #[arg(long)]
        version: BuildVersion,
        /// Destination branch; defaults to the current branch
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        force: bool,
    },
    /// Create a new branch, then stage, commit and push to it
    Insert {
        #[arg(long)]
        version: BuildVersion,
        #[arg(long)]
        force: bool,
    },
    /// Create a placeholder branch and pull request on GitHub
    Placeholder,
}
