//! Insertion pipeline built on the enlistment.
//!
//! - `context`: the per-run enlistment, signature, options and credentials
//! - `branch`: create, switch and reset insertion branches
//! - `whitespace`: whitespace-only diff classification
//! - `staging`: stage real changes, skip whitespace-only ones
//! - `publish`: commit and push
//! - `placeholder`: server-side placeholder branch and pull request

pub mod branch;
pub mod context;
pub mod placeholder;
pub mod publish;
pub mod staging;
pub mod version;
pub mod whitespace;

pub use context::RunContext;
pub use placeholder::create_placeholder_branch;
pub use staging::StageOutcome;
pub use version::BuildVersion;
