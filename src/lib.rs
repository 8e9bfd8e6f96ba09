//! Git enlistment sync for build insertions.
//!
//! Creates and resets insertion branches against `origin`, stages working-tree
//! changes unless they are whitespace-only, commits them with a fixed identity
//! and pushes the result. A server-side placeholder flow opens a pull request
//! without touching the local working copy.

pub mod cancellation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod insertion;

#[cfg(test)]
mod test_utils;

pub use cancellation::CancellationToken;
pub use error::{InsertionError, Result};
