//! Git operations module
//!
//! This module provides a domain-driven structure for the enlistment:
//!
//! - `repository`: Core repository handle and the run signature
//! - `branches`: Branch naming, lookup, creation, checkout and reset
//! - `status`: Working-tree status, per-file patches and explicit staging
//! - `commits`: Commit operations
//! - `remotes`: Fetch and push with credential callbacks

pub mod branches;
pub mod commits;
pub mod remotes;
pub mod repository;
pub mod status;

// Re-export the main types
pub use repository::core::{BranchInfo, GitRepo, Upstream};
pub use repository::signature::InsertionSignature;
