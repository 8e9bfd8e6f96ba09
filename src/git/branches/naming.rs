//! Branch and ref name helpers.

use chrono::{DateTime, TimeZone};

pub const REFS_HEADS_PREFIX: &str = "refs/heads/";
pub const REFS_REMOTES_PREFIX: &str = "refs/remotes/";
pub const ORIGIN: &str = "origin";

/// Derive the name of a fresh insertion branch.
///
/// `<prefix><last path segment of source>.<timestamp to the second>`, e.g.
/// `dev/insertions/` + `rel/d17.8` at 2024-01-02 03:04:05 gives
/// `dev/insertions/d17.8.20240102030405`.
pub fn new_branch_name<Tz>(prefix: &str, source_branch: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let last_segment = source_branch.rsplit('/').next().unwrap_or(source_branch);
    format!("{prefix}{last_segment}.{}", now.format("%Y%m%d%H%M%S"))
}

/// Strip a leading `refs/heads/` from a branch name
pub fn short_branch_name(name: &str) -> &str {
    name.strip_prefix(REFS_HEADS_PREFIX).unwrap_or(name)
}

/// `origin/<name>`, leaving names that already carry the remote alone
pub fn remote_branch_name(name: &str) -> String {
    let prefix = format!("{ORIGIN}/");
    if name.starts_with(&prefix) {
        name.to_string()
    } else {
        format!("{prefix}{name}")
    }
}

/// Forced fetch refspec mirroring `<branch>` on origin into its tracking ref
pub fn tracking_fetch_refspec(branch: &str) -> String {
    let branch = short_branch_name(branch);
    let branch = branch
        .strip_prefix(&format!("{ORIGIN}/"))
        .unwrap_or(branch);
    format!("+{REFS_HEADS_PREFIX}{branch}:{REFS_REMOTES_PREFIX}{ORIGIN}/{branch}")
}
