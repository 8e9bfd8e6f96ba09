//! Whitespace-only change detection.
//!
//! A line-granular heuristic over unified diff text, not a token-aware diff.
//! Added and removed lines are trimmed and concatenated with no separator, so
//! whitespace moved within or across changed lines collapses away. Every
//! other line (context, hunk headers, `---`/`+++` file headers) is appended
//! with a newline to both sides and cancels out.

use crate::git::status::operations::{ChangeKind, FilePatch};

/// True when no patch in `patches` carries more than a whitespace change.
///
/// Any patch that is not a modification (added, deleted, renamed, untracked,
/// ...) makes the whole set a real change. An empty set is whitespace-only.
pub fn is_whitespace_only_change(patches: &[FilePatch]) -> bool {
    let mut before = String::new();
    let mut after = String::new();

    for patch in patches {
        if patch.kind != ChangeKind::Modified {
            return false;
        }

        for line in patch.text.lines() {
            let is_file_header = line.starts_with("---") || line.starts_with("+++");
            if !is_file_header {
                if let Some(added) = line.strip_prefix('+') {
                    after.push_str(added.trim());
                    continue;
                }
                if let Some(removed) = line.strip_prefix('-') {
                    before.push_str(removed.trim());
                    continue;
                }
            }

            after.push_str(line);
            after.push('\n');
            before.push_str(line);
            before.push('\n');
        }

        if before != after {
            return false;
        }

        before.clear();
        after.clear();
    }

    true
}
