use std::path::{Path, PathBuf};

use git2::{Delta, DiffOptions, Patch, Status, StatusOptions};
use tracing::{debug, error};

use crate::error::{InsertionError, Result};
use crate::git::repository::core::GitRepo;

/// How a file differs between HEAD and the working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    Untracked,
    TypeChange,
    Other,
}

impl From<Delta> for ChangeKind {
    fn from(delta: Delta) -> Self {
        match delta {
            Delta::Added => ChangeKind::Added,
            Delta::Deleted => ChangeKind::Deleted,
            Delta::Modified => ChangeKind::Modified,
            Delta::Renamed => ChangeKind::Renamed,
            Delta::Copied => ChangeKind::Copied,
            Delta::Untracked => ChangeKind::Untracked,
            Delta::Typechange => ChangeKind::TypeChange,
            _ => ChangeKind::Other,
        }
    }
}

/// Unified diff of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    pub path: PathBuf,
    pub kind: ChangeKind,
    pub text: String,
}

impl GitRepo {
    /// Paths whose status is neither unaltered nor ignored
    pub fn changed_paths(&self) -> Result<Vec<PathBuf>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .include_unmodified(false);

        let statuses = self.repo().statuses(Some(&mut options))?;

        let mut paths = Vec::new();
        for entry in statuses.iter() {
            let status = entry.status();
            if status == Status::CURRENT || status.contains(Status::IGNORED) {
                continue;
            }
            if let Some(path) = entry.path() {
                paths.push(PathBuf::from(path));
            }
        }

        Ok(paths)
    }

    #[cfg(test)]
    pub fn is_dirty(&self) -> Result<bool> {
        Ok(!self.changed_paths()?.is_empty())
    }

    /// Per-file patches from HEAD to the working tree for exactly `paths`
    pub fn patches_for(&self, paths: &[PathBuf]) -> Result<Vec<FilePatch>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let mut options = DiffOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .show_untracked_content(true)
            .disable_pathspec_match(true);
        for path in paths {
            options.pathspec(path);
        }

        let head_tree = match self.repo().head() {
            Ok(head) => Some(head.peel_to_tree()?),
            Err(_) => None,
        };
        let diff = self
            .repo()
            .diff_tree_to_workdir_with_index(head_tree.as_ref(), Some(&mut options))?;

        let mut patches = Vec::with_capacity(diff.deltas().len());
        for (idx, delta) in diff.deltas().enumerate() {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(Path::to_path_buf)
                .unwrap_or_default();

            let text = match Patch::from_diff(&diff, idx)? {
                Some(mut patch) => String::from_utf8_lossy(&patch.to_buf()?).into_owned(),
                None => String::new(),
            };

            patches.push(FilePatch {
                path,
                kind: delta.status().into(),
                text,
            });
        }

        Ok(patches)
    }

    /// Stage exactly `paths`.
    ///
    /// Existing files are added even when ignore rules match them; paths gone
    /// from the working tree are removed from the index, and deletions already
    /// staged are left as they are. Every path is checked before the index is
    /// touched.
    pub fn stage_paths(&self, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.repo().index()?;
        let head_tree = match self.repo().head() {
            Ok(head) => Some(head.peel_to_tree()?),
            Err(_) => None,
        };

        let mut additions = Vec::new();
        let mut removals = Vec::new();
        for path in paths {
            // Dangling symlinks are still stageable
            if self.path().join(path).symlink_metadata().is_ok() {
                additions.push(path);
            } else if index.get_path(path, 0).is_some() {
                removals.push(path);
            } else if head_tree
                .as_ref()
                .is_some_and(|tree| tree.get_path(path).is_ok())
            {
                debug!("Deletion of '{}' is already staged", path.display());
            } else {
                error!("Path could not be matched '{}'", path.display());
                return Err(InsertionError::UnmatchedPath(path.clone()));
            }
        }

        for path in additions {
            index.add_path(path)?;
        }
        for path in removals {
            index.remove_path(path)?;
        }
        index.write()?;

        Ok(())
    }
}
