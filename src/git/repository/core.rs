use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use tracing::info;

use crate::error::{InsertionError, Result};

/// Snapshot of a branch, detached from the repository borrow
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BranchInfo {
    /// Short name, e.g. `dev/insertions/main.20240101120000`
    pub name: String,
    /// Full ref name, e.g. `refs/heads/dev/insertions/main.20240101120000`
    pub canonical_name: String,
    pub upstream: Option<Upstream>,
    #[serde(serialize_with = "serialize_oid")]
    pub tip: git2::Oid,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Upstream {
    pub remote: String,
    pub branch: String,
}

fn serialize_oid<S: serde::Serializer>(oid: &git2::Oid, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&oid.to_string())
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub hash: String,
    pub message: String,
}

/// The enlistment: one local working copy bound to a filesystem path.
pub struct GitRepo {
    path: PathBuf,
    repo: Repository,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo").field("path", &self.path).finish()
    }
}

impl GitRepo {
    /// Open the git repository at the absolute form of `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let absolute = std::path::absolute(path.as_ref())
            .map_err(|e| InsertionError::NotFound(format!("{}: {e}", path.as_ref().display())))?;
        info!("Creating git repository object for {}", absolute.display());

        let repo = Repository::open(&absolute).map_err(|e| match e.code() {
            ErrorCode::NotFound => {
                InsertionError::NotFound(format!("git repository at {}", absolute.display()))
            }
            _ => InsertionError::Git(e),
        })?;

        Ok(Self {
            path: absolute,
            repo,
        })
    }

    #[cfg(test)]
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let repo = Repository::init(path_ref)?;

        let git_repo = Self {
            path: path_ref.to_path_buf(),
            repo,
        };

        // The first commit creates main
        git_repo.repo.set_head("refs/heads/main")?;

        Ok(git_repo)
    }

    /// Initialize a new bare git repository, standing in for `origin`
    #[cfg(test)]
    pub fn init_bare<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let repo = Repository::init_bare(path_ref)?;

        let git_repo = Self {
            path: path_ref.to_path_buf(),
            repo,
        };

        git_repo.repo.set_head("refs/heads/main")?;

        Ok(git_repo)
    }

    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get access to the internal git2 Repository
    pub(crate) fn repo(&self) -> &Repository {
        &self.repo
    }
}
