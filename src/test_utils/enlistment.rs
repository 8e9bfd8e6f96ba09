use git2::{BranchType, Oid};

use super::repo_extensions::{create_test_bare_repo, create_test_repo, RepoTestOperations};
use crate::config::InsertionOptions;
use crate::git::branches::naming::ORIGIN;
use crate::git::GitRepo;
use crate::insertion::context::RunContext;

/// A local enlistment cloned from a bare `origin`, both in temp dirs.
///
/// `main` holds one commit with `README.md` = `"initial\n"` and
/// `origin/main` is up to date.
pub struct EnlistmentFixture {
    pub ctx: RunContext,
    pub origin: GitRepo,
    // Drop the repositories before their directories
    _local_dir: assert_fs::TempDir,
    _origin_dir: assert_fs::TempDir,
}

pub fn create_enlistment_with_origin() -> EnlistmentFixture {
    let (origin_dir, origin) = create_test_bare_repo();
    let (local_dir, local) = create_test_repo();

    local
        .add_file_and_commit("README.md", "initial\n", "Initial commit")
        .unwrap()
        .add_local_remote(ORIGIN, &origin)
        .unwrap()
        .push_branch("main")
        .unwrap()
        .fetch_branch("main")
        .unwrap();
    drop(local);

    let ctx = RunContext::new(InsertionOptions::for_enlistment(local_dir.path())).unwrap();

    EnlistmentFixture {
        ctx,
        origin,
        _local_dir: local_dir,
        _origin_dir: origin_dir,
    }
}

impl EnlistmentFixture {
    /// Rebuild the context with a different source branch
    pub fn set_source_branch(&mut self, source_branch: &str) {
        let mut options = self.ctx.options().clone();
        options.source_branch = source_branch.to_string();
        self.ctx = RunContext::new(options).unwrap();
    }

    /// Commit one file on a new branch off `main`, push it and return to `main`.
    ///
    /// The local branch is kept.
    pub fn publish_branch(&self, branch_name: &str, filename: &str, content: &str) {
        let repo = self.ctx.enlistment();
        repo.create_branch_at_head(branch_name).unwrap();
        repo.checkout_branch_force(branch_name).unwrap();
        repo.add_file_and_commit(filename, content, &format!("Add {filename}"))
            .unwrap()
            .push_branch(branch_name)
            .unwrap()
            .fetch_branch(branch_name)
            .unwrap();
        repo.checkout_branch_force("main").unwrap();
    }

    pub fn delete_local_branch(&self, branch_name: &str) {
        self.ctx
            .enlistment()
            .repo()
            .find_branch(branch_name, BranchType::Local)
            .unwrap()
            .delete()
            .unwrap();
    }

    /// Tip of `branch_name` as stored on the remote
    pub fn origin_tip(&self, branch_name: &str) -> Oid {
        self.origin
            .find_local_branch(branch_name)
            .unwrap()
            .unwrap_or_else(|| panic!("branch {branch_name} not found on origin"))
            .tip
    }
}
