pub mod enlistment;
pub mod repo_extensions;

pub use enlistment::create_enlistment_with_origin;
pub use repo_extensions::{
    create_test_bare_repo, create_test_repo, test_signature, RepoAssertions, RepoTestOperations,
};
