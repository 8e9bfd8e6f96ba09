use std::sync::Arc;

use tracing::info;

use crate::config::InsertionOptions;
use crate::error::Result;
use crate::git::remotes::credentials::CredentialProvider;
use crate::git::{GitRepo, InsertionSignature};

/// Everything one insertion run operates on.
///
/// Built once at startup and passed to every pipeline step. Holds the single
/// enlistment handle; callers must not share a working copy between runs.
pub struct RunContext {
    enlistment: GitRepo,
    signature: InsertionSignature,
    options: InsertionOptions,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("enlistment", &self.enlistment)
            .field("signature", &self.signature)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RunContext {
    pub fn new(options: InsertionOptions) -> Result<Self> {
        info!(
            "Loading git enlistment at {}",
            options.enlistment_path.display()
        );
        let enlistment = GitRepo::open(&options.enlistment_path)?;
        let signature = InsertionSignature::new(&options.author_name, &options.username)?;
        let credentials = options.credential_provider();

        Ok(Self {
            enlistment,
            signature,
            options,
            credentials,
        })
    }

    /// Replace the credential provider derived from the options
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn enlistment(&self) -> &GitRepo {
        &self.enlistment
    }

    pub fn signature(&self) -> &InsertionSignature {
        &self.signature
    }

    pub fn options(&self) -> &InsertionOptions {
        &self.options
    }

    pub fn credentials(&self) -> &dyn CredentialProvider {
        self.credentials.as_ref()
    }
}
