use git2::{Signature, Time};

use crate::error::Result;

/// Author and committer identity for every commit made during one run.
///
/// Built once at startup; the timestamp is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionSignature {
    name: String,
    email: String,
    seconds: i64,
    offset_minutes: i32,
}

impl InsertionSignature {
    pub fn new(author_name: &str, username: &str) -> Result<Self> {
        let now = Signature::now(author_name, username)?.when();

        Ok(Self {
            name: author_name.to_string(),
            email: username.to_string(),
            seconds: now.seconds(),
            offset_minutes: now.offset_minutes(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn when(&self) -> Time {
        Time::new(self.seconds, self.offset_minutes)
    }

    /// A libgit2 signature carrying the fixed identity and timestamp
    pub fn signature(&self) -> Result<Signature<'static>> {
        Ok(Signature::new(&self.name, &self.email, &self.when())?)
    }
}
