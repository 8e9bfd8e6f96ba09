use std::fmt;
use std::str::FromStr;

use crate::error::InsertionError;

/// Build version being inserted, e.g. `4.9.0-3.23516.1`. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BuildVersion(String);

impl FromStr for BuildVersion {
    type Err = InsertionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InsertionError::InvalidArgument(
                "build version must not be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for BuildVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
