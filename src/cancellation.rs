use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{InsertionError, Result};

/// Cooperative cancellation signal shared by every step of a run.
///
/// Clones observe the same flag. Once canceled a token stays canceled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    canceled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    /// Fail with [`InsertionError::Canceled`] if the token has been signaled
    pub fn check(&self) -> Result<()> {
        if self.is_canceled() {
            Err(InsertionError::Canceled)
        } else {
            Ok(())
        }
    }
}
