use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::{RepositoryError, Result};

/// Per-operation deadline and cancellation signal.
///
/// Repository operations call [`OpContext::checkpoint`] before every I/O
/// step, and run interruptible calls through [`OpContext::bound`]. A tripped
/// context stops the operation at the next step; effects already applied are
/// kept.
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl OpContext {
    /// Creates a context with no deadline and a fresh cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that expires `timeout` from now.
    ///
    /// A timeout too large to represent means no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::new().deadline(deadline),
            None => Self::new(),
        }
    }

    /// Sets an absolute deadline.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Uses an existing cancellation token, e.g. a child of a shutdown token.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Cancels the operation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns an error if the operation must not start `step`.
    pub fn checkpoint(&self, step: &'static str) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled { step });
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(RepositoryError::DeadlineExceeded { step });
        }
        Ok(())
    }

    /// Runs `call` unless the context trips first.
    ///
    /// The call is dropped as soon as the token is cancelled or the deadline
    /// passes, so a hung backend cannot hold the operation past either.
    pub async fn bound<F>(&self, step: &'static str, call: F) -> Result<F::Output>
    where
        F: Future,
    {
        self.checkpoint(step)?;

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RepositoryError::Cancelled { step }),
            _ = expired => Err(RepositoryError::DeadlineExceeded { step }),
            output = call => Ok(output),
        }
    }
}
