//! Cooperative cancellation for long-running loops

use crate::{MathError, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared cancellation signal.
///
/// Clones observe the same flag, so a token handed to a fit running on one
/// thread can be cancelled from another. Loops poll [`check`](Self::check)
/// at every iteration boundary and bail out with [`MathError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    /// Checks left before the token cancels itself
    budget: Option<Arc<AtomicUsize>>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token that lets `checks` calls to [`check`](Self::check)
    /// pass and cancels itself on the next one.
    ///
    /// Bounds the number of loop iterations a computation may run.
    pub fn with_check_budget(checks: usize) -> Self {
        Self {
            cancelled: Arc::default(),
            budget: Some(Arc::new(AtomicUsize::new(checks))),
        }
    }

    /// Signal cancellation to every clone of this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been signalled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(MathError::Cancelled)` once the token has fired
    pub fn check(&self) -> Result<()> {
        if let Some(budget) = &self.budget {
            let spent = budget
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_err();
            if spent {
                self.cancel();
            }
        }

        if self.is_cancelled() {
            return Err(MathError::Cancelled);
        }
        Ok(())
    }
}
