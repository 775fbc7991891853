//! Per-call cancellation and deadline.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a [`RequestContext`] is no longer usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Cancelled,
    DeadlineExceeded,
}

/// Cancellation token plus an optional deadline, passed to every manager call.
///
/// Cloning shares the token, so cancelling any clone cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context driven by an existing token (e.g. a service shutdown token).
    #[must_use]
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Same token, with the deadline set `timeout` from now.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Same token, with an absolute deadline. An earlier existing deadline wins.
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };
        Self {
            cancel: self.cancel.clone(),
            deadline: Some(deadline),
        }
    }

    /// Child context: cancelled with the parent, cancellable on its own.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `Ok` while the context is live.
    ///
    /// # Errors
    /// Returns the reason the context can no longer be used.
    pub fn check(&self) -> Result<(), ContextState> {
        if self.cancel.is_cancelled() {
            return Err(ContextState::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ContextState::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> ContextState {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => ContextState::Cancelled,
                    () = tokio::time::sleep_until(deadline) => ContextState::DeadlineExceeded,
                }
            }
            None => {
                self.cancel.cancelled().await;
                ContextState::Cancelled
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fresh_context_is_live() {
        assert_eq!(RequestContext::new().check(), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_propagates_to_clones_and_children() {
        let ctx = RequestContext::new();
        let clone = ctx.clone();
        let child = ctx.child();
        ctx.cancel();
        assert_eq!(clone.check(), Err(ContextState::Cancelled));
        assert_eq!(child.check(), Err(ContextState::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn child_cancel_does_not_reach_parent() {
        let ctx = RequestContext::new();
        let child = ctx.child();
        child.cancel();
        assert_eq!(ctx.check(), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_expires() {
        let ctx = RequestContext::new().with_timeout(Duration::from_secs(1));
        assert_eq!(ctx.check(), Ok(()));
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(ctx.check(), Err(ContextState::DeadlineExceeded));
        assert_eq!(ctx.done().await, ContextState::DeadlineExceeded);
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_deadline_wins() {
        let ctx = RequestContext::new().with_timeout(Duration::from_secs(1));
        let later = ctx.with_timeout(Duration::from_secs(10));
        assert_eq!(later.deadline(), ctx.deadline());
    }
}
