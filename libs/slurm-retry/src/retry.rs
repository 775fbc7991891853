use std::future::Future;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::{RetryPolicy, Retryable};

/// Successful outcome of [`RetryPolicy::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retried<T> {
    pub value: T,
    /// Number of retries that preceded the successful attempt
    pub retries: usize,
}

/// Final failure of [`RetryPolicy::run`]: the last error seen.
#[derive(Debug, Error)]
#[error("{error} (after {retries} retries)")]
pub struct RetryError<E>
where
    E: std::error::Error + 'static,
{
    #[source]
    pub error: E,
    pub retries: usize,
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Drop the retry count and keep the underlying error.
    pub fn into_inner(self) -> E {
        self.error
    }
}

impl RetryPolicy {
    /// Backoff duration before retry number `retry` (0-based).
    #[must_use]
    pub fn backoff(&self, retry: usize) -> Duration {
        calculate_backoff(self, retry)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, exhausts
    /// `max_retries`, or `cancel` fires during a backoff sleep.
    ///
    /// `op` receives the 0-based attempt number.
    ///
    /// # Errors
    /// Returns the last error together with the number of retries performed.
    pub async fn run<T, E, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut op: F,
    ) -> Result<Retried<T>, RetryError<E>>
    where
        E: std::error::Error + Retryable + 'static,
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut retries = 0usize;
        loop {
            match op(retries).await {
                Ok(value) => return Ok(Retried { value, retries }),
                Err(error) => {
                    let trigger = error.retry_trigger();
                    if retries >= self.max_retries || !self.should_retry(trigger) {
                        return Err(RetryError { error, retries });
                    }

                    let delay = self.backoff(retries);
                    tracing::debug!(
                        retry = retries + 1,
                        max_retries = self.max_retries,
                        error = %error,
                        trigger = ?trigger,
                        delay = ?delay,
                        "Retrying Slurm request after backoff"
                    );

                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => {
                            return Err(RetryError { error, retries });
                        }
                        () = tokio::time::sleep(delay) => {}
                    }
                    retries += 1;
                }
            }
        }
    }
}

/// Calculate backoff duration for a given retry number.
///
/// Defensively handles invalid configuration values:
/// - Negative or NaN multiplier: treated as 1.0
/// - Zero or negative min wait: treated as zero
/// - Result always clamped to `max_wait`
pub fn calculate_backoff(policy: &RetryPolicy, retry: usize) -> Duration {
    // One day is the ceiling for any retry delay
    const MAX_BACKOFF_SECS: f64 = 86400.0;

    let retry_i32 = i32::try_from(retry).unwrap_or(i32::MAX);

    let multiplier = if policy.multiplier.is_finite() && policy.multiplier >= 0.0 {
        policy.multiplier
    } else {
        1.0
    };

    let min_secs = policy.min_wait.as_secs_f64();
    let max_secs = policy.max_wait.as_secs_f64().min(MAX_BACKOFF_SECS);

    let base = min_secs * multiplier.powi(retry_i32);
    let clamped = if base.is_finite() {
        base.min(max_secs).max(0.0)
    } else {
        max_secs
    };
    let duration = Duration::from_secs_f64(clamped);

    let duration = if policy.jitter {
        let jitter_factor = rand::rng().random_range(0.0..=0.25);
        duration + duration.mul_f64(jitter_factor)
    } else {
        duration
    };

    duration.min(Duration::from_secs_f64(max_secs))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_exponentially() {
        let policy = RetryPolicy {
            jitter: false,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(0), Duration::from_secs(1));
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
        assert_eq!(policy.backoff(10), Duration::from_secs(30));
    }

    #[test]
    fn test_backoff_jitter_stays_within_bounds() {
        let policy = RetryPolicy::default();
        for _ in 0..100 {
            let d = policy.backoff(1);
            assert!(d >= Duration::from_secs(2));
            assert!(d <= Duration::from_millis(2500));
        }
    }

    #[test]
    fn test_backoff_sanitizes_invalid_multiplier() {
        let policy = RetryPolicy {
            multiplier: f64::NAN,
            jitter: false,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(5), Duration::from_secs(1));
    }

    #[test]
    fn test_backoff_huge_retry_is_capped() {
        let policy = RetryPolicy {
            jitter: false,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(usize::MAX), Duration::from_secs(30));
    }
}
