use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Conditions that trigger a retry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RetryTrigger {
    /// Transport-level errors (connection refused, DNS failure, reset, etc.)
    TransportError,
    /// Request timeout
    Timeout,
    /// Specific HTTP status code
    Status(u16),
    /// Error its source already classified as transient (e.g. an embedded
    /// "resource busy" error on a 200 response)
    Transient,
    /// Error that is never retryable (validation, not found, cancellation)
    NonRetryable,
}

impl RetryTrigger {
    /// HTTP 429 Too Many Requests
    pub const TOO_MANY_REQUESTS: Self = Self::Status(429);
    /// HTTP 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: Self = Self::Status(500);
    /// HTTP 502 Bad Gateway
    pub const BAD_GATEWAY: Self = Self::Status(502);
    /// HTTP 503 Service Unavailable
    pub const SERVICE_UNAVAILABLE: Self = Self::Status(503);
    /// HTTP 504 Gateway Timeout
    pub const GATEWAY_TIMEOUT: Self = Self::Status(504);
}

/// Anything a [`RetryPolicy`] can classify.
pub trait Retryable {
    /// How this failure should be treated by the retry loop.
    fn retry_trigger(&self) -> RetryTrigger;
}

/// Retry policy with exponential backoff.
///
/// Computes delay as `min(min_wait * multiplier^retry, max_wait)`, plus 0-25% jitter
/// when enabled. Total attempts = 1 (initial) + `max_retries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt (default: 3)
    pub max_retries: usize,

    /// Backoff before the first retry (default: 1s)
    #[serde(with = "crate::humantime_serde")]
    pub min_wait: Duration,

    /// Upper bound for any single backoff (default: 30s)
    #[serde(with = "crate::humantime_serde")]
    pub max_wait: Duration,

    /// Backoff multiplier for exponential growth (default: 2.0)
    pub multiplier: f64,

    /// Add random 0-25% delay to each backoff (default: true)
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_wait: Duration::from_secs(1),
            max_wait: Duration::from_secs(30),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with custom retry count and wait bounds
    #[must_use]
    pub fn new(max_retries: usize, min_wait: Duration, max_wait: Duration) -> Self {
        Self {
            max_retries,
            min_wait,
            max_wait,
            ..Default::default()
        }
    }

    /// Policy that never retries
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Fast policy for tests (1ms initial, 100ms max, no jitter)
    #[must_use]
    pub fn fast() -> Self {
        Self {
            max_retries: 3,
            min_wait: Duration::from_millis(1),
            max_wait: Duration::from_millis(100),
            multiplier: 2.0,
            jitter: false,
        }
    }

    /// Total number of attempts including the initial one
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_retries.saturating_add(1)
    }

    /// Whether a failure with the given trigger is worth another attempt.
    #[must_use]
    pub fn should_retry(&self, trigger: RetryTrigger) -> bool {
        if self.max_retries == 0 {
            return false;
        }
        match trigger {
            RetryTrigger::TransportError | RetryTrigger::Timeout | RetryTrigger::Transient => {
                true
            }
            RetryTrigger::Status(status) => matches!(status, 429 | 500..=599),
            RetryTrigger::NonRetryable => false,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.min_wait, Duration::from_secs(1));
        assert_eq!(policy.max_wait, Duration::from_secs(30));
        assert!(policy.jitter);
    }

    #[test]
    fn test_should_retry_classification() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(RetryTrigger::TransportError));
        assert!(policy.should_retry(RetryTrigger::Timeout));
        assert!(policy.should_retry(RetryTrigger::Transient));
        assert!(policy.should_retry(RetryTrigger::TOO_MANY_REQUESTS));
        assert!(policy.should_retry(RetryTrigger::SERVICE_UNAVAILABLE));
        assert!(policy.should_retry(RetryTrigger::GATEWAY_TIMEOUT));
        assert!(policy.should_retry(RetryTrigger::Status(501)));
        assert!(policy.should_retry(RetryTrigger::Status(507)));
        assert!(!policy.should_retry(RetryTrigger::Status(400)));
        assert!(!policy.should_retry(RetryTrigger::Status(404)));
        assert!(!policy.should_retry(RetryTrigger::NonRetryable));
        assert!(!RetryPolicy::disabled().should_retry(RetryTrigger::Timeout));
    }

    #[test]
    fn test_policy_deserializes_humantime() {
        let policy: RetryPolicy =
            serde_json::from_str(r#"{"max_retries": 5, "min_wait": "250ms", "max_wait": "5s"}"#)
                .unwrap();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.min_wait, Duration::from_millis(250));
        assert_eq!(policy.max_wait, Duration::from_secs(5));
        assert!(policy.jitter);
    }

    #[test]
    fn test_policy_rejects_unknown_fields() {
        let res = serde_json::from_str::<RetryPolicy>(r#"{"retries": 5}"#);
        assert!(res.is_err());
    }
}
