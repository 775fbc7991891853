#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use slurm_retry::{RetryPolicy, RetryTrigger, Retryable};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
enum FakeError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("connection reset")]
    Reset,
}

impl Retryable for FakeError {
    fn retry_trigger(&self) -> RetryTrigger {
        match self {
            Self::Status(s) => RetryTrigger::Status(*s),
            Self::Reset => RetryTrigger::TransportError,
        }
    }
}

/// Replays a scripted sequence of HTTP statuses; 2xx is success.
fn scripted(statuses: &[u16]) -> (Arc<AtomicUsize>, impl Fn(usize) -> Result<u16, FakeError> + use<>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let statuses = statuses.to_vec();
    let counter = Arc::clone(&calls);
    let op = move |_attempt: usize| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        let status = statuses[n.min(statuses.len() - 1)];
        if (200..300).contains(&status) {
            Ok(status)
        } else {
            Err(FakeError::Status(status))
        }
    };
    (calls, op)
}

#[tokio::test(start_paused = true)]
async fn succeeds_on_third_attempt_after_two_retries() {
    let (calls, op) = scripted(&[503, 503, 200]);
    let policy = RetryPolicy::default();

    let out = policy
        .run(&CancellationToken::new(), |attempt| {
            let res = op(attempt);
            async move { res }
        })
        .await
        .unwrap();

    assert_eq!(out.value, 200);
    assert_eq!(out.retries, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn client_error_is_not_retried() {
    let (calls, op) = scripted(&[400]);
    let policy = RetryPolicy::default();

    let err = policy
        .run(&CancellationToken::new(), |attempt| {
            let res = op(attempt);
            async move { res }
        })
        .await
        .unwrap_err();

    assert_eq!(err.retries, 0);
    assert!(matches!(err.error, FakeError::Status(400)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn any_server_error_is_retried() {
    for status in [501, 507] {
        let (calls, op) = scripted(&[status, 200]);
        let out = RetryPolicy::fast()
            .run(&CancellationToken::new(), |attempt| {
                let res = op(attempt);
                async move { res }
            })
            .await
            .unwrap();

        assert_eq!(out.retries, 1, "status {status}");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_max_retries() {
    let (calls, op) = scripted(&[502]);
    let policy = RetryPolicy::new(2, Duration::from_millis(10), Duration::from_millis(50));

    let err = policy
        .run(&CancellationToken::new(), |attempt| {
            let res = op(attempt);
            async move { res }
        })
        .await
        .unwrap_err();

    assert_eq!(err.retries, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(err.to_string(), "HTTP 502 (after 2 retries)");
}

#[tokio::test(start_paused = true)]
async fn transport_errors_are_retried() {
    let calls = AtomicUsize::new(0);
    let policy = RetryPolicy::fast();

    let out = policy
        .run(&CancellationToken::new(), |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { if n == 0 { Err(FakeError::Reset) } else { Ok(n) } }
        })
        .await
        .unwrap();

    assert_eq!(out.retries, 1);
    assert_eq!(out.value, 1);
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_backoff() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let calls = AtomicUsize::new(0);

    let err = RetryPolicy::default()
        .run(&cancel, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(FakeError::Status(503)) }
        })
        .await
        .unwrap_err();

    assert_eq!(err.retries, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
