//! Retry policy for Slurm REST calls.
//!
//! Adapters never retry on their own; callers wrap an operation with
//! [`RetryPolicy::run`] and the error type decides, through [`Retryable`],
//! whether another attempt makes sense.
//!
//! ```ignore
//! let policy = RetryPolicy::default();
//! let job = policy
//!     .run(ctx.cancellation(), |_| jobs.get(&ctx, 42))
//!     .await?
//!     .value;
//! ```

pub mod config;
pub mod humantime_serde;
pub mod retry;

pub use config::{RetryPolicy, RetryTrigger, Retryable};
pub use retry::{RetryError, Retried, calculate_backoff};
