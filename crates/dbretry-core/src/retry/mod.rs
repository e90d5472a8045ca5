//! Retry policy and retry loops.
//!
//! A fixed attempt budget with no backoff or jitter. Every error is retried
//! the same way; the caller sees either the first success or the error of
//! the final attempt, untouched.

mod policy;
mod run;

pub use policy::{RetryDecision, RetryPolicy, MAX_ATTEMPTS};
pub use run::{retry, retry_with_data, run_with_retry, run_with_retry_data};
