//! Retry loops: run an operation until success or the attempt budget is spent.

use super::policy::{RetryDecision, RetryPolicy};
use std::fmt::Display;
use std::future::Future;

const WITH_DATA: &str = "Retried operation with data";
const STATUS_ONLY: &str = "Retried operation";

/// Runs an async operation until it returns `Ok` or the policy says stop.
///
/// Returns the first successful value. When every attempt fails, returns the
/// error of the last attempt unchanged. Attempts run back to back.
pub async fn retry_with_data<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                policy.record_failure(attempt, WITH_DATA, &e);
                match policy.decide(attempt) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryNow => attempt += 1,
                }
            }
        }
    }
}

/// Status-only form of [`retry_with_data`].
pub async fn retry<F, Fut, E>(policy: &RetryPolicy, mut operation: F) -> Result<(), E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(()) => return Ok(()),
            Err(e) => {
                policy.record_failure(attempt, STATUS_ONLY, &e);
                match policy.decide(attempt) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryNow => attempt += 1,
                }
            }
        }
    }
}

/// Blocking counterpart of [`retry_with_data`] for synchronous operations.
pub fn run_with_retry_data<F, T, E>(policy: &RetryPolicy, mut f: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(value) => return Ok(value),
            Err(e) => {
                policy.record_failure(attempt, WITH_DATA, &e);
                match policy.decide(attempt) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryNow => attempt += 1,
                }
            }
        }
    }
}

/// Blocking counterpart of [`retry`].
pub fn run_with_retry<F, E>(policy: &RetryPolicy, mut f: F) -> Result<(), E>
where
    F: FnMut() -> Result<(), E>,
    E: Display,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(()) => return Ok(()),
            Err(e) => {
                policy.record_failure(attempt, STATUS_ONLY, &e);
                match policy.decide(attempt) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryNow => attempt += 1,
                }
            }
        }
    }
}
