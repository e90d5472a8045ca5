use std::fmt;

/// Attempt budget used when no explicit policy is configured.
pub const MAX_ATTEMPTS: u32 = 5;

/// Decision returned by the retry policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up and surface the error of the attempt that just failed.
    NoRetry,
    /// Run the operation again immediately.
    RetryNow,
}

/// Fixed attempt budget, no backoff.
///
/// Every error is treated the same: the operation is re-run right away until
/// it succeeds or `max_attempts` invocations have been made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    log_attempts: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            log_attempts: true,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given budget. A budget of 0 is raised to 1 so the
    /// operation always runs at least once.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Enable or disable the per-attempt warning log.
    pub fn with_logging(mut self, log_attempts: bool) -> Self {
        self.log_attempts = log_attempts;
        self
    }

    /// Same budget, no per-attempt log lines.
    pub fn silent(self) -> Self {
        self.with_logging(false)
    }

    /// Maximum number of invocations (including the first).
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn log_attempts(&self) -> bool {
        self.log_attempts
    }

    /// Decide what to do after `attempt` (1-based) has failed.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            RetryDecision::NoRetry
        } else {
            RetryDecision::RetryNow
        }
    }

    /// Emit the warning for a failed attempt, if logging is enabled.
    pub(crate) fn record_failure(&self, attempt: u32, what: &str, error: &dyn fmt::Display) {
        if self.log_attempts {
            tracing::warn!(
                error = %error,
                "[attempt {}/{}] {}",
                attempt,
                self.max_attempts,
                what
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_five_with_logging() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_attempts(), MAX_ATTEMPTS);
        assert_eq!(p.max_attempts(), 5);
        assert!(p.log_attempts());
    }

    #[test]
    fn zero_attempts_clamped_to_one() {
        let p = RetryPolicy::new(0);
        assert_eq!(p.max_attempts(), 1);
        assert_eq!(p.decide(1), RetryDecision::NoRetry);
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy::new(3);
        assert_eq!(p.decide(1), RetryDecision::RetryNow);
        assert_eq!(p.decide(2), RetryDecision::RetryNow);
        assert_eq!(p.decide(3), RetryDecision::NoRetry);
        assert_eq!(p.decide(4), RetryDecision::NoRetry);
    }

    #[test]
    fn silent_keeps_budget() {
        let p = RetryPolicy::new(7).silent();
        assert_eq!(p.max_attempts(), 7);
        assert!(!p.log_attempts());
        assert!(p.with_logging(true).log_attempts());
    }
}
