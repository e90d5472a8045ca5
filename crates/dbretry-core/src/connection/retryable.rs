//! Decorator that retries query and transaction-start calls.

use super::types::{Feature, ServerVersion, SqlValue};
use super::DbConnection;
use crate::retry::{retry_with_data, RetryPolicy};

/// Borrowed view of a [`DbConnection`] whose `query` and `begin` calls are
/// retried up to the policy's attempt budget.
///
/// Holds no state besides the borrowed connection and a copy of the policy,
/// so it is as safe for concurrent use as the connection it wraps. Errors
/// come back exactly as the wrapped connection produced them; the retry
/// history only shows up in the log.
pub struct RetryableConnection<'a, C: DbConnection + ?Sized> {
    db: &'a C,
    policy: RetryPolicy,
}

impl<'a, C: DbConnection + ?Sized> Clone for RetryableConnection<'a, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, C: DbConnection + ?Sized> Copy for RetryableConnection<'a, C> {}

impl<'a, C: DbConnection + ?Sized> RetryableConnection<'a, C> {
    /// Wrap `db` with the default policy (5 attempts, warning per failure).
    pub fn new(db: &'a C) -> Self {
        Self::with_policy(db, RetryPolicy::default())
    }

    pub fn with_policy(db: &'a C, policy: RetryPolicy) -> Self {
        Self { db, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// The wrapped connection, for calls that must not be retried.
    pub fn inner(&self) -> &'a C {
        self.db
    }

    pub fn client(&self) -> &'a C::Client {
        self.db.client()
    }

    pub fn version(&self) -> &'a ServerVersion {
        self.db.version()
    }

    pub fn feature_supported(&self, feature: Feature) -> bool {
        self.db.feature_supported(feature)
    }

    /// Single call, never retried.
    pub async fn is_superuser(&self) -> Result<bool, C::Error> {
        self.db.is_superuser().await
    }

    /// Run `sql` through the retry loop; the same arguments are re-bound on
    /// every attempt.
    pub async fn query(&self, sql: &str, args: &[SqlValue]) -> Result<C::Rows, C::Error> {
        let db = self.db;
        retry_with_data(&self.policy, || db.execute_query(sql, args)).await
    }

    /// Start a transaction through the retry loop.
    pub async fn begin(&self) -> Result<C::Transaction, C::Error> {
        let db = self.db;
        retry_with_data(&self.policy, || db.begin_transaction()).await
    }
}
