//! Database connection abstraction and the retrying decorator.
//!
//! [`DbConnection`] is the narrow capability a backend provides: run a query,
//! start a transaction, and report metadata. [`RetryableConnection`] wraps a
//! borrowed implementer and pushes the read/write calls through the retry
//! policy; metadata calls pass straight through.

pub mod retryable;
pub mod sqlite;
pub mod types;

pub use retryable::RetryableConnection;
pub use sqlite::{Client, DbError, RowSet, SqliteConnection};
pub use types::{Feature, FeatureParseError, ServerVersion, SqlValue, VersionParseError};

use async_trait::async_trait;

/// A database connection the retry wrapper can drive.
///
/// Implementations own their pool/session; the wrapper only borrows them.
/// No context or cancellation parameter is taken: every call runs to
/// completion unless the caller drops the future.
#[async_trait]
pub trait DbConnection: Send + Sync {
    /// Handle to the underlying client (pool, configuration).
    type Client: Send + Sync;
    /// Result of a query.
    type Rows: Send;
    /// Open transaction handle.
    type Transaction: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run `sql` with positional arguments bound in order.
    async fn execute_query(&self, sql: &str, args: &[SqlValue])
        -> Result<Self::Rows, Self::Error>;

    /// Start a transaction with the backend's default behaviour.
    async fn begin_transaction(&self) -> Result<Self::Transaction, Self::Error>;

    fn client(&self) -> &Self::Client;

    fn version(&self) -> &ServerVersion;

    fn feature_supported(&self, feature: Feature) -> bool {
        feature.supported_by(self.version())
    }

    /// Whether the session holds unrestricted privileges on the server.
    async fn is_superuser(&self) -> Result<bool, Self::Error>;
}
