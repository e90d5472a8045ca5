//! Errors produced by the SQLite backend.

use crate::connection::types::VersionParseError;

/// Any failure talking to SQLite. Returned unchanged through the retry
/// wrapper, so callers can match on the sqlx error directly.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// `sqlite_version()` returned something we cannot parse.
    #[error(transparent)]
    Version(#[from] VersionParseError),
}
