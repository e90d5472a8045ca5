//! Transient-fault retry wrapper around a database connection.
//!
//! [`connection::RetryableConnection`] borrows any [`connection::DbConnection`]
//! and re-runs `query`/`begin` up to [`retry::MAX_ATTEMPTS`] times before
//! surfacing the last error. Metadata calls (client, version, feature
//! support, superuser check) are passed through without retry.

pub mod config;
pub mod connection;
pub mod logging;
pub mod retry;
