//! `DbConnection` that fails a set number of read/write calls before
//! delegating to a real SQLite connection.

use async_trait::async_trait;
use dbretry_core::connection::{
    Client, DbConnection, DbError, RowSet, ServerVersion, SqlValue, SqliteConnection,
};
use std::sync::atomic::{AtomicU32, Ordering};

pub struct FlakyConnection {
    pub inner: SqliteConnection,
    fail_first: u32,
    pub query_calls: AtomicU32,
    pub begin_calls: AtomicU32,
}

impl FlakyConnection {
    pub fn new(inner: SqliteConnection, fail_first: u32) -> Self {
        Self {
            inner,
            fail_first,
            query_calls: AtomicU32::new(0),
            begin_calls: AtomicU32::new(0),
        }
    }

    fn outage(&self, call: u32) -> Option<DbError> {
        (call <= self.fail_first).then(|| DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl DbConnection for FlakyConnection {
    type Client = Client;
    type Rows = RowSet;
    type Transaction = <SqliteConnection as DbConnection>::Transaction;
    type Error = DbError;

    async fn execute_query(&self, sql: &str, args: &[SqlValue]) -> Result<RowSet, DbError> {
        let call = self.query_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(e) = self.outage(call) {
            return Err(e);
        }
        self.inner.execute_query(sql, args).await
    }

    async fn begin_transaction(&self) -> Result<Self::Transaction, DbError> {
        let call = self.begin_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(e) = self.outage(call) {
            return Err(e);
        }
        self.inner.begin_transaction().await
    }

    fn client(&self) -> &Client {
        self.inner.client()
    }

    fn version(&self) -> &ServerVersion {
        self.inner.version()
    }

    async fn is_superuser(&self) -> Result<bool, DbError> {
        self.inner.is_superuser().await
    }
}
