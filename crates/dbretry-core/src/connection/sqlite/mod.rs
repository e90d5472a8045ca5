//! SQLite-backed [`DbConnection`] (sqlx pool).
//!
//! The server version is read once at connect time and cached; feature
//! checks compare against it without touching the database.

mod error;
mod rows;

pub use error::DbError;
pub use rows::RowSet;

use super::types::{ServerVersion, SqlValue};
use super::DbConnection;
use crate::config::ConnectionConfig;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

/// Client handle: the pool plus the configuration it was opened with.
#[derive(Debug, Clone)]
pub struct Client {
    config: ConnectionConfig,
    pool: Pool<Sqlite>,
}

impl Client {
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn database_url(&self) -> &str {
        &self.config.database_url
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

/// Connection to a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteConnection {
    client: Client,
    version: ServerVersion,
}

impl SqliteConnection {
    /// Open the pool described by `config` and read the server version.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, DbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Self::from_pool(config.clone(), pool).await
    }

    /// Wrap an already opened pool.
    pub async fn from_pool(config: ConnectionConfig, pool: Pool<Sqlite>) -> Result<Self, DbError> {
        let raw: String = sqlx::query_scalar("SELECT sqlite_version()")
            .fetch_one(&pool)
            .await?;
        let version: ServerVersion = raw.parse()?;
        tracing::debug!("connected to {} (sqlite {})", config.database_url, version);
        Ok(SqliteConnection {
            client: Client { config, pool },
            version,
        })
    }

    /// Close the pool; outstanding connections finish first.
    pub async fn close(&self) {
        self.client.pool.close().await;
    }
}

fn bind_all<'q>(
    mut query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    args: &[SqlValue],
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg.clone() {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(v),
            SqlValue::Real(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Blob(v) => query.bind(v),
        };
    }
    query
}

#[async_trait]
impl DbConnection for SqliteConnection {
    type Client = Client;
    type Rows = RowSet;
    type Transaction = sqlx::Transaction<'static, Sqlite>;
    type Error = DbError;

    async fn execute_query(&self, sql: &str, args: &[SqlValue]) -> Result<RowSet, DbError> {
        let rows = bind_all(sqlx::query(sql), args)
            .fetch_all(&self.client.pool)
            .await?;
        Ok(RowSet::from_sqlite(&rows)?)
    }

    async fn begin_transaction(&self) -> Result<Self::Transaction, DbError> {
        Ok(self.client.pool.begin().await?)
    }

    fn client(&self) -> &Client {
        &self.client
    }

    fn version(&self) -> &ServerVersion {
        &self.version
    }

    /// SQLite has no roles: a session counts as superuser when it may write,
    /// i.e. `PRAGMA query_only` is off.
    ///
    /// The pragma is per connection, so the answer describes whichever pooled
    /// connection served this call. Other connections in the pool may differ.
    async fn is_superuser(&self) -> Result<bool, DbError> {
        let query_only: i64 = sqlx::query_scalar("PRAGMA query_only")
            .fetch_one(&self.client.pool)
            .await?;
        Ok(query_only == 0)
    }
}
