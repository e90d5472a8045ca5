//! `dbretry exec <sql>...` – run statements in one transaction.

use anyhow::{Context, Result};
use dbretry_core::connection::{RetryableConnection, SqliteConnection};

pub async fn run_exec(
    db: &RetryableConnection<'_, SqliteConnection>,
    statements: &[String],
) -> Result<()> {
    // Only the transaction start is retried; statements inside it run once.
    let mut tx = db.begin().await?;
    for (i, stmt) in statements.iter().enumerate() {
        let done = sqlx::query(stmt)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("statement {} failed, transaction rolled back", i + 1))?;
        println!("{}: {} row(s) affected", i + 1, done.rows_affected());
    }
    tx.commit().await.context("commit")?;
    tracing::info!("committed {} statement(s)", statements.len());
    Ok(())
}
