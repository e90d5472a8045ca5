//! `dbretry query <sql> [--arg v]... [--json]` – run a query through the retry wrapper.

use anyhow::Result;
use dbretry_core::connection::{RetryableConnection, RowSet, SqlValue, SqliteConnection};

pub async fn run_query(
    db: &RetryableConnection<'_, SqliteConnection>,
    sql: &str,
    raw_args: &[String],
    json: bool,
) -> Result<()> {
    let args: Vec<SqlValue> = raw_args.iter().map(|a| parse_arg(a)).collect();
    let rows = db.query(sql, &args).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_rows(&rows);
    }
    Ok(())
}

/// Interpret a command-line literal as a bind value.
pub(crate) fn parse_arg(raw: &str) -> SqlValue {
    if raw.eq_ignore_ascii_case("null") {
        return SqlValue::Null;
    }
    if let Ok(v) = raw.parse::<i64>() {
        return SqlValue::Integer(v);
    }
    if let Ok(v) = raw.parse::<f64>() {
        if v.is_finite() {
            return SqlValue::Real(v);
        }
    }
    if let Some(bytes) = parse_hex_blob(raw) {
        return SqlValue::Blob(bytes);
    }
    SqlValue::Text(raw.to_string())
}

/// `x'00ff'` / `X'00FF'` -> bytes.
fn parse_hex_blob(raw: &str) -> Option<Vec<u8>> {
    let inner = raw
        .strip_prefix("x'")
        .or_else(|| raw.strip_prefix("X'"))?
        .strip_suffix('\'')?;
    hex::decode(inner).ok()
}

fn print_rows(rows: &RowSet) {
    if rows.is_empty() {
        println!("(0 rows)");
        return;
    }
    println!("{}", rows.columns.join("\t"));
    for row in &rows.rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{}", cells.join("\t"));
    }
    println!("({} rows)", rows.len());
}
