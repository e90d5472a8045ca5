//! Tabular query results decoded from sqlx rows.

use crate::connection::types::SqlValue;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Rows returned by a query, with the column names of the result.
///
/// `columns` is empty when the query produced no rows (sqlx only reports
/// column metadata alongside a row).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `row` for the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&SqlValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)
    }

    pub(crate) fn from_sqlite(rows: &[SqliteRow]) -> Result<Self, sqlx::Error> {
        let columns = rows
            .first()
            .map(|r| r.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = rows
            .iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RowSet { columns, rows })
    }
}

fn decode_row(row: &SqliteRow) -> Result<Vec<SqlValue>, sqlx::Error> {
    (0..row.len()).map(|i| decode_cell(row, i)).collect()
}

/// Decode by the storage class of the stored value, not the declared column
/// type: SQLite lets any column hold any class.
fn decode_cell(row: &SqliteRow, i: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(i)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let class = raw.type_info().name().to_ascii_uppercase();
    let value = match class.as_str() {
        "INTEGER" | "BOOLEAN" | "INT8" => SqlValue::Integer(row.try_get::<i64, _>(i)?),
        "REAL" | "NUMERIC" => SqlValue::Real(row.try_get::<f64, _>(i)?),
        "BLOB" => SqlValue::Blob(row.try_get::<Vec<u8>, _>(i)?),
        _ => SqlValue::Text(row.try_get::<String, _>(i)?),
    };
    Ok(value)
}
