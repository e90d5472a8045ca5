//! Value, version and feature types shared by every connection backend.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A scalar bound as a query argument or read back from a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(v) => write!(f, "{}", v),
            SqlValue::Real(v) => write!(f, "{}", v),
            SqlValue::Text(s) => write!(f, "{}", s),
            SqlValue::Blob(b) => write!(f, "x'{}'", hex::encode(b)),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Integer(v as i64)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Blob(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Error parsing a server version string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid server version {input:?}")]
pub struct VersionParseError {
    pub input: String,
}

/// `major.minor.patch` version reported by the database server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Ord for ServerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl PartialOrd for ServerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ServerVersion {
    type Err = VersionParseError;

    /// Accepts `"3"`, `"3.45"` or `"3.45.1"`; missing components are 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(err());
        }
        let mut parts = [0u32; 3];
        let mut count = 0;
        for piece in trimmed.split('.') {
            if count == parts.len() {
                return Err(err());
            }
            parts[count] = piece.parse().map_err(|_| err())?;
            count += 1;
        }
        Ok(ServerVersion::new(parts[0], parts[1], parts[2]))
    }
}

/// Error returned when a feature name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature {0:?}")]
pub struct FeatureParseError(pub String);

/// Server capability gated on a minimum server version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// `INSERT ... ON CONFLICT DO UPDATE`.
    Upsert,
    WindowFunctions,
    /// `ALTER TABLE ... RENAME COLUMN`.
    RenameColumn,
    GeneratedColumns,
    /// `INSERT/UPDATE/DELETE ... RETURNING`.
    Returning,
    /// `ALTER TABLE ... DROP COLUMN`.
    DropColumn,
    StrictTables,
    /// `->` and `->>` JSON operators.
    JsonOperators,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Upsert,
        Feature::WindowFunctions,
        Feature::RenameColumn,
        Feature::GeneratedColumns,
        Feature::Returning,
        Feature::DropColumn,
        Feature::StrictTables,
        Feature::JsonOperators,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Upsert => "upsert",
            Feature::WindowFunctions => "window-functions",
            Feature::RenameColumn => "rename-column",
            Feature::GeneratedColumns => "generated-columns",
            Feature::Returning => "returning",
            Feature::DropColumn => "drop-column",
            Feature::StrictTables => "strict-tables",
            Feature::JsonOperators => "json-operators",
        }
    }

    /// First server version that ships the feature.
    pub fn min_version(self) -> ServerVersion {
        match self {
            Feature::Upsert => ServerVersion::new(3, 24, 0),
            Feature::WindowFunctions | Feature::RenameColumn => ServerVersion::new(3, 25, 0),
            Feature::GeneratedColumns => ServerVersion::new(3, 31, 0),
            Feature::Returning | Feature::DropColumn => ServerVersion::new(3, 35, 0),
            Feature::StrictTables => ServerVersion::new(3, 37, 0),
            Feature::JsonOperators => ServerVersion::new(3, 38, 0),
        }
    }

    pub fn supported_by(self, version: &ServerVersion) -> bool {
        *version >= self.min_version()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = FeatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FeatureParseError(s.to_string()))
    }
}
