use crate::retry::{RetryPolicy, MAX_ATTEMPTS};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per operation (including the first).
    pub max_attempts: u32,
    /// Log a warning for every failed attempt.
    #[serde(default = "default_log_attempts")]
    pub log_attempts: bool,
}

fn default_log_attempts() -> bool {
    true
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            log_attempts: true,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts).with_logging(self.log_attempts)
    }
}

/// Where and how to open the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// sqlx connection URL, e.g. `sqlite://path/to/db.sqlite?mode=rwc`.
    pub database_url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    8
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl ConnectionConfig {
    /// Private in-memory database. A single pooled connection, since every
    /// SQLite connection to `:memory:` sees its own database.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Database file at `path`, created on first open.
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: path_to_sqlite_uri(path.as_ref()) + "?mode=rwc",
            max_connections: default_max_connections(),
        }
    }
}

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Global configuration loaded from `~/.config/dbretry/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbRetryConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl DbRetryConfig {
    /// Effective retry policy (configured section or defaults).
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }

    fn validate(&self) -> Result<()> {
        if let Some(retry) = &self.retry {
            if retry.max_attempts == 0 {
                bail!("retry.max_attempts must be at least 1");
            }
        }
        if self.connection.max_connections == 0 {
            bail!("connection.max_connections must be at least 1");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dbretry")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DbRetryConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DbRetryConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load and validate configuration from a specific file.
pub fn load_from(path: &Path) -> Result<DbRetryConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: DbRetryConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = DbRetryConfig::default();
        assert_eq!(cfg.connection.database_url, "sqlite::memory:");
        assert_eq!(cfg.connection.max_connections, 1);
        assert!(cfg.retry.is_none());
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts(), 5);
        assert!(policy.log_attempts());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = DbRetryConfig {
            connection: ConnectionConfig::for_path("/tmp/app.db"),
            retry: Some(RetryConfig::default()),
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: DbRetryConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.connection, cfg.connection);
        assert_eq!(parsed.retry.unwrap().max_attempts, 5);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            [connection]
            database_url = "sqlite://data/app.db"
            max_connections = 4

            [retry]
            max_attempts = 3
            log_attempts = false
        "#;
        let cfg: DbRetryConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.connection.database_url, "sqlite://data/app.db");
        assert_eq!(cfg.connection.max_connections, 4);
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts(), 3);
        assert!(!policy.log_attempts());
    }

    #[test]
    fn config_toml_optional_fields_default() {
        let toml = r#"
            [connection]
            database_url = "sqlite://x.db"

            [retry]
            max_attempts = 2
        "#;
        let cfg: DbRetryConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.connection.max_connections, 8);
        assert!(cfg.retry.unwrap().log_attempts);
    }

    #[test]
    fn path_uri_is_percent_encoded() {
        let cfg = ConnectionConfig::for_path("/tmp/my dir/a#b.db");
        assert_eq!(
            cfg.database_url,
            "sqlite:///tmp/my%20dir/a%23b.db?mode=rwc"
        );
    }

    #[test]
    fn load_from_rejects_zero_attempts() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[retry]\nmax_attempts = 0").unwrap();
        let err = load_from(f.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("max_attempts"));
    }

    #[test]
    fn load_from_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[connection]\ndatabase_url = \"sqlite://a.db\"").unwrap();
        let cfg = load_from(f.path()).unwrap();
        assert_eq!(cfg.connection.database_url, "sqlite://a.db");
        assert!(cfg.retry.is_none());
    }
}
