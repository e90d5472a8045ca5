//! CLI for the dbretry retrying database connection.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dbretry_core::config;
use dbretry_core::connection::{Feature, RetryableConnection, SqliteConnection};
use dbretry_core::retry::RetryPolicy;

use commands::{run_exec, run_info, run_query};

/// Top-level CLI for dbretry.
#[derive(Debug, Parser)]
#[command(name = "dbretry")]
#[command(about = "dbretry: run database calls through a retrying connection", long_about = None)]
pub struct Cli {
    /// Database URL (overrides `connection.database_url` from config.toml).
    #[arg(long, global = true, value_name = "URL")]
    pub database: Option<String>,

    /// Attempts per call (overrides `retry.max_attempts`). Must be at least 1.
    #[arg(long, global = true, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: Option<u32>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a query and print the result rows.
    Query {
        /// SQL text with `?` placeholders.
        sql: String,

        /// Positional argument for a placeholder (repeatable).
        /// `null`, integers, floats and x'hex' blobs are recognised; anything else is text.
        #[arg(long = "arg", value_name = "VALUE")]
        args: Vec<String>,

        /// Print rows as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run statements in a single transaction and commit.
    Exec {
        /// One or more SQL statements, executed in order.
        #[arg(required = true)]
        statements: Vec<String>,
    },

    /// Show server version, privilege and feature support.
    Info {
        /// Only report these features (repeatable), e.g. `--feature returning`.
        #[arg(long = "feature", value_name = "NAME")]
        features: Vec<Feature>,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn retry_policy(&self, cfg: &config::DbRetryConfig) -> RetryPolicy {
        let policy = cfg.retry_policy();
        match self.attempts {
            Some(n) => RetryPolicy::new(n).with_logging(policy.log_attempts()),
            None => policy,
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(url) = &cli.database {
            cfg.connection.database_url = url.clone();
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let conn = SqliteConnection::connect(&cfg.connection).await?;
        let db = RetryableConnection::with_policy(&conn, cli.retry_policy(&cfg));

        let result = match &cli.command {
            CliCommand::Query { sql, args, json } => run_query(&db, sql, args, *json).await,
            CliCommand::Exec { statements } => run_exec(&db, statements).await,
            CliCommand::Info { features, json } => run_info(&db, features, *json).await,
        };
        conn.close().await;
        result
    }
}

#[cfg(test)]
mod tests;
