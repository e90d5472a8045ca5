//! Tests for subcommand and global flag parsing.

use super::{parse, parse_cli};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use crate::cli::commands::selected_features;
use dbretry_core::config::{DbRetryConfig, RetryConfig};
use dbretry_core::connection::Feature;

#[test]
fn cli_parse_query_with_args() {
    match parse(&["dbretry", "query", "SELECT ?, ?", "--arg", "1", "--arg", "x"]) {
        CliCommand::Query { sql, args, json } => {
            assert_eq!(sql, "SELECT ?, ?");
            assert!(!json);
            assert_eq!(args, vec!["1".to_string(), "x".to_string()]);
        }
        _ => panic!("expected Query"),
    }
}

#[test]
fn cli_parse_query_without_args() {
    match parse(&["dbretry", "query", "SELECT 1", "--json"]) {
        CliCommand::Query { args, json, .. } => {
            assert!(args.is_empty());
            assert!(json);
        }
        _ => panic!("expected Query"),
    }
}

#[test]
fn cli_parse_exec_multiple_statements() {
    match parse(&["dbretry", "exec", "CREATE TABLE t (x)", "INSERT INTO t VALUES (1)"]) {
        CliCommand::Exec { statements } => assert_eq!(statements.len(), 2),
        _ => panic!("expected Exec"),
    }
}

#[test]
fn cli_parse_exec_requires_statement() {
    assert!(Cli::try_parse_from(["dbretry", "exec"]).is_err());
}

#[test]
fn cli_parse_info_json() {
    match parse(&["dbretry", "info", "--json"]) {
        CliCommand::Info { json, features } => {
            assert!(json);
            assert!(features.is_empty());
        }
        _ => panic!("expected Info"),
    }
    match parse(&["dbretry", "info"]) {
        CliCommand::Info { json, .. } => assert!(!json),
        _ => panic!("expected Info"),
    }
}

#[test]
fn cli_parse_global_overrides() {
    let cli = parse_cli(&[
        "dbretry",
        "info",
        "--database",
        "sqlite://other.db",
        "--attempts",
        "2",
    ]);
    assert_eq!(cli.database.as_deref(), Some("sqlite://other.db"));
    assert_eq!(cli.attempts, Some(2));
}

#[test]
fn attempts_flag_overrides_config_budget() {
    let cfg = DbRetryConfig {
        retry: Some(RetryConfig {
            max_attempts: 9,
            log_attempts: false,
        }),
        ..DbRetryConfig::default()
    };
    let cli = parse_cli(&["dbretry", "--attempts", "3", "info"]);
    let policy = cli.retry_policy(&cfg);
    assert_eq!(policy.max_attempts(), 3);
    assert!(!policy.log_attempts());

    let cli = parse_cli(&["dbretry", "info"]);
    assert_eq!(cli.retry_policy(&cfg).max_attempts(), 9);
}

#[test]
fn attempts_flag_rejects_zero() {
    let err = Cli::try_parse_from(["dbretry", "--attempts", "0", "info"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    assert!(Cli::try_parse_from(["dbretry", "info", "--attempts", "0"]).is_err());
    assert_eq!(parse_cli(&["dbretry", "--attempts", "1", "info"]).attempts, Some(1));
}

#[test]
fn cli_parse_info_feature_filter() {
    match parse(&["dbretry", "info", "--feature", "returning", "--feature", "upsert"]) {
        CliCommand::Info { features, .. } => {
            assert_eq!(features, vec![Feature::Returning, Feature::Upsert]);
        }
        _ => panic!("expected Info"),
    }
    assert!(Cli::try_parse_from(["dbretry", "info", "--feature", "merge"]).is_err());
}

#[test]
fn info_reports_all_features_unless_filtered() {
    assert_eq!(selected_features(&[]), Feature::ALL.to_vec());
    assert_eq!(
        selected_features(&[Feature::StrictTables, Feature::StrictTables]),
        vec![Feature::StrictTables]
    );
}
