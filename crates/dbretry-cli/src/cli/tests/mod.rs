//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse_cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

pub(super) fn parse(args: &[&str]) -> CliCommand {
    parse_cli(args).command
}

mod commands;
