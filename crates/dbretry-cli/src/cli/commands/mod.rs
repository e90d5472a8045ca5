//! CLI command handlers. Each command is in its own file.

mod exec;
mod info;
mod query;

pub use exec::run_exec;
pub use info::run_info;
pub use query::run_query;

#[cfg(test)]
pub(crate) use info::selected_features;
#[cfg(test)]
pub(crate) use query::parse_arg;
