//! Tooling & Integration Layer
//!
//! CLI surface consumed by process supervisors and shell scripts.

pub mod cli;

pub use cli::{parse_args, CheckArgs, Cli, CliContext, ParseOutcome, EXIT_USAGE};
