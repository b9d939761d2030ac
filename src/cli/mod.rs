// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, CorruptionPolicy};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Values not given on the command line fall back to their `UC_LEDGER_*`
/// environment variables, then to the built-in defaults. If parsing fails
/// (or `--help` is passed) clap prints the message and exits the process.
///
/// # Returns
///
/// Returns a `CliArgs` struct with the parsed command-line arguments.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
