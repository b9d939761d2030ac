use crate::command::InterpreterConfig;
use crate::core::{SessionMode, DEFAULT_SESSION_TIMEOUT};
use crate::io::StoreConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Manage UC code inventory, redemptions and dues from the console
#[derive(Parser, Debug)]
#[command(name = "uc-ledger")]
#[command(about = "Manage UC code inventory, redemptions and dues", long_about = None)]
pub struct CliArgs {
    /// Directory holding codes.json, used.json and total_due.json
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "UC_LEDGER_DATA_DIR",
        default_value = ".",
        help = "Directory holding the ledger documents"
    )]
    pub data_dir: PathBuf,

    /// Command prefix, e.g. `J` for `Jstock`
    #[arg(
        long = "prefix",
        value_name = "PREFIX",
        env = "UC_LEDGER_PREFIX",
        default_value = "J",
        help = "Prefix that marks a message as a command"
    )]
    pub prefix: String,

    /// Upload session inactivity timeout in seconds
    #[arg(
        long = "session-timeout",
        value_name = "SECONDS",
        env = "UC_LEDGER_SESSION_TIMEOUT",
        help = "Seconds before an idle upload session expires (default: 300)"
    )]
    pub session_timeout: Option<u64>,

    /// What to do with a ledger document that cannot be parsed
    #[arg(
        long = "on-corrupt",
        value_name = "POLICY",
        env = "UC_LEDGER_ON_CORRUPT",
        default_value = "reset",
        help = "Corrupt document policy: 'reset' to start empty or 'fail' to refuse"
    )]
    pub on_corrupt: CorruptionPolicy,

    /// Log level for this crate (overrides RUST_LOG)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        help = "Log level: error, warn, info, debug or trace"
    )]
    pub log_level: Option<String>,
}

/// Handling of ledger documents that exist but cannot be parsed
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CorruptionPolicy {
    /// Log an error and treat the document as empty
    Reset,
    /// Refuse to load the document
    Fail,
}

impl CliArgs {
    /// Locations of the ledger documents and the corruption policy
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig::in_dir(&self.data_dir, self.on_corrupt)
    }

    /// Interpreter settings for the console binary
    ///
    /// A zero timeout is not usable and falls back to the default with a
    /// warning. Console uploads collect one code per line until `done`.
    ///
    /// # Returns
    ///
    /// An `InterpreterConfig` with the prefix and session timeout from the
    /// arguments.
    pub fn to_interpreter_config(&self) -> InterpreterConfig {
        let session_timeout = match self.session_timeout {
            Some(0) => {
                warn!(
                    default = DEFAULT_SESSION_TIMEOUT.as_secs(),
                    "session_timeout of 0 is invalid, using default"
                );
                DEFAULT_SESSION_TIMEOUT
            }
            Some(seconds) => Duration::from_secs(seconds),
            None => DEFAULT_SESSION_TIMEOUT,
        };

        InterpreterConfig {
            prefix: self.prefix.clone(),
            session_timeout,
            session_mode: SessionMode::UntilSentinel,
        }
    }

    /// Tracing filter directive built from `--log-level`, if given
    pub fn log_filter(&self) -> Option<String> {
        self.log_level
            .as_deref()
            .map(|level| format!("uc_ledger={}", level.to_lowercase()))
    }
}
