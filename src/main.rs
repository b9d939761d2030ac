//! UC Code Ledger CLI
//!
//! Console front end for the UC code ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir /srv/uc --prefix J
//! cargo run -- --on-corrupt fail --log-level debug
//! ```
//!
//! Commands are read from stdin one per line and replies are written to
//! stdout. Logs go to stderr. Type `exit` to quit.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid configuration, unreadable input, etc.)

use std::io::{self, BufWriter};
use std::process;
use tracing_subscriber::EnvFilter;
use uc_ledger::cli;
use uc_ledger::transport::ConsoleTransport;
use uc_ledger::{CodeLedger, CommandInterpreter, JsonFileStore};

fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let filter = match args.log_filter() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| "uc_ledger=info".into()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = JsonFileStore::new(args.to_store_config());
    let ledger = CodeLedger::new(store);
    let mut interpreter = match CommandInterpreter::new(ledger, args.to_interpreter_config()) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut console = ConsoleTransport::new(stdin.lock(), BufWriter::new(io::stdout()));
    if let Err(e) = console.run(&mut interpreter) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
