//! UC Code Ledger Library
//! # Overview
//!
//! This library keeps an inventory of redeemable UC codes grouped by
//! denomination, dispenses them on request and tracks the running amount owed
//! for everything dispensed. It is operated through short prefixed text
//! commands such as `Jbaki 60 2`.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Code, DenominationGroup, CodeBook, DueBalance)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Upload, redeem, pricing and due operations
//!   - [`core::session`] - Interactive upload sessions per caller
//!   - [`core::traits`] - The storage abstraction
//! - [`io`] - Versioned JSON documents and the file and memory stores
//! - [`command`] - Command parsing, code extraction, reply formatting and the interpreter
//! - [`transport`] - Reply delivery and the console loop
//!
//! # Commands
//!
//! - **start** / **help**: Greeting and command list
//! - **up**: Add codes to a denomination (raw tokens or pasted `<amount>uc` text)
//! - **load**: Start an interactive upload for a denomination
//! - **baki**: Dispense codes and add their value to the dues
//! - **price** / **rate**: Set and list denomination prices
//! - **stock**: Unredeemed codes per denomination and their worth
//! - **check** / **clear**: Show or reset the used codes and dues
//!
//! # Stores
//!
//! Three documents make up the persisted state:
//! - `codes.json`: Inventory of unredeemed codes
//! - `used.json`: Codes that have been dispensed
//! - `total_due.json`: Running amount owed

// Module declarations
pub mod cli;
pub mod command;
pub mod core;
pub mod io;
pub mod transport;
pub mod types;

pub use command::{CommandInterpreter, InterpreterConfig, Reply};
pub use core::{CodeLedger, LedgerStore};
pub use io::{JsonFileStore, MemoryStore, StoreConfig};
pub use types::{Code, CodeBook, Denomination, DenominationGroup, DueBalance, LedgerError};
