//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `code`: Codes, denomination groups and code books
//! - `balance`: The running due balance
//! - `error`: Error types for the ledger

pub mod balance;
pub mod code;
pub mod error;

pub use balance::DueBalance;
pub use code::{Code, CodeBook, Denomination, DenominationGroup};
pub use error::LedgerError;
