//! Core traits for ledger persistence
//!
//! This module defines the storage abstraction the ledger is built on, so
//! the file-backed store and the in-memory test double can be used
//! interchangeably.

use crate::types::{CodeBook, DueBalance, LedgerError};

/// File name of the due-balance document
pub const DUE_FILE_NAME: &str = "total_due.json";

/// The two code-book documents a store holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookKind {
    /// Codes that are still available
    Inventory,
    /// Codes that have been redeemed and not yet cleared
    Used,
}

impl BookKind {
    /// File name of the document backing this book
    pub fn file_name(self) -> &'static str {
        match self {
            BookKind::Inventory => "codes.json",
            BookKind::Used => "used.json",
        }
    }
}

/// Trait for loading and saving the three ledger documents
///
/// Every ledger operation loads what it needs, mutates it in memory and
/// saves the result with a full-document overwrite. Implementations decide
/// what a missing or corrupt document loads as.
pub trait LedgerStore {
    /// Load a code book; a missing document loads as an empty book
    fn load_book(&self, kind: BookKind) -> Result<CodeBook, LedgerError>;

    /// Replace a code book
    fn save_book(&mut self, kind: BookKind, book: &CodeBook) -> Result<(), LedgerError>;

    /// Load the running due balance; a missing document loads as zero
    fn load_due(&self) -> Result<DueBalance, LedgerError>;

    /// Replace the running due balance
    fn save_due(&mut self, due: &DueBalance) -> Result<(), LedgerError>;
}
