//! In-memory ledger store
//!
//! Keeps the three documents in memory. Used as a test double and for
//! benchmarks; writes to selected documents can be made to fail so
//! persistence failures can be exercised without touching disk.

use crate::core::traits::{BookKind, LedgerStore, DUE_FILE_NAME};
use crate::types::{CodeBook, DueBalance, LedgerError};
use std::collections::HashSet;

/// Ledger store backed by plain values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryStore {
    inventory: CodeBook,
    used: CodeBook,
    due: DueBalance,
    failing_writes: HashSet<String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of a book
    pub fn book(&self, kind: BookKind) -> CodeBook {
        match kind {
            BookKind::Inventory => self.inventory.clone(),
            BookKind::Used => self.used.clone(),
        }
    }

    /// Current due balance
    pub fn due(&self) -> DueBalance {
        self.due
    }

    /// Make every later save of the named document fail
    ///
    /// Names are the document file names (`codes.json`, `used.json`,
    /// `total_due.json`).
    pub fn fail_writes_to(&mut self, name: &str) {
        self.failing_writes.insert(name.to_string());
    }

    fn check_write(&self, name: &str) -> Result<(), LedgerError> {
        if self.failing_writes.contains(name) {
            return Err(LedgerError::persistence_write(name, "simulated write failure"));
        }
        Ok(())
    }
}

impl LedgerStore for MemoryStore {
    fn load_book(&self, kind: BookKind) -> Result<CodeBook, LedgerError> {
        Ok(self.book(kind))
    }

    fn save_book(&mut self, kind: BookKind, book: &CodeBook) -> Result<(), LedgerError> {
        self.check_write(kind.file_name())?;
        match kind {
            BookKind::Inventory => self.inventory = book.clone(),
            BookKind::Used => self.used = book.clone(),
        }
        Ok(())
    }

    fn load_due(&self) -> Result<DueBalance, LedgerError> {
        Ok(self.due)
    }

    fn save_due(&mut self, due: &DueBalance) -> Result<(), LedgerError> {
        self.check_write(DUE_FILE_NAME)?;
        self.due = *due;
        Ok(())
    }
}
