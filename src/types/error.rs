//! Error types for the UC code ledger
//!
//! This module defines all error types that can occur while handling ledger
//! operations. Errors are designed to be descriptive enough to be shown
//! directly to the operator in a chat reply.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Malformed amount, count or price arguments
//! - **Stock Errors**: Redeeming from a missing or depleted denomination
//! - **Persistence Errors**: Unreadable, corrupt or unwritable store documents
//! - **Arithmetic Errors**: Overflow while computing values or the due balance

use super::code::Denomination;
use thiserror::Error;

/// Main error type for the ledger
///
/// Every variant carries enough context to build a user-facing message.
/// Duplicate codes are not errors: they are reported in the upload outcome
/// and never abort a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// A numeric command argument could not be parsed or is out of range
    ///
    /// No ledger mutation is attempted.
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidArgument {
        /// Name of the argument (amount, count, price)
        field: String,
        /// The raw value as received
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Not enough unredeemed codes for the requested denomination
    ///
    /// Raised before any mutation, so the stores are untouched.
    #[error("{amount} UC stock out: requested {requested}, available {available}")]
    InsufficientStock {
        /// Denomination requested
        amount: Denomination,
        /// Number of codes requested
        requested: usize,
        /// Number of unredeemed codes on hand (0 when the group is missing)
        available: usize,
    },

    /// A code token was empty after trimming
    #[error("Code must not be empty")]
    EmptyCode,

    /// Arithmetic overflow while computing a value
    #[error("Arithmetic overflow in {operation} for {amount} UC")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Denomination involved
        amount: Denomination,
    },

    /// A store document exists but could not be decoded
    #[error("Corrupt document {path}: {message}")]
    CorruptDocument {
        /// Path (or logical name) of the document
        path: String,
        /// Decoder message
        message: String,
    },

    /// A store document was written by a newer schema
    #[error("Unsupported schema version {found} in {path} (supported: {supported})")]
    UnsupportedSchemaVersion {
        /// Path (or logical name) of the document
        path: String,
        /// Version found in the document
        found: u32,
        /// Highest version this build understands
        supported: u32,
    },

    /// A store document could not be read
    #[error("Failed to read {path}: {message}")]
    PersistenceRead {
        /// Path (or logical name) of the document
        path: String,
        /// Description of the I/O error
        message: String,
    },

    /// A store document could not be written
    ///
    /// The operation that produced the new state is reported as failed.
    #[error("Failed to save {path}: {message}")]
    PersistenceWrite {
        /// Path (or logical name) of the document
        path: String,
        /// Description of the I/O error
        message: String,
    },
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(field: &str, value: &str, reason: &str) -> Self {
        LedgerError::InvalidArgument {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an InsufficientStock error
    pub fn insufficient_stock(amount: Denomination, requested: usize, available: usize) -> Self {
        LedgerError::InsufficientStock {
            amount,
            requested,
            available,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, amount: Denomination) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            amount,
        }
    }

    /// Create a CorruptDocument error
    pub fn corrupt_document(path: &str, message: impl Into<String>) -> Self {
        LedgerError::CorruptDocument {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Create an UnsupportedSchemaVersion error
    pub fn unsupported_schema_version(path: &str, found: u32, supported: u32) -> Self {
        LedgerError::UnsupportedSchemaVersion {
            path: path.to_string(),
            found,
            supported,
        }
    }

    /// Create a PersistenceRead error
    pub fn persistence_read(path: &str, message: impl Into<String>) -> Self {
        LedgerError::PersistenceRead {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Create a PersistenceWrite error
    pub fn persistence_write(path: &str, message: impl Into<String>) -> Self {
        LedgerError::PersistenceWrite {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than the stores
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidArgument { .. }
                | LedgerError::InsufficientStock { .. }
                | LedgerError::EmptyCode
        )
    }
}
