//! Core business logic module
//!
//! This module contains the core ledger components:
//! - `traits` - Storage abstraction shared by file and in-memory stores
//! - `ledger` - Inventory, redemption, pricing and due-balance operations
//! - `session` - Interactive upload sessions keyed by caller

pub mod ledger;
pub mod session;
pub mod traits;

pub use ledger::{
    CodeLedger, PriceEntry, PriceUpdate, Redemption, Summary, SummaryLine, UploadOutcome,
};
pub use session::{SessionMode, SessionRegistry, UploadSession, DEFAULT_SESSION_TIMEOUT};
pub use traits::{BookKind, LedgerStore, DUE_FILE_NAME};
