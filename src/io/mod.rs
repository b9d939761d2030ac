//! I/O module
//!
//! Handles persistence of the ledger documents.
//!
//! # Components
//!
//! - `json_format` - Persisted JSON schema (records, conversion, version checks)
//! - `file_store` - JSON-file implementation of `LedgerStore`
//! - `memory_store` - In-memory implementation of `LedgerStore`

pub mod file_store;
pub mod json_format;
pub mod memory_store;

pub use file_store::{JsonFileStore, StoreConfig};
pub use json_format::{decode_codes, decode_due, encode_codes, encode_due, SCHEMA_VERSION};
pub use memory_store::MemoryStore;
