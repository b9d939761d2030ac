//! JSON format handling for persisted store documents
//!
//! This module centralizes the on-disk schema, providing:
//! - Record structures for serialization
//! - Conversion between records and domain types
//! - Schema version checks
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Schema
//!
//! ```text
//! codes.json / used.json
//!   { "version": 1,
//!     "codes": [ { "amount": 60, "price": 0.9,
//!                  "codes": [ { "code": "...", "redeemed": false } ] } ] }
//!
//! total_due.json
//!   { "version": 1, "total_due": 4.5 }
//! ```
//!
//! Documents without a `version` field are read as version 1. Money is
//! written as a JSON number with every decimal digit kept, so any stored
//! value reads back unchanged.

use crate::types::{Code, CodeBook, Denomination, DenominationGroup, DueBalance, LedgerError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Highest schema version this build reads and the version it writes
pub const SCHEMA_VERSION: u32 = 1;

fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// Code-book document (inventory or used ledger)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CodesDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub codes: Vec<GroupRecord>,
}

/// One denomination group as stored
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GroupRecord {
    pub amount: Denomination,
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub codes: Vec<CodeRecord>,
}

/// One code as stored
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CodeRecord {
    pub code: String,
    #[serde(default)]
    pub redeemed: bool,
}

/// Due-balance document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DueDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub total_due: Decimal,
}

#[derive(Deserialize)]
struct VersionHeader {
    #[serde(default = "default_version")]
    version: u32,
}

impl From<CodesDocument> for CodeBook {
    fn from(document: CodesDocument) -> Self {
        let groups = document
            .codes
            .into_iter()
            .map(|group| {
                let codes = group
                    .codes
                    .into_iter()
                    .map(|record| Code::restore(record.code, record.redeemed))
                    .collect();
                DenominationGroup::with_codes(group.amount, group.price, codes)
            })
            .collect();
        CodeBook::from_groups(groups)
    }
}

impl From<&CodeBook> for CodesDocument {
    fn from(book: &CodeBook) -> Self {
        let codes = book
            .groups()
            .map(|group| GroupRecord {
                amount: group.amount,
                price: group.price,
                codes: group
                    .codes()
                    .iter()
                    .map(|code| CodeRecord {
                        code: code.value().to_string(),
                        redeemed: code.is_redeemed(),
                    })
                    .collect(),
            })
            .collect();

        CodesDocument {
            version: SCHEMA_VERSION,
            codes,
        }
    }
}

/// Decode a code-book document
///
/// # Arguments
///
/// * `name` - Document name used in error messages
/// * `text` - Raw document contents
///
/// # Errors
///
/// Returns [`LedgerError::UnsupportedSchemaVersion`] for documents written by
/// a newer schema and [`LedgerError::CorruptDocument`] for anything that is
/// not a valid document.
pub fn decode_codes(name: &str, text: &str) -> Result<CodeBook, LedgerError> {
    check_version(name, text)?;
    let document: CodesDocument = serde_json::from_str(text)
        .map_err(|e| LedgerError::corrupt_document(name, e.to_string()))?;
    Ok(CodeBook::from(document))
}

/// Encode a code book as a pretty-printed document
pub fn encode_codes(name: &str, book: &CodeBook) -> Result<String, LedgerError> {
    to_pretty_json(name, &CodesDocument::from(book))
}

/// Decode a due-balance document
pub fn decode_due(name: &str, text: &str) -> Result<DueBalance, LedgerError> {
    check_version(name, text)?;
    let document: DueDocument = serde_json::from_str(text)
        .map_err(|e| LedgerError::corrupt_document(name, e.to_string()))?;
    Ok(DueBalance::new(document.total_due))
}

/// Encode a due balance as a pretty-printed document
pub fn encode_due(name: &str, due: &DueBalance) -> Result<String, LedgerError> {
    to_pretty_json(
        name,
        &DueDocument {
            version: SCHEMA_VERSION,
            total_due: due.total_due,
        },
    )
}

fn check_version(name: &str, text: &str) -> Result<(), LedgerError> {
    let header: VersionHeader = serde_json::from_str(text)
        .map_err(|e| LedgerError::corrupt_document(name, e.to_string()))?;
    if header.version > SCHEMA_VERSION {
        return Err(LedgerError::unsupported_schema_version(
            name,
            header.version,
            SCHEMA_VERSION,
        ));
    }
    Ok(())
}

// Four-space indentation, matching files written by earlier tooling
fn to_pretty_json<T: Serialize>(name: &str, value: &T) -> Result<String, LedgerError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| LedgerError::persistence_write(name, e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| LedgerError::persistence_write(name, e.to_string()))
}
