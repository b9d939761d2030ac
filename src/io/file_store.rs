//! File-backed ledger store
//!
//! Persists the inventory, used ledger and due balance as three JSON documents
//! in a data directory. Every save is a full-document overwrite.
//!
//! # Missing and corrupt documents
//!
//! - A missing document loads as its empty default
//! - A document that cannot be decoded is handled according to the
//!   [`CorruptionPolicy`]: `Reset` logs the problem and loads the empty
//!   default, `Fail` returns the error
//! - A document from a newer schema always fails, so it is never overwritten
//!   with an empty default

use crate::cli::CorruptionPolicy;
use crate::core::traits::{BookKind, LedgerStore, DUE_FILE_NAME};
use crate::io::json_format::{decode_codes, decode_due, encode_codes, encode_due};
use crate::types::{CodeBook, DueBalance, LedgerError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Locations of the three store documents and the corruption policy
#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    pub inventory_path: PathBuf,
    pub used_path: PathBuf,
    pub due_path: PathBuf,
    pub on_corrupt: CorruptionPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir(".", CorruptionPolicy::Reset)
    }
}

impl StoreConfig {
    /// Place the three documents under `dir` with their fixed file names
    pub fn in_dir(dir: impl AsRef<Path>, on_corrupt: CorruptionPolicy) -> Self {
        let dir = dir.as_ref();
        Self {
            inventory_path: dir.join(BookKind::Inventory.file_name()),
            used_path: dir.join(BookKind::Used.file_name()),
            due_path: dir.join(DUE_FILE_NAME),
            on_corrupt,
        }
    }

    fn book_path(&self, kind: BookKind) -> &Path {
        match kind {
            BookKind::Inventory => &self.inventory_path,
            BookKind::Used => &self.used_path,
        }
    }
}

/// Ledger store over JSON files
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config: StoreConfig,
}

impl JsonFileStore {
    /// Create a store for the given configuration
    ///
    /// Parent directories of the documents are created on demand when saving.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn load_with<T>(
        &self,
        path: &Path,
        decode: fn(&str, &str) -> Result<T, LedgerError>,
        empty: fn() -> T,
    ) -> Result<T, LedgerError> {
        let name = path.display().to_string();

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %name, "Document missing, using empty default");
                return Ok(empty());
            }
            Err(e) => return Err(LedgerError::persistence_read(&name, e.to_string())),
        };

        match decode(&name, &text) {
            Ok(value) => Ok(value),
            Err(e @ LedgerError::CorruptDocument { .. })
                if self.config.on_corrupt == CorruptionPolicy::Reset =>
            {
                error!(path = %name, error = %e, "Document is corrupted. Resetting.");
                Ok(empty())
            }
            Err(e) => Err(e),
        }
    }

    fn write(&self, path: &Path, contents: String) -> Result<(), LedgerError> {
        let name = path.display().to_string();

        let result = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
        .and_then(|()| fs::write(path, contents));

        result.map_err(|e| {
            error!(path = %name, error = %e, "Error saving document");
            LedgerError::persistence_write(&name, e.to_string())
        })
    }
}

impl LedgerStore for JsonFileStore {
    fn load_book(&self, kind: BookKind) -> Result<CodeBook, LedgerError> {
        self.load_with(self.config.book_path(kind), decode_codes, CodeBook::new)
    }

    fn save_book(&mut self, kind: BookKind, book: &CodeBook) -> Result<(), LedgerError> {
        let path = self.config.book_path(kind);
        let contents = encode_codes(&path.display().to_string(), book)?;
        self.write(path, contents)
    }

    fn load_due(&self) -> Result<DueBalance, LedgerError> {
        self.load_with(&self.config.due_path, decode_due, DueBalance::zero)
    }

    fn save_due(&mut self, due: &DueBalance) -> Result<(), LedgerError> {
        let path = &self.config.due_path;
        let contents = encode_due(&path.display().to_string(), due)?;
        self.write(path, contents)
    }
}
