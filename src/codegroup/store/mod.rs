//! # Storage Layer
//!
//! This module defines the contract codegroup requires from a record backend.
//! The [`RecordStore`] trait is deliberately small: a table of
//! `{code, file_name, content}` rows that can be queried by code, upserted on
//! the `(code, file_name)` conflict key, and deleted by code or by key.
//!
//! ## Implementations
//!
//! - [`rest::RestStore`]: Production implementation over a PostgREST-style
//!   HTTP table API.
//! - [`fs::FileStore`]: Single JSON file on local disk, selected with a
//!   `file://` backend URL.
//! - [`memory::InMemoryStore`]: For testing logic without I/O.
//!
//! [`Backend`] wraps the three so the binary can choose one at runtime.
//!
//! ## Error Shapes
//!
//! Stores report failures as a [`StoreError`]:
//! - `Backend`: the backend answered with an error object we understand, or
//!   the transport failed.
//! - `Unknown`: the backend answered with something we cannot interpret. The
//!   raw payload travels with the error so the caller can log it in full.

use crate::config::CodegroupConfig;
use crate::model::Record;
use thiserror::Error;

pub mod fs;
pub mod memory;
pub mod rest;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Unexpected backend response (see logs for details)")]
    Unknown { raw: String },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }

    pub fn unknown(raw: impl Into<String>) -> Self {
        StoreError::Unknown { raw: raw.into() }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Abstract interface for the remote record table.
///
/// Implementations must make every call atomic on its own. Nothing here
/// spans calls: two racing writers see last-write-wins.
pub trait RecordStore {
    /// All records with the given code, in no particular order.
    /// An unknown code is an empty result, not an error.
    fn query(&self, code: &str) -> StoreResult<Vec<Record>>;

    /// Insert the record, or replace the content of the existing record
    /// with the same `(code, file_name)`.
    fn upsert(&mut self, record: &Record) -> StoreResult<()>;

    /// Remove every record with the given code. No-op if there are none.
    fn delete_by_code(&mut self, code: &str) -> StoreResult<()>;

    /// Remove the record with the given key. No-op if it does not exist.
    fn delete_by_code_and_file(&mut self, code: &str, file_name: &str) -> StoreResult<()>;
}

/// Runtime-selected store used by the binary.
pub enum Backend {
    Rest(rest::RestStore),
    File(fs::FileStore),
}

impl Backend {
    /// Build the store described by `config`.
    ///
    /// An invalid configuration does not abort: the returned store fails
    /// every call with a `Backend` error carrying the configuration problem,
    /// and the problem itself is returned alongside so it can be reported
    /// once at startup.
    pub fn from_config(config: &CodegroupConfig) -> (Self, Option<crate::error::CodeGroupError>) {
        match config.validate() {
            Ok(()) => match config.file_store_dir() {
                Some(dir) => (Backend::File(fs::FileStore::new(dir)), None),
                None => (
                    Backend::Rest(rest::RestStore::new(&config.url, &config.key, &config.table)),
                    None,
                ),
            },
            Err(e) => (
                Backend::Rest(rest::RestStore::unconfigured(e.to_string())),
                Some(e),
            ),
        }
    }

    fn inner(&self) -> &dyn RecordStore {
        match self {
            Backend::Rest(s) => s,
            Backend::File(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn RecordStore {
        match self {
            Backend::Rest(s) => s,
            Backend::File(s) => s,
        }
    }
}

impl RecordStore for Backend {
    fn query(&self, code: &str) -> StoreResult<Vec<Record>> {
        self.inner().query(code)
    }

    fn upsert(&mut self, record: &Record) -> StoreResult<()> {
        self.inner_mut().upsert(record)
    }

    fn delete_by_code(&mut self, code: &str) -> StoreResult<()> {
        self.inner_mut().delete_by_code(code)
    }

    fn delete_by_code_and_file(&mut self, code: &str, file_name: &str) -> StoreResult<()> {
        self.inner_mut().delete_by_code_and_file(code, file_name)
    }
}
