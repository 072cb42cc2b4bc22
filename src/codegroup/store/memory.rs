use super::{RecordStore, StoreError, StoreResult};
use crate::model::Record;
use std::cell::Cell;
use std::collections::BTreeMap;

/// In-memory record table for testing and development.
/// Does NOT persist data.
///
/// Keyed on `(code, file_name)`, so the upsert conflict rule falls out of
/// `BTreeMap::insert`. Besides the data it keeps a count of backend calls and
/// an optional injected failure, both for tests that need to observe what the
/// layers above do with the backend.
#[derive(Default)]
pub struct InMemoryStore {
    rows: BTreeMap<(String, String), String>,
    calls: Cell<usize>,
    failure: Option<StoreError>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error`, or succeed again with `None`.
    pub fn set_failure(&mut self, error: Option<StoreError>) {
        self.failure = error;
    }

    /// Number of trait calls made so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn enter(&self) -> StoreResult<()> {
        self.calls.set(self.calls.get() + 1);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl RecordStore for InMemoryStore {
    fn query(&self, code: &str) -> StoreResult<Vec<Record>> {
        self.enter()?;
        Ok(self
            .rows
            .iter()
            .filter(|((c, _), _)| c == code)
            .map(|((c, f), content)| Record::new(c.clone(), f.clone(), content.clone()))
            .collect())
    }

    fn upsert(&mut self, record: &Record) -> StoreResult<()> {
        self.enter()?;
        self.rows.insert(
            (record.code.clone(), record.file_name.clone()),
            record.content.clone(),
        );
        Ok(())
    }

    fn delete_by_code(&mut self, code: &str) -> StoreResult<()> {
        self.enter()?;
        self.rows.retain(|(c, _), _| c != code);
        Ok(())
    }

    fn delete_by_code_and_file(&mut self, code: &str, file_name: &str) -> StoreResult<()> {
        self.enter()?;
        self.rows.remove(&(code.to_string(), file_name.to_string()));
        Ok(())
    }
}

// --- Test Fixtures ---
