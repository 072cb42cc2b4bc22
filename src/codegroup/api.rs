//! # Group Repository
//!
//! The repository is a **thin facade** over the command layer and the single
//! owner of remote record lifecycle. Every UI (the interactive session, the
//! one-shot CLI commands, tests) goes through it.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the command functions in `commands/*.rs`
//! - **Enforces** the `(code, file_name)` key rules through those commands
//! - **Returns structured types** (`CmdResult` with messages), never prints
//!
//! ## Generic Over RecordStore
//!
//! `GroupRepository<S: RecordStore>`:
//! - Production: `GroupRepository<Backend>`
//! - Testing: `GroupRepository<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::GroupFile;
use crate::session::Session;
use crate::store::RecordStore;
use std::path::Path;

pub struct GroupRepository<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> GroupRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Files of the group. Backend failures are reported inside the result
    /// (as an error message with an empty list), never as `Err`.
    pub fn list_files(&self, code: &str) -> commands::CmdResult {
        commands::list::run(&self.store, code)
    }

    pub fn save_file(
        &mut self,
        code: &str,
        file_name: &str,
        content: &str,
    ) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.store, code, file_name, content)
    }

    pub fn delete_file(&mut self, code: &str, file_name: &str) -> Result<commands::CmdResult> {
        commands::delete::file(&mut self.store, code, file_name)
    }

    pub fn delete_group(
        &mut self,
        code: &str,
        session: &mut Session,
    ) -> Result<commands::CmdResult> {
        commands::delete::group(&mut self.store, code, session)
    }

    /// Second half of list-then-fetch: re-reads the group from the backend.
    pub fn fetch_file(&self, code: &str, file_name: &str) -> Result<Option<GroupFile>> {
        commands::fetch::run(&self.store, code, file_name)
    }

    pub fn export_group(&self, code: &str, dest_dir: &Path) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, code, dest_dir)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodeGroupError;
    use crate::store::memory::InMemoryStore;
    use crate::store::StoreError;

    fn repo() -> GroupRepository<InMemoryStore> {
        GroupRepository::new(InMemoryStore::new())
    }

    #[test]
    fn save_twice_keeps_one_record_with_latest_content() {
        let mut repo = repo();
        repo.save_file("ABC123", "notes.txt", "hello").unwrap();
        repo.save_file("ABC123", "notes.txt", "world").unwrap();

        let listed = repo.list_files("ABC123");
        assert_eq!(listed.files, vec![GroupFile::new("notes.txt", "world")]);
    }

    #[test]
    fn delete_one_of_two_files() {
        let mut repo = repo();
        repo.save_file("ABC123", "a.txt", "1").unwrap();
        repo.save_file("ABC123", "b.txt", "2").unwrap();

        repo.delete_file("ABC123", "a.txt").unwrap();

        assert_eq!(
            repo.list_files("ABC123").files,
            vec![GroupFile::new("b.txt", "2")]
        );
    }

    #[test]
    fn list_after_group_delete_is_empty() {
        let mut repo = repo();
        let mut session = Session::new();
        repo.save_file("ABC", "a.txt", "1").unwrap();
        repo.save_file("ABC", "b.txt", "2").unwrap();

        repo.delete_group("ABC", &mut session).unwrap();
        assert!(repo.list_files("ABC").files.is_empty());
    }

    #[test]
    fn delete_missing_file_leaves_others() {
        let mut repo = repo();
        repo.save_file("ABC", "a.txt", "1").unwrap();
        repo.save_file("XYZ", "a.txt", "2").unwrap();

        let result = repo.delete_file("ABC", "nope.txt").unwrap();
        assert!(!result.messages.is_empty());
        assert_eq!(repo.store().len(), 2);
    }

    #[test]
    fn group_delete_clears_active_code_iff_equal() {
        let mut repo = repo();

        let mut session = Session::new();
        session.set_active("XYZ");
        repo.delete_group("ABC", &mut session).unwrap();
        assert_eq!(session.active(), Some("XYZ"));

        repo.delete_group("XYZ", &mut session).unwrap();
        assert_eq!(session.active(), None);
    }

    #[test]
    fn fetch_goes_back_to_the_backend() {
        let mut repo = repo();
        repo.save_file("ABC", "a.txt", "1").unwrap();
        let before = repo.store().calls();

        repo.list_files("ABC");
        repo.fetch_file("ABC", "a.txt").unwrap();

        assert_eq!(repo.store().calls(), before + 2);
    }

    #[test]
    fn save_surfaces_backend_errors() {
        let mut repo = repo();
        repo.store_mut()
            .set_failure(Some(StoreError::backend("JWT expired")));

        let err = repo.save_file("ABC", "a.txt", "1").unwrap_err();
        assert!(matches!(err, CodeGroupError::Store(StoreError::Backend { .. })));
        assert!(err.to_string().contains("JWT expired"));
    }
}
