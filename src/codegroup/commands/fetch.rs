use crate::commands::normalize_code;
use crate::error::Result;
use crate::model::GroupFile;
use crate::store::RecordStore;

/// Fetches a single file by name.
///
/// Always goes back to the backend, even right after a listing, so the
/// content reflects the latest write by any client. `None` means the file
/// is not (or no longer) part of the group.
pub fn run<S: RecordStore>(store: &S, code: &str, file_name: &str) -> Result<Option<GroupFile>> {
    let code = normalize_code(code)?;

    let records = store.query(code)?;
    Ok(records
        .into_iter()
        .find(|r| r.file_name == file_name)
        .map(|r| r.into_file()))
}
