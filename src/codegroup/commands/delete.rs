use crate::commands::{normalize_code, require_non_empty, CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::RecordStore;

/// Removes one file from a group. Reports the outcome whether or not the
/// file existed.
pub fn file<S: RecordStore>(store: &mut S, code: &str, file_name: &str) -> Result<CmdResult> {
    let code = normalize_code(code)?;
    require_non_empty("File name", file_name)?;

    store.delete_by_code_and_file(code, file_name)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {} from code group {}",
        file_name, code
    )));
    Ok(result)
}

/// Removes every file of a group and drops it from the session if it was
/// the active one.
pub fn group<S: RecordStore>(store: &mut S, code: &str, session: &mut Session) -> Result<CmdResult> {
    let code = normalize_code(code)?;

    store.delete_by_code(code)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deleted code group {}", code)));
    if session.clear_if_matches(code) {
        result.add_message(CmdMessage::info(format!(
            "{} is no longer the active code group",
            code
        )));
    }
    Ok(result)
}
