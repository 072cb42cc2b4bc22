use crate::commands::{normalize_code, CmdMessage, CmdResult};
use crate::model::GroupFile;
use crate::store::{RecordStore, StoreError};

/// Lists the files of a code group, sorted by name.
///
/// Read failures do not abort the caller's flow: the error is logged and
/// reported as an error message, and the file list comes back empty.
pub fn run<S: RecordStore>(store: &S, code: &str) -> CmdResult {
    let mut result = CmdResult::default();
    let code = match normalize_code(code) {
        Ok(code) => code,
        Err(e) => {
            result.add_message(CmdMessage::error(e.to_string()));
            return result;
        }
    };

    match store.query(code) {
        Ok(records) => {
            let mut files: Vec<GroupFile> = records.into_iter().map(|r| r.into_file()).collect();
            files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
            if files.is_empty() {
                result.add_message(CmdMessage::info(format!("Code group {} has no files.", code)));
            }
            result.with_files(files)
        }
        Err(e) => {
            log_store_error(&e, code);
            result.add_message(CmdMessage::error(format!(
                "Could not list files for {}: {}",
                code, e
            )));
            result
        }
    }
}

pub(crate) fn log_store_error(e: &StoreError, code: &str) {
    match e {
        StoreError::Backend { message } => {
            tracing::warn!(code, %message, "backend query failed");
        }
        StoreError::Unknown { raw } => {
            tracing::error!(code, payload = %raw, "unrecognized backend response");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_files_sorted_by_name() {
        let store = StoreFixture::new()
            .with_file("ABC", "b.txt", "2")
            .with_file("ABC", "a.txt", "1")
            .with_file("XYZ", "c.txt", "3")
            .store;

        let result = run(&store, "ABC");
        assert_eq!(
            result.files,
            vec![GroupFile::new("a.txt", "1"), GroupFile::new("b.txt", "2")]
        );
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_group_is_not_an_error() {
        let store = StoreFixture::new().store;
        let result = run(&store, "ABC");

        assert!(result.files.is_empty());
        assert!(!result.has_errors());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn code_is_trimmed_before_lookup() {
        let store = StoreFixture::new().with_file("ABC", "a.txt", "1").store;

        let result = run(&store, " ABC ");
        assert_eq!(result.files, vec![GroupFile::new("a.txt", "1")]);
    }

    #[test]
    fn blank_code_is_rejected_without_backend_call() {
        let store = StoreFixture::new().store;

        let result = run(&store, "   ");
        assert!(result.has_errors());
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn backend_failure_reports_and_returns_empty() {
        let store = StoreFixture::new()
            .with_file("ABC", "a.txt", "1")
            .failing_with(StoreError::backend("connection refused"))
            .store;

        let result = run(&store, "ABC");
        assert!(result.files.is_empty());
        assert!(result.has_errors());
        assert!(result.messages[0].content.contains("connection refused"));
    }

    #[test]
    fn unknown_failure_points_to_logs() {
        let store = StoreFixture::new()
            .failing_with(StoreError::unknown("<html>oops</html>"))
            .store;

        let result = run(&store, "ABC");
        assert!(result.has_errors());
        assert!(result.messages[0].content.contains("see logs"));
        assert!(!result.messages[0].content.contains("oops"));
    }
}
