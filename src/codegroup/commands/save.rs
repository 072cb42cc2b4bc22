use crate::commands::{normalize_code, require_non_empty, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{RecordStore, StoreError};

/// Creates or replaces `file_name` in the `code` group.
pub fn run<S: RecordStore>(
    store: &mut S,
    code: &str,
    file_name: &str,
    content: &str,
) -> Result<CmdResult> {
    let code = normalize_code(code)?;
    require_non_empty("File name", file_name)?;

    let record = Record::new(code, file_name, content);
    if let Err(e) = store.upsert(&record) {
        if let StoreError::Unknown { raw } = &e {
            tracing::error!(code, file_name, payload = %raw, "unrecognized backend response on save");
        }
        return Err(e.into());
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {} to code group {}",
        file_name, code
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::error::CodeGroupError;
    use crate::model::GroupFile;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn second_save_overwrites_first() {
        let mut store = InMemoryStore::new();
        run(&mut store, "ABC123", "notes.txt", "hello").unwrap();
        run(&mut store, "ABC123", "notes.txt", "world").unwrap();

        let listed = list::run(&store, "ABC123");
        assert_eq!(listed.files, vec![GroupFile::new("notes.txt", "world")]);
    }

    #[test]
    fn confirms_with_success_message() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, "ABC", "a.txt", "1").unwrap();
        assert_eq!(
            result.messages,
            vec![CmdMessage::success("Saved a.txt to code group ABC")]
        );
    }

    #[test]
    fn rejects_blank_key_parts_without_backend_call() {
        let mut store = InMemoryStore::new();

        assert!(matches!(
            run(&mut store, " ", "a.txt", "1"),
            Err(CodeGroupError::Invalid(_))
        ));
        assert!(matches!(
            run(&mut store, "ABC", "", "1"),
            Err(CodeGroupError::Invalid(_))
        ));
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn code_is_stored_trimmed() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, "  ABC \t", "a.txt", "1").unwrap();

        assert_eq!(
            store.query("ABC").unwrap(),
            vec![Record::new("ABC", "a.txt", "1")]
        );
        assert_eq!(
            result.messages,
            vec![CmdMessage::success("Saved a.txt to code group ABC")]
        );
    }

    #[test]
    fn empty_content_is_allowed() {
        let mut store = InMemoryStore::new();
        run(&mut store, "ABC", "empty.txt", "").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn distinguishes_known_and_unknown_backend_errors() {
        let mut store = InMemoryStore::new();

        store.set_failure(Some(StoreError::backend("duplicate key")));
        let known = run(&mut store, "ABC", "a.txt", "1").unwrap_err();
        assert!(matches!(
            &known,
            CodeGroupError::Store(StoreError::Backend { message }) if message == "duplicate key"
        ));
        assert!(!known.is_unknown());

        store.set_failure(Some(StoreError::unknown("???")));
        let unknown = run(&mut store, "ABC", "a.txt", "1").unwrap_err();
        assert!(unknown.is_unknown());
        assert!(unknown.to_string().contains("see logs"));
    }
}
