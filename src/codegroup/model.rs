use serde::{Deserialize, Serialize};

/// One row of the backend table. `(code, file_name)` is the conflict key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub code: String,
    pub file_name: String,
    pub content: String,
}

impl Record {
    pub fn new(
        code: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn into_file(self) -> GroupFile {
        GroupFile {
            file_name: self.file_name,
            content: self.content,
        }
    }
}

/// A file as seen from inside a code group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFile {
    pub file_name: String,
    pub content: String,
}

impl GroupFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}
