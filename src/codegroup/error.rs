use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeGroupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No active code group. Open a code group first.")]
    NoActiveGroup,

    #[error("Could not access {}: {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CodeGroupError {
    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodeGroupError::LocalIo {
            path: path.into(),
            source,
        }
    }

    /// True when the backend answered with a payload of unrecognized shape.
    pub fn is_unknown(&self) -> bool {
        matches!(self, CodeGroupError::Store(StoreError::Unknown { .. }))
    }
}

pub type Result<T> = std::result::Result<T, CodeGroupError>;
