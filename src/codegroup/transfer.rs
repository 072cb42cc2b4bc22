//! Moving file content between the local disk and a code group.
//!
//! Reads load the whole file as text and hand ownership to the caller.
//! Writes go through a temp file in the target directory followed by a rename,
//! so a materialized file is either complete or absent.

use crate::error::{CodeGroupError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A local file loaded for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub file_name: String,
    pub content: String,
}

pub fn read_local(path: &Path) -> Result<LocalFile> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CodeGroupError::Invalid(format!("{} does not name a file", path.display()))
        })?;
    let content = fs::read_to_string(path).map_err(|e| CodeGroupError::local_io(path, e))?;
    Ok(LocalFile { file_name, content })
}

/// Reduces a remote file name to something safe to create inside a directory:
/// its last path component, never `.` or `..`.
pub fn safe_file_name(name: &str) -> Result<String> {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if last.is_empty() || last == "." || last == ".." {
        return Err(CodeGroupError::Invalid(format!(
            "'{}' cannot be used as a local file name",
            name
        )));
    }
    Ok(last.to_string())
}

/// Writes `content` to `dir/file_name`, creating or replacing it. Returns the
/// path written.
pub fn write_local(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let name = safe_file_name(file_name)?;
    fs::create_dir_all(dir).map_err(|e| CodeGroupError::local_io(dir, e))?;

    let target = dir.join(&name);
    let tmp = dir.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
    fs::write(&tmp, content).map_err(|e| CodeGroupError::local_io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, &target) {
        let _ = fs::remove_file(&tmp);
        return Err(CodeGroupError::local_io(&target, e));
    }
    Ok(target)
}

/// The workspace directory when there is one, the fallback otherwise.
pub fn resolve_target_dir(workspace: Option<&Path>, fallback: &Path) -> PathBuf {
    match workspace {
        Some(dir) if dir.is_dir() => dir.to_path_buf(),
        _ => fallback.to_path_buf(),
    }
}
