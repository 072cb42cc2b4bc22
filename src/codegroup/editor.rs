use crate::error::{CodeGroupError, Result};
use std::path::Path;
use std::process::Command;

/// Picks the viewer command from `$EDITOR`, then `$VISUAL`.
///
/// Takes the variable lookup as a function so callers (and tests) decide where
/// the values come from.
pub fn editor_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|name| lookup(name))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// The user's editor from the process environment, if one is set.
pub fn get_editor() -> Option<String> {
    editor_from(|name| std::env::var(name).ok())
}

/// Opens a file in `editor` and waits for it to close.
///
/// The editor value may carry arguments (`code --wait`), which are split on
/// whitespace.
pub fn open_in_editor(editor: &str, file_path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| CodeGroupError::Editor("empty editor command".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(file_path)
        .status()
        .map_err(|e| CodeGroupError::Editor(format!("Failed to launch '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(CodeGroupError::Editor(format!(
            "'{}' exited with non-zero status",
            editor
        )));
    }
    Ok(())
}
