use crate::commands::{normalize_code, CmdMessage, CmdResult};
use crate::error::{CodeGroupError, Result};
use crate::model::GroupFile;
use crate::store::RecordStore;
use crate::transfer::safe_file_name;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

/// Writes every file of the group into `{code}-{timestamp}.tar.gz` under `dest_dir`.
pub fn run<S: RecordStore>(store: &S, code: &str, dest_dir: &Path) -> Result<CmdResult> {
    let code = normalize_code(code)?;

    let mut files: Vec<GroupFile> = store
        .query(code)?
        .into_iter()
        .map(|r| r.into_file())
        .collect();

    if files.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info(format!(
            "Code group {} has no files to export.",
            code
        )));
        return Ok(res);
    }
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    fs::create_dir_all(dest_dir).map_err(|e| CodeGroupError::local_io(dest_dir, e))?;
    let safe_code = sanitize(code);
    let filename = format!("{}-{}.tar.gz", safe_code, Utc::now().format("%Y%m%d-%H%M%S"));
    let path = dest_dir.join(&filename);

    // Built under a temp name so a failed export leaves no partial archive
    let tmp_path = dest_dir.join(format!(".{}.{}.tmp", filename, Uuid::new_v4()));
    let file = File::create(&tmp_path).map_err(|e| CodeGroupError::local_io(&tmp_path, e))?;
    if let Err(e) = write_archive(file, &safe_code, &files) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CodeGroupError::local_io(&path, e));
    }

    let mut result = CmdResult::default().with_paths(vec![path.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Exported {} file(s) from {} to {}",
        files.len(),
        code,
        path.display()
    )));
    Ok(result)
}

fn write_archive<W: Write>(writer: W, dir_name: &str, files: &[GroupFile]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for file in files {
        let entry_name = format!("{}/{}", dir_name, safe_file_name(&file.file_name)?);

        let mut header = tar::Header::new_gnu();
        header.set_size(file.content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, file.content.as_bytes())?;
    }

    tar.into_inner()?.finish()?;
    Ok(())
}

fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
