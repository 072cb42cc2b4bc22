use super::{RecordStore, StoreError, StoreResult};
use crate::model::Record;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RECORDS_FILENAME: &str = "records.json";
const LOCK_FILENAME: &str = "records.lock";

/// Record table kept in a single `records.json` inside `root`.
///
/// Each mutating call holds an exclusive lock on `records.lock` from load to
/// save and writes through a temp file + rename; queries hold a shared lock.
/// Several processes can share one directory without losing writes.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Opens the lock file and blocks until the lock is granted. The lock is
    /// released when the returned handle is dropped.
    fn lock(&self, exclusive: bool) -> StoreResult<File> {
        fs::create_dir_all(&self.root).map_err(|e| io_error(&self.root, e))?;
        let path = self.root.join(LOCK_FILENAME);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| io_error(&path, e))?;
        let locked = if exclusive {
            file.lock_exclusive()
        } else {
            file.lock_shared()
        };
        locked.map_err(|e| io_error(&path, e))?;
        Ok(file)
    }

    fn records_path(&self) -> PathBuf {
        self.root.join(RECORDS_FILENAME)
    }

    fn load(&self) -> StoreResult<Vec<Record>> {
        let path = self.records_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            StoreError::unknown(format!(
                "{} is not a record table ({}): {}",
                path.display(),
                e,
                content
            ))
        })
    }

    fn save(&self, records: &[Record]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::backend(format!("could not encode records: {}", e)))?;

        let tmp_file = self.root.join(format!(".records-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(|e| io_error(&tmp_file, e))?;
        if let Err(e) = fs::rename(&tmp_file, self.records_path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(io_error(&tmp_file, e));
        }
        Ok(())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::backend(format!("{}: {}", path.display(), e))
}

impl RecordStore for FileStore {
    fn query(&self, code: &str) -> StoreResult<Vec<Record>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let _lock = self.lock(false)?;
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| r.code == code)
            .collect())
    }

    fn upsert(&mut self, record: &Record) -> StoreResult<()> {
        let _lock = self.lock(true)?;
        let mut records = self.load()?;
        match records
            .iter_mut()
            .find(|r| r.code == record.code && r.file_name == record.file_name)
        {
            Some(existing) => existing.content = record.content.clone(),
            None => records.push(record.clone()),
        }
        self.save(&records)
    }

    fn delete_by_code(&mut self, code: &str) -> StoreResult<()> {
        let _lock = self.lock(true)?;
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.code != code);
        if records.len() == before {
            return Ok(());
        }
        self.save(&records)
    }

    fn delete_by_code_and_file(&mut self, code: &str, file_name: &str) -> StoreResult<()> {
        let _lock = self.lock(true)?;
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| !(r.code == code && r.file_name == file_name));
        if records.len() == before {
            return Ok(());
        }
        self.save(&records)
    }
}
