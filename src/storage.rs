//! Durable storage for the selected routine name.
//!
//! The stored record is a single line: a routine name or [`NO_AUTON_TEXT`].
//!
//! [`NO_AUTON_TEXT`]: crate::model::NO_AUTON_TEXT

use crate::error::StorageError;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Read/write-string capability backing the selection.
pub trait SelectionStore: Send + Sync {
    /// First line of the stored record, or `None` when nothing (or a blank line) was saved.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored record with `line`.
    fn write(&self, line: &str) -> Result<(), StorageError>;
}

/// File name used when no explicit path is configured.
pub const STATE_FILE_NAME: &str = "LastSelectedAuton.txt";

/// Default state file under the platform's local data directory.
pub fn default_state_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auton-selector")
        .join(STATE_FILE_NAME)
}

/// Stores the selection in a text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionStore for FileStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let mut line = String::new();
        let n = io::BufReader::new(file)
            .read_line(&mut line)
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }
        Ok(non_blank(strip_line_ending(&line)))
    }

    fn write(&self, line: &str) -> Result<(), StorageError> {
        let err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(err)?;
            }
        }
        std::fs::write(&self.path, format!("{line}\n")).map_err(err)
    }
}

/// In-process store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    record: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                record: Some(record.into()),
                writes: 0,
            }),
        }
    }

    pub fn record(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|g| g.record.clone())
    }

    pub fn write_count(&self) -> usize {
        self.inner.lock().map(|g| g.writes).unwrap_or(0)
    }
}

impl SelectionStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard
            .record
            .as_deref()
            .and_then(|r| r.lines().next())
            .and_then(non_blank))
    }

    fn write(&self, line: &str) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.record = Some(line.to_string());
        guard.writes += 1;
        Ok(())
    }
}

fn non_blank(line: &str) -> Option<String> {
    (!line.is_empty()).then(|| line.to_string())
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let store = FileStore::new(dir.path().join("absent.txt"));
        assert!(store.read().expect("read").is_none());
    }

    #[test]
    fn write_then_read_same_file() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let store = FileStore::new(dir.path().join("nested").join(STATE_FILE_NAME));
        store.write("BlueRight").expect("write");
        assert_eq!(store.read().expect("read").as_deref(), Some("BlueRight"));

        let raw = std::fs::read_to_string(store.path()).expect("raw read");
        assert_eq!(raw, "BlueRight\n");
    }

    #[test]
    fn only_first_line_is_read() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let path = dir.path().join(STATE_FILE_NAME);
        std::fs::write(&path, "RedLeft\r\nleftover\n").expect("seed");
        let store = FileStore::new(&path);
        assert_eq!(store.read().expect("read").as_deref(), Some("RedLeft"));
    }

    #[test]
    fn empty_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let path = dir.path().join(STATE_FILE_NAME);
        std::fs::write(&path, "").expect("seed");
        assert!(FileStore::new(&path).read().expect("read").is_none());
    }

    #[test]
    fn blank_first_line_reads_as_none() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let path = dir.path().join(STATE_FILE_NAME);
        std::fs::write(&path, "\r\nBlueLeft\n").expect("seed");
        assert!(FileStore::new(&path).read().expect("read").is_none());

        assert!(MemoryStore::with_record("\n").read().expect("read").is_none());
        assert!(MemoryStore::with_record("").read().expect("read").is_none());
    }

    #[test]
    fn write_into_directory_path_fails() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let store = FileStore::new(dir.path());
        let err = store.write("BlueLeft").unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[test]
    fn memory_store_counts_writes() {
        let store = MemoryStore::with_record("BlueLeft\nignored");
        assert_eq!(store.read().expect("read").as_deref(), Some("BlueLeft"));
        store.write("RedLeft").expect("write");
        store.write("RedLeft").expect("write");
        assert_eq!(store.record().as_deref(), Some("RedLeft"));
        assert_eq!(store.write_count(), 2);
    }
}
