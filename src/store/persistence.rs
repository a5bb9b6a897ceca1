//! File-backed size store
//!
//! Writers serialize on an exclusive advisory lock held on `<state>.lock`, then
//! rewrite the whole state file through a temporary file in the same directory
//! that is renamed into place. Readers take no lock: the rename is atomic,
//! so they see either the previous or the next version, never a partial one.

use super::format::StateDocument;
use super::SizeStore;
use crate::error::StorageError;
use crate::types::ByteCount;
use fs4::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct FileSizeStore {
    path: PathBuf,
    create_directory: bool,
}

impl FileSizeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_directory: false,
        }
    }

    /// Treat a missing state directory as an empty store and create it on the
    /// first write instead of failing.
    pub fn creating_directory(mut self) -> Self {
        self.create_directory = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry of the state file. A missing file is an empty store as
    /// long as its directory exists (or may be created).
    pub fn load(&self) -> Result<StateDocument, StorageError> {
        match fs::read(&self.path) {
            Ok(content) => Ok(StateDocument::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let dir = self.directory();
                if self.create_directory || dir.is_dir() {
                    Ok(StateDocument::default())
                } else {
                    Err(StorageError::MissingDirectory(dir.to_path_buf()))
                }
            }
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn acquire_lock(&self) -> Result<File, StorageError> {
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StorageError::Lock {
                path: lock_path.clone(),
                source: e,
            })?;
        file.lock_exclusive().map_err(|e| StorageError::Lock {
            path: lock_path,
            source: e,
        })?;
        Ok(file)
    }

    fn ensure_directory(&self) -> Result<(), StorageError> {
        let dir = self.directory();
        if dir.is_dir() {
            return Ok(());
        }
        if !self.create_directory {
            return Err(StorageError::MissingDirectory(dir.to_path_buf()));
        }
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        tracing::debug!(directory = %dir.display(), "Created state directory");
        Ok(())
    }

    fn write_atomic(&self, content: &[u8]) -> Result<(), StorageError> {
        let dir = self.directory();
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
        tmp.write_all(content)
            .map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StorageError::io(tmp.path(), e))?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(tmp.path(), metadata.permissions())
                .map_err(|e| StorageError::io(tmp.path(), e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;
        Ok(())
    }
}

impl SizeStore for FileSizeStore {
    fn get(&self, path: &Path) -> Result<Option<ByteCount>, StorageError> {
        Ok(self.load()?.get(path))
    }

    fn put(&self, path: &Path, size_bytes: ByteCount) -> Result<(), StorageError> {
        self.ensure_directory()?;

        let _lock = self.acquire_lock()?;
        // Re-read under the lock so records written by other invocations survive.
        let mut document = self.load()?;
        document.upsert(path, size_bytes)?;
        self.write_atomic(&document.render()?)?;

        tracing::debug!(
            state_file = %self.path.display(),
            path = %path.display(),
            size_bytes,
            "Recorded file size"
        );
        Ok(())
    }
}
