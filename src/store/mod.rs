//! Size Store
//!
//! Durable mapping from absolute file path to the size observed at the end of
//! the previous run. Business logic only sees the [`SizeStore`] trait; the file
//! backed implementation lives in [`persistence`].

pub mod format;
pub mod memory;
pub mod persistence;

use crate::error::StorageError;
use crate::types::ByteCount;
use std::path::{Path, PathBuf};

pub use memory::MemorySizeStore;
pub use persistence::FileSizeStore;

/// SizeRecord: last observed size for one monitored path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRecord {
    pub path: PathBuf,
    pub size_bytes: ByteCount,
}

/// Size store interface
///
/// `get` returns `Ok(None)` for a path that was never recorded, including when
/// the backing store does not exist yet. `put` inserts or overwrites the record
/// for one path without disturbing any other record.
pub trait SizeStore {
    fn get(&self, path: &Path) -> Result<Option<ByteCount>, StorageError>;
    fn put(&self, path: &Path, size_bytes: ByteCount) -> Result<(), StorageError>;
}

impl<S: SizeStore + ?Sized> SizeStore for &S {
    fn get(&self, path: &Path) -> Result<Option<ByteCount>, StorageError> {
        (**self).get(path)
    }

    fn put(&self, path: &Path, size_bytes: ByteCount) -> Result<(), StorageError> {
        (**self).put(path, size_bytes)
    }
}
