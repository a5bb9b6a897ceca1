//! In-memory size store, used by tests and by callers embedding the check.

use super::SizeStore;
use crate::error::StorageError;
use crate::types::ByteCount;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct MemorySizeStore {
    records: RwLock<HashMap<PathBuf, ByteCount>>,
}

impl MemorySizeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl SizeStore for MemorySizeStore {
    fn get(&self, path: &Path) -> Result<Option<ByteCount>, StorageError> {
        Ok(self.records.read().get(path).copied())
    }

    fn put(&self, path: &Path, size_bytes: ByteCount) -> Result<(), StorageError> {
        self.records.write().insert(path.to_path_buf(), size_bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let store = MemorySizeStore::new();
        assert_eq!(store.get(Path::new("/a")).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemorySizeStore::new();
        store.put(Path::new("/a"), 1).unwrap();
        store.put(Path::new("/a"), 2).unwrap();
        store.put(Path::new("/b"), 3).unwrap();
        assert_eq!(store.get(Path::new("/a")).unwrap(), Some(2));
        assert_eq!(store.len(), 2);
    }
}
