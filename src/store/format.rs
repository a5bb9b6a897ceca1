//! State file format
//!
//! One record per line, `<absolute-path>=<size-in-bytes>`. The size is the text
//! after the last `=`, so a path may itself contain `=`. Paths containing line
//! breaks cannot be represented and are rejected before they reach the file.
//! The file is handled as bytes: a line that is not UTF-8 is carried through
//! untouched instead of poisoning every other record.

use super::SizeRecord;
use crate::error::StorageError;
use crate::types::ByteCount;
use std::path::{Path, PathBuf};

/// A line of the state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Record(SizeRecord),
    /// Line that did not parse; kept byte for byte so a rewrite never drops it.
    Opaque(Vec<u8>),
}

/// Parsed state file, entries kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateDocument {
    entries: Vec<Entry>,
}

impl StateDocument {
    pub fn parse(content: &[u8]) -> Self {
        let entries = content
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(|line| match parse_line(line) {
                Some(record) => Entry::Record(record),
                None => {
                    tracing::warn!(
                        line = %String::from_utf8_lossy(line),
                        "Unparseable state file line preserved as-is"
                    );
                    Entry::Opaque(line.to_vec())
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &SizeRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Record(record) => Some(record),
            Entry::Opaque(_) => None,
        })
    }

    /// First recorded size for `path`.
    pub fn get(&self, path: &Path) -> Option<ByteCount> {
        self.records()
            .find(|record| record.path == path)
            .map(|record| record.size_bytes)
    }

    /// Replace the first record for `path` in place, dropping any later
    /// duplicates, or append a new record at the end.
    pub fn upsert(&mut self, path: &Path, size_bytes: ByteCount) -> Result<(), StorageError> {
        encode_key(path)?;

        let mut seen = false;
        self.entries.retain_mut(|entry| match entry {
            Entry::Record(record) if record.path == path => {
                if seen {
                    return false;
                }
                seen = true;
                record.size_bytes = size_bytes;
                true
            }
            _ => true,
        });

        if !seen {
            self.entries.push(Entry::Record(SizeRecord {
                path: path.to_path_buf(),
                size_bytes,
            }));
        }
        Ok(())
    }

    pub fn render(&self) -> Result<Vec<u8>, StorageError> {
        let mut out = Vec::new();
        for entry in &self.entries {
            match entry {
                Entry::Record(record) => {
                    out.extend_from_slice(encode_key(&record.path)?.as_bytes());
                    out.push(b'=');
                    out.extend_from_slice(record.size_bytes.to_string().as_bytes());
                }
                Entry::Opaque(line) => out.extend_from_slice(line),
            }
            out.push(b'\n');
        }
        Ok(out)
    }
}

fn parse_line(line: &[u8]) -> Option<SizeRecord> {
    let line = std::str::from_utf8(line).ok()?;
    let (key, value) = line.rsplit_once('=')?;
    if key.is_empty() {
        return None;
    }
    let size_bytes = value.trim().parse::<ByteCount>().ok()?;
    Some(SizeRecord {
        path: PathBuf::from(key),
        size_bytes,
    })
}

fn encode_key(path: &Path) -> Result<&str, StorageError> {
    match path.to_str() {
        Some(key) if !key.is_empty() && !key.contains(['\n', '\r']) => Ok(key),
        _ => Err(StorageError::UnrepresentablePath(path.to_path_buf())),
    }
}
