//! One invocation of the check: measure, compare against the stored size,
//! record the new size.

use crate::check::{evaluate, CheckSpec, Evaluation, Measurement};
use crate::error::CheckError;
use crate::store::SizeStore;
use crate::types::ByteCount;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Measure `target`, returning its canonical absolute path and size in bytes.
pub fn measure(target: &Path) -> Result<(PathBuf, ByteCount), CheckError> {
    let metadata = std::fs::metadata(target).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CheckError::TargetMissing(target.to_path_buf()),
        _ => CheckError::TargetIo {
            path: target.to_path_buf(),
            source: e,
        },
    })?;
    if metadata.is_dir() {
        return Err(CheckError::TargetIo {
            path: target.to_path_buf(),
            source: std::io::Error::new(ErrorKind::Other, "is a directory"),
        });
    }

    let canonical = dunce::canonicalize(target).map_err(|e| CheckError::TargetIo {
        path: target.to_path_buf(),
        source: e,
    })?;
    Ok((canonical, metadata.len()))
}

/// Size check over an injected store.
pub struct SizeCheck<S: SizeStore> {
    store: S,
}

impl<S: SizeStore> SizeCheck<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Evaluate `spec` for `target` and record the new size.
    ///
    /// The new size is recorded whatever the verdict. Nothing is recorded when
    /// measuring or reading the store fails, and a failed write is returned as
    /// an error rather than a verdict.
    pub fn run(&self, target: &Path, spec: &CheckSpec) -> Result<Evaluation, CheckError> {
        let (key, new_size) = measure(target)?;

        let measurement = match self.store.get(&key)? {
            Some(old_size) => Measurement::new(old_size, new_size),
            None => {
                debug!(path = %key.display(), "No recorded size, treating as unchanged");
                Measurement::first_run(new_size)
            }
        };

        let evaluation = evaluate(spec, measurement);
        self.store.put(&key, new_size)?;

        info!(
            path = %key.display(),
            old_size_bytes = measurement.old_size_bytes,
            new_size_bytes = measurement.new_size_bytes,
            verdict = ?evaluation.verdict,
            "Size check complete"
        );
        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{ByteUnit, Threshold, ThresholdUnit, Verdict};
    use crate::error::StorageError;
    use crate::store::MemorySizeStore;
    use std::fs;
    use tempfile::TempDir;

    fn resize(path: &Path, len: u64) {
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .unwrap();
        file.set_len(len).unwrap();
    }

    #[test]
    fn test_first_run_passes_and_records() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("app.log");
        resize(&target, 100);

        let check = SizeCheck::new(MemorySizeStore::new());
        let evaluation = check.run(&target, &CheckSpec::change()).unwrap();
        assert_eq!(evaluation.verdict, Verdict::Pass);
        assert_eq!(evaluation.measurement, Measurement::new(100, 100));

        let key = dunce::canonicalize(&target).unwrap();
        assert_eq!(check.store().get(&key).unwrap(), Some(100));
    }

    #[test]
    fn test_baseline_moves_every_run() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("app.log");
        let check = SizeCheck::new(MemorySizeStore::new());
        let spec = CheckSpec::any_growth();

        let mut verdicts = Vec::new();
        for size in [100, 150, 120] {
            resize(&target, size);
            verdicts.push(check.run(&target, &spec).unwrap().verdict);
        }
        assert_eq!(verdicts, vec![Verdict::Pass, Verdict::Grew, Verdict::Pass]);
    }

    #[test]
    fn test_old_size_is_previous_run() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("data.bin");
        let check = SizeCheck::new(MemorySizeStore::new());
        let spec = CheckSpec::grow(ThresholdUnit::Bytes(ByteUnit::Megabyte), Threshold::whole(1));

        resize(&target, 1_048_576);
        check.run(&target, &spec).unwrap();
        resize(&target, 2_097_152);
        let evaluation = check.run(&target, &spec).unwrap();
        assert_eq!(evaluation.measurement.old_size_bytes, 1_048_576);
        assert_eq!(evaluation.verdict, Verdict::Grew);
    }

    #[test]
    fn test_missing_target_records_nothing() {
        let temp = TempDir::new().unwrap();
        let check = SizeCheck::new(MemorySizeStore::new());
        let err = check
            .run(&temp.path().join("nope"), &CheckSpec::change())
            .unwrap_err();
        assert!(matches!(err, CheckError::TargetMissing(_)));
        assert_eq!(err.exit_code(), 6);
        assert!(check.store().is_empty());
    }

    #[test]
    fn test_directory_target_rejected() {
        let temp = TempDir::new().unwrap();
        let err = measure(temp.path()).unwrap_err();
        assert!(matches!(err, CheckError::TargetIo { .. }));
    }

    struct FailingWrites(MemorySizeStore);

    impl SizeStore for FailingWrites {
        fn get(&self, path: &Path) -> Result<Option<ByteCount>, StorageError> {
            self.0.get(path)
        }

        fn put(&self, path: &Path, _size_bytes: ByteCount) -> Result<(), StorageError> {
            Err(StorageError::UnrepresentablePath(path.to_path_buf()))
        }
    }

    #[test]
    fn test_failed_write_is_an_error() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("app.log");
        resize(&target, 10);

        let check = SizeCheck::new(FailingWrites(MemorySizeStore::new()));
        let err = check.run(&target, &CheckSpec::change()).unwrap_err();
        assert!(matches!(err, CheckError::Storage(_)));
        assert_eq!(err.exit_code(), 6);
    }
}
