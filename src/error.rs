//! Error types
//!
//! Storage failures and check errors. Check *failures* (the file changed, grew,
//! ...) are not errors; they are verdicts, see [`crate::check::Verdict`].

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for argument and syntax errors.
pub const EXIT_SYNTAX_ERROR: i32 = 5;

/// Exit code for every other runtime error.
pub const EXIT_OTHER_ERROR: i32 = 6;

/// Errors raised by a size store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("failed to lock state file {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path cannot be stored in the state file: {0:?}")]
    UnrepresentablePath(PathBuf),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that abort a check before a verdict is reached.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    Syntax(String),

    #[error("file does not exist: {0}")]
    TargetMissing(PathBuf),

    #[error("cannot read size of {path}: {source}")]
    TargetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CheckError {
    /// Process exit code reported to the supervisor.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::Syntax(_) => EXIT_SYNTAX_ERROR,
            _ => EXIT_OTHER_ERROR,
        }
    }
}

impl From<config::ConfigError> for CheckError {
    fn from(err: config::ConfigError) -> Self {
        CheckError::Config(err.to_string())
    }
}
