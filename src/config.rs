//! Configuration
//!
//! Layered configuration: built-in defaults, the global config file (or an
//! explicit `--config` file), then `SIZECHECK__*` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;
pub mod storage;
pub mod xdg;

pub use facade::ConfigLoader;
pub use storage::{ResolvedStateFile, StorageConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SizecheckConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
