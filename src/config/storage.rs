//! StorageConfig and state file resolution.

use crate::config::xdg;
use crate::error::CheckError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// State file path; None means the platform default
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

/// State file location after applying overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStateFile {
    pub path: PathBuf,
    /// Only the default location gets its directory created on demand.
    pub is_default: bool,
}

impl StorageConfig {
    /// Precedence: CLI override, configured path, platform default.
    pub fn resolve_state_file(
        &self,
        cli_override: Option<&Path>,
    ) -> Result<ResolvedStateFile, CheckError> {
        let explicit = cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.state_file.clone())
            .filter(|p| !p.as_os_str().is_empty());

        match explicit {
            Some(path) => Ok(ResolvedStateFile {
                path,
                is_default: false,
            }),
            None => Ok(ResolvedStateFile {
                path: xdg::default_state_file()?,
                is_default: true,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override_wins() {
        let config = StorageConfig {
            state_file: Some(PathBuf::from("/etc/configured")),
        };
        let resolved = config
            .resolve_state_file(Some(Path::new("/tmp/cli")))
            .unwrap();
        assert_eq!(resolved.path, PathBuf::from("/tmp/cli"));
        assert!(!resolved.is_default);
    }

    #[test]
    fn test_configured_path_used_without_override() {
        let config = StorageConfig {
            state_file: Some(PathBuf::from("/etc/configured")),
        };
        let resolved = config.resolve_state_file(None).unwrap();
        assert_eq!(resolved.path, PathBuf::from("/etc/configured"));
        assert!(!resolved.is_default);
    }

    #[test]
    fn test_default_path() {
        let resolved = StorageConfig::default().resolve_state_file(None).unwrap();
        assert!(resolved.is_default);
        assert!(resolved.path.ends_with("filesizes"));
    }
}
