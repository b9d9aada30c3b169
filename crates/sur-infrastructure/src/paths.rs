//! Unified path management for sur files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/sur/               # Config directory
//! ├── config.toml              # Preferences
//! ├── secret.json              # API keys
//! └── logs/                    # Daily rolling log files
//!     └── sur.log.YYYY-MM-DD
//!
//! ~/.local/share/sur/          # Data directory
//! └── odia_sur_history.json    # One file per key-value slot
//! ```
//!
//! With a base directory override every path lives under that directory
//! instead (`<base>/config`, `<base>/data`).

use std::path::{Path, PathBuf};

use sur_core::error::{Result, SurError};

const APP_DIR: &str = "sur";

/// Resolves the sur config, data and log locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl SurPaths {
    /// Resolves paths for the current platform, or under `base_path` if given.
    ///
    /// # Errors
    ///
    /// Returns `SurError::Config` if no base path is given and the platform
    /// directories cannot be determined.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        match base_path {
            Some(base) => Ok(Self {
                config_dir: base.join("config"),
                data_dir: base.join("data"),
            }),
            None => {
                let config_root = dirs::config_dir()
                    .ok_or_else(|| SurError::config("Cannot find config directory"))?;
                let data_root = dirs::data_dir()
                    .ok_or_else(|| SurError::config("Cannot find data directory"))?;
                Ok(Self {
                    config_dir: config_root.join(APP_DIR),
                    data_dir: data_root.join(APP_DIR),
                })
            }
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to `secret.json`.
    ///
    /// # Security Note
    ///
    /// Ensure this file has permissions 600 to prevent unauthorized access.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_override() {
        let paths = SurPaths::new(Some(Path::new("/tmp/sur-test"))).unwrap();
        assert_eq!(paths.config_dir(), Path::new("/tmp/sur-test/config"));
        assert_eq!(paths.data_dir(), Path::new("/tmp/sur-test/data"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/sur-test/config/config.toml")
        );
        assert_eq!(
            paths.secret_file(),
            PathBuf::from("/tmp/sur-test/config/secret.json")
        );
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/sur-test/config/logs"));
    }

    #[test]
    fn test_platform_dirs_end_with_app_name() {
        // Platform directories may be unavailable in minimal CI containers.
        if let Ok(paths) = SurPaths::new(None) {
            assert!(paths.config_dir().ends_with(APP_DIR));
            assert!(paths.data_dir().ends_with(APP_DIR));
        }
    }
}
