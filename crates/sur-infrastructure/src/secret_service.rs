//! Secret service implementation.
//!
//! Reads API credentials from `secret.json` and applies environment overrides.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use sur_core::config::{DEFAULT_MODEL_NAME, GeminiConfig, SecretConfig, SecretService};
use sur_core::error::{Result, SurError};

use crate::paths::SurPaths;

/// File-backed [`SecretService`].
///
/// The parsed file is cached; environment overrides are applied on every
/// load so a changed variable takes effect without a restart.
#[derive(Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    /// Cached contents of the secret file.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    pub fn new(paths: &SurPaths) -> Self {
        Self {
            path: paths.secret_file(),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// # Security Note
    ///
    /// The template is created with permissions 600 on Unix.
    pub fn ensure_secret_file(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: Some(DEFAULT_MODEL_NAME.to_string()),
            }),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!(path = %self.path.display(), "Created secret file template");
        Ok(())
    }

    /// Reads the file, without environment overrides.
    fn load_file(&self) -> Result<SecretConfig> {
        if let Ok(cache) = self.secrets.read() {
            if let Some(cached) = cache.as_ref() {
                return Ok(cached.clone());
            }
        }

        self.ensure_secret_file()?;
        let content = std::fs::read_to_string(&self.path)?;
        // Never echo parser detail: it can quote the file contents.
        let loaded: SecretConfig = serde_json::from_str(&content).map_err(|_| {
            SurError::config(format!("Failed to parse {}", self.path.display()))
        })?;

        if let Ok(mut cache) = self.secrets.write() {
            *cache = Some(loaded.clone());
        }
        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        let from_file = self.load_file()?;
        Ok(from_file.with_env_overrides(|name| std::env::var(name).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> SecretServiceImpl {
        SecretServiceImpl::new(&SurPaths::new(Some(temp_dir.path())).unwrap())
    }

    #[tokio::test]
    async fn test_missing_file_creates_template() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        assert!(!service.path().exists());

        let file = service.load_file().unwrap();

        assert!(service.path().exists());
        assert_eq!(file.gemini.unwrap().model_name.as_deref(), Some(DEFAULT_MODEL_NAME));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(service.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_reads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        std::fs::create_dir_all(service.path().parent().unwrap()).unwrap();
        std::fs::write(service.path(), r#"{"gemini": {"api_key": "k-123"}}"#).unwrap();

        let file = service.load_file().unwrap();

        assert_eq!(file.gemini_api_key(), Some("k-123"));
    }

    #[test]
    fn test_parse_error_hides_contents() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        std::fs::create_dir_all(service.path().parent().unwrap()).unwrap();
        std::fs::write(service.path(), r#"{"gemini": {"api_key": "k-secret"#).unwrap();

        let err = service.load_file().unwrap_err();

        assert!(!err.to_string().contains("k-secret"));
    }
}
