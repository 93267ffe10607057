//! Token store backends.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::TokenStore;
use crate::error::{ApiError, ApiResult};

/// Process-local token storage shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> ApiResult<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|error| ApiError::TokenStorage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save_token(&self, token: &str) -> ApiResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|error| ApiError::TokenStorage(error.to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> ApiResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|error| ApiError::TokenStorage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Stores the token as plain text in a single file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load_token(&self) -> ApiResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(ApiError::TokenStorage(format!(
                "Failed to read token at {}: {}",
                self.path.display(),
                error
            ))),
        }
    }

    fn save_token(&self, token: &str) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                ApiError::TokenStorage(format!(
                    "Failed to create token directory {}: {}",
                    parent.display(),
                    error
                ))
            })?;
        }
        std::fs::write(&self.path, token).map_err(|error| {
            ApiError::TokenStorage(format!(
                "Failed to write token at {}: {}",
                self.path.display(),
                error
            ))
        })
    }

    fn clear_token(&self) -> ApiResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ApiError::TokenStorage(format!(
                "Failed to remove token at {}: {}",
                self.path.display(),
                error
            ))),
        }
    }
}
