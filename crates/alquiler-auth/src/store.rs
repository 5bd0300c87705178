//! Token persistence between CLI invocations.

use std::path::{Path, PathBuf};

use alquiler_core::error::AppError;

/// Stores the bearer token in a plain file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved token. A missing or blank file means no token.
    pub async fn load(&self) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::internal(format!(
                "Failed to read token file '{}': {e}",
                self.path.display()
            ))),
        }
    }

    /// Writes `token`, creating parent directories as needed.
    pub async fn save(&self, token: &str) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::internal(format!(
                    "Failed to create directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        tokio::fs::write(&self.path, token.trim()).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to write token file '{}': {e}",
                self.path.display()
            ))
        })?;

        tracing::debug!(path = %self.path.display(), "Saved bearer token");
        Ok(())
    }

    /// Removes the saved token. Succeeds when nothing was saved.
    pub async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::internal(format!(
                "Failed to remove token file '{}': {e}",
                self.path.display()
            ))),
        }
    }
}
