//! Object storage for uploaded admission documents.
//!
//! Files land at name-derived paths under fixed prefixes (signatures/,
//! photos/, certificates/) and are referenced by download URLs served
//! from the static files route.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::{Config, FILES_ROUTE};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// An uploaded file: the client-supplied name plus raw bytes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Object storage trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store a file under `prefix/` and return its download URL.
    ///
    /// A second upload with the same name under the same prefix
    /// overwrites the first, matching the name-derived path scheme.
    async fn store(&self, prefix: &str, file: &FileUpload) -> AppResult<String>;
}

/// Filesystem-backed object storage.
pub struct FsStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsStore {
    /// Create a store rooted at the configured storage directory.
    pub fn new(config: &Config) -> Self {
        Self {
            root: PathBuf::from(&config.storage_root),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Directory that files are written to (for static file serving).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Strip any path components from a client-supplied file name.
    fn sanitize(file_name: &str) -> AppResult<String> {
        let name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty() && n != "." && n != "..")
            .ok_or_else(|| AppError::validation("Invalid file name"))?;
        Ok(name)
    }
}

#[async_trait]
impl ObjectStorage for FsStore {
    async fn store(&self, prefix: &str, file: &FileUpload) -> AppResult<String> {
        let name = Self::sanitize(&file.file_name)?;

        let dir = self.root.join(prefix);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&name), &file.bytes).await?;

        tracing::debug!(prefix, file = %name, "stored uploaded file");

        Ok(format!(
            "{}{}/{}/{}",
            self.public_base_url, FILES_ROUTE, prefix, name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(
            FsStore::sanitize("../../etc/passwd").unwrap(),
            "passwd".to_string()
        );
        assert_eq!(
            FsStore::sanitize("photo.png").unwrap(),
            "photo.png".to_string()
        );
    }

    #[test]
    fn test_sanitize_rejects_empty_names() {
        assert!(FsStore::sanitize("").is_err());
        assert!(FsStore::sanitize("..").is_err());
        assert!(FsStore::sanitize("dir/").is_err());
    }

    #[tokio::test]
    async fn test_store_writes_file_and_builds_url() {
        let tmp = std::env::temp_dir().join(format!("fs-store-test-{}", uuid::Uuid::new_v4()));
        let store = FsStore {
            root: tmp.clone(),
            public_base_url: "http://localhost:3000".to_string(),
        };

        let file = FileUpload {
            file_name: "signature.png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let url = store.store("signatures", &file).await.unwrap();

        assert_eq!(url, "http://localhost:3000/files/signatures/signature.png");
        let written = tokio::fs::read(tmp.join("signatures/signature.png"))
            .await
            .unwrap();
        assert_eq!(written, vec![1, 2, 3]);

        tokio::fs::remove_dir_all(tmp).await.unwrap();
    }
}
