// ABOUTME: Storage backend for uploaded thesis PDFs
// ABOUTME: A trait seam plus the local-directory implementation served under /uploads

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// URL prefix under which locally stored files are served
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug, Error)]
pub enum PdfStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refusing to touch file outside the upload directory: {0}")]
    OutsideStore(String),
}

/// Where uploaded PDFs live. `store` returns the public URL recorded on the
/// thesis; `remove` takes that same URL back.
#[async_trait]
pub trait PdfStore: Send + Sync {
    async fn store(&self, data: &[u8]) -> Result<String, PdfStoreError>;

    async fn remove(&self, url: &str) -> Result<(), PdfStoreError>;
}

/// Files written into one directory, named `thesis-<id>.pdf`
#[derive(Debug, Clone)]
pub struct LocalPdfStore {
    root: PathBuf,
}

impl LocalPdfStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if it is missing
    pub async fn ensure_root(&self) -> Result<(), PdfStoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Resolve a public URL to a file inside the root, rejecting anything
    /// that is not a bare file name
    fn path_for_url(&self, url: &str) -> Result<PathBuf, PdfStoreError> {
        let name = url
            .strip_prefix(UPLOADS_ROUTE)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| PdfStoreError::OutsideStore(url.to_string()))?;

        let is_plain_name = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        if !is_plain_name {
            return Err(PdfStoreError::OutsideStore(url.to_string()));
        }

        Ok(self.root.join(name))
    }
}

#[async_trait]
impl PdfStore for LocalPdfStore {
    async fn store(&self, data: &[u8]) -> Result<String, PdfStoreError> {
        self.ensure_root().await?;

        let file_name = format!("thesis-{}.pdf", nanoid::nanoid!());
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, data).await?;

        info!("Stored PDF {} ({} bytes)", file_name, data.len());
        Ok(format!("{}/{}", UPLOADS_ROUTE, file_name))
    }

    async fn remove(&self, url: &str) -> Result<(), PdfStoreError> {
        let path = self.path_for_url(url)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed PDF {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_and_remove() {
        let dir = TempDir::new().unwrap();
        let store = LocalPdfStore::new(dir.path().join("uploads"));

        let url = store.store(b"%PDF-1.4 test").await.unwrap();
        assert!(url.starts_with("/uploads/thesis-"));
        assert!(url.ends_with(".pdf"));

        let path = store.path_for_url(&url).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 test");

        store.remove(&url).await.unwrap();
        assert!(!path.exists());

        // Removing twice is fine
        store.remove(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_rejects_paths_outside_root() {
        let dir = TempDir::new().unwrap();
        let store = LocalPdfStore::new(dir.path());

        for url in ["/uploads/../secret.pdf", "/etc/passwd", "/uploads/", "https://cdn.example.com/a.pdf"] {
            assert!(matches!(
                store.remove(url).await,
                Err(PdfStoreError::OutsideStore(_))
            ));
        }
    }
}
