//! Media storage: the upload seam and a filesystem blob implementation.

use palaver_core::{PalaverError, PalaverResult};
use async_trait::async_trait;
use base64::Engine;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// Object store abstraction: upload a payload, get back a stable URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Stores the payload and returns its canonical public URL.
    async fn upload(&self, data: &[u8]) -> PalaverResult<String>;

    /// Fetches a previously stored payload by blob ID.
    async fn fetch(&self, id: Uuid) -> PalaverResult<Vec<u8>>;
}

/// Filesystem-backed media store.
///
/// Blobs are written under `base_path` with UUID names and served back at
/// `{public_base_url}/media/{uuid}`. UUID-only naming means no caller input
/// ever reaches the filesystem path.
#[derive(Debug, Clone)]
pub struct BlobMediaStore {
    base_path: PathBuf,
    max_size: usize,
    public_base_url: String,
}

impl BlobMediaStore {
    /// Creates the store, ensuring the blob directory exists.
    pub async fn new(
        base_path: PathBuf,
        max_size: usize,
        public_base_url: impl Into<String>,
    ) -> PalaverResult<Self> {
        fs::create_dir_all(&base_path).await.map_err(|e| {
            PalaverError::Media(format!(
                "Failed to create media directory '{}': {}",
                base_path.display(),
                e
            ))
        })?;

        info!(path = %base_path.display(), "Media store initialized");

        Ok(Self {
            base_path,
            max_size,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn blob_path(&self, id: Uuid) -> PathBuf {
        self.base_path.join(id.to_string())
    }
}

#[async_trait]
impl MediaStore for BlobMediaStore {
    async fn upload(&self, data: &[u8]) -> PalaverResult<String> {
        if data.is_empty() {
            return Err(PalaverError::Media("Empty media payload".to_string()));
        }
        if data.len() > self.max_size {
            return Err(PalaverError::Media(format!(
                "Media payload of {} bytes exceeds limit of {} bytes",
                data.len(),
                self.max_size
            )));
        }

        let id = Uuid::new_v4();
        let path = self.blob_path(id);

        fs::write(&path, data)
            .await
            .map_err(|e| PalaverError::Media(format!("Failed to write blob {}: {}", id, e)))?;

        debug!(id = %id, size = data.len(), "Stored media blob");
        Ok(format!("{}/media/{}", self.public_base_url, id))
    }

    async fn fetch(&self, id: Uuid) -> PalaverResult<Vec<u8>> {
        let path = self.blob_path(id);

        if !path.exists() {
            return Err(PalaverError::not_found("Media", id));
        }

        fs::read(&path)
            .await
            .map_err(|e| PalaverError::Media(format!("Failed to read blob {}: {}", id, e)))
    }
}

/// Decodes an image payload as sent by chat clients: either a bare base64
/// string or a `data:<mime>;base64,<payload>` URI.
pub fn decode_image_payload(payload: &str) -> PalaverResult<Vec<u8>> {
    let encoded = match payload.split_once(";base64,") {
        Some((_, data)) => data,
        None => payload,
    };

    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| PalaverError::validation(format!("Invalid image payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_fetch_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobMediaStore::new(dir.path().to_path_buf(), 1024, "http://localhost:3000/")
            .await
            .unwrap();

        let url = store.upload(b"image-bytes").await.unwrap();
        assert!(url.starts_with("http://localhost:3000/media/"));

        let id: Uuid = url.rsplit('/').next().unwrap().parse().unwrap();
        let data = store.fetch(id).await.unwrap();
        assert_eq!(data, b"image-bytes");
    }

    #[tokio::test]
    async fn test_upload_rejects_oversize_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobMediaStore::new(dir.path().to_path_buf(), 4, "http://localhost:3000")
            .await
            .unwrap();

        let err = store.upload(b"too large").await.unwrap_err();
        assert!(matches!(err, PalaverError::Media(_)));
    }

    #[tokio::test]
    async fn test_fetch_unknown_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobMediaStore::new(dir.path().to_path_buf(), 1024, "http://localhost:3000")
            .await
            .unwrap();

        let err = store.fetch(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, PalaverError::NotFound { .. }));
    }

    #[test]
    fn test_decode_data_uri() {
        let payload = "data:image/png;base64,aGVsbG8=";
        assert_eq!(decode_image_payload(payload).unwrap(), b"hello");
    }

    #[test]
    fn test_decode_bare_base64() {
        assert_eq!(decode_image_payload("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image_payload("!!not-base64!!").is_err());
    }
}
