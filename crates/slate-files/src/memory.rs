use std::collections::HashMap;
use std::sync::RwLock;

use slate_types::FileRef;
use tracing::debug;

use crate::error::{BlobError, BlobResult};
use crate::traits::BlobStore;

fn validate_path(path: &str) -> BlobResult<()> {
    if path.is_empty() || path.split('/').any(str::is_empty) {
        return Err(BlobError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// In-memory, `HashMap`-based blob store for tests and embedding.
///
/// URLs are synthesized as `mem://{path}?tok={hash}` where the token is a
/// short BLAKE3 digest of the content, standing in for a real backend's
/// signed download URLs.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    /// Create a new empty blob store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|b| b.len() as u64)
            .sum()
    }

    /// Raw bytes for a locator, if stored.
    pub fn bytes(&self, file: &FileRef) -> Option<Vec<u8>> {
        self.blobs
            .read()
            .expect("lock poisoned")
            .get(file.as_str())
            .cloned()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put(&self, path: &str, bytes: &[u8]) -> BlobResult<FileRef> {
        validate_path(path)?;
        let file = FileRef::new(path).map_err(|_| BlobError::InvalidPath {
            path: path.to_string(),
        })?;
        let mut blobs = self.blobs.write().expect("lock poisoned");
        blobs.insert(path.to_string(), bytes.to_vec());
        debug!(path, len = bytes.len(), "blob stored");
        Ok(file)
    }

    fn url(&self, file: &FileRef) -> BlobResult<String> {
        let blobs = self.blobs.read().expect("lock poisoned");
        let bytes = blobs.get(file.as_str()).ok_or_else(|| BlobError::NotFound {
            locator: file.to_string(),
        })?;
        let token = hex::encode(&blake3::hash(bytes).as_bytes()[..8]);
        Ok(format!("mem://{}?tok={token}", file.as_str()))
    }

    fn delete(&self, file: &FileRef) -> BlobResult<bool> {
        let mut blobs = self.blobs.write().expect("lock poisoned");
        let existed = blobs.remove(file.as_str()).is_some();
        debug!(locator = %file, existed, "blob deleted");
        Ok(existed)
    }

    fn exists(&self, file: &FileRef) -> BlobResult<bool> {
        Ok(self
            .blobs
            .read()
            .expect("lock poisoned")
            .contains_key(file.as_str()))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Put / exists / bytes
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_read_back() {
        let store = InMemoryBlobStore::new();
        let file = store.put("assignments/u1/hw.pdf", b"pdf bytes").unwrap();
        assert_eq!(file.as_str(), "assignments/u1/hw.pdf");
        assert!(store.exists(&file).unwrap());
        assert_eq!(store.bytes(&file).unwrap(), b"pdf bytes");
    }

    #[test]
    fn put_replaces_existing() {
        let store = InMemoryBlobStore::new();
        let file = store.put("a/b.txt", b"one").unwrap();
        store.put("a/b.txt", b"two").unwrap();
        assert_eq!(store.bytes(&file).unwrap(), b"two");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_rejects_empty_path() {
        let store = InMemoryBlobStore::new();
        assert!(matches!(
            store.put("", b"x"),
            Err(BlobError::InvalidPath { .. })
        ));
        assert!(matches!(
            store.put("a//b", b"x"),
            Err(BlobError::InvalidPath { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // URLs
    // -----------------------------------------------------------------------

    #[test]
    fn url_embeds_path_and_content_token() {
        let store = InMemoryBlobStore::new();
        let file = store.put("answers/a1/notes.pdf", b"notes").unwrap();
        let url = store.url(&file).unwrap();
        assert!(url.starts_with("mem://answers/a1/notes.pdf?tok="));
    }

    #[test]
    fn url_for_missing_blob_fails() {
        let store = InMemoryBlobStore::new();
        let file = FileRef::new("never/stored").unwrap();
        assert!(matches!(
            store.url(&file),
            Err(BlobError::NotFound { .. })
        ));
    }

    #[test]
    fn url_token_tracks_content() {
        let store = InMemoryBlobStore::new();
        let file = store.put("a/b", b"one").unwrap();
        let url1 = store.url(&file).unwrap();
        store.put("a/b", b"two").unwrap();
        let url2 = store.url(&file).unwrap();
        assert_ne!(url1, url2);
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_present_blob() {
        let store = InMemoryBlobStore::new();
        let file = store.put("a/b", b"x").unwrap();
        assert!(store.delete(&file).unwrap());
        assert!(!store.exists(&file).unwrap());
        assert!(!store.delete(&file).unwrap());
    }

    // -----------------------------------------------------------------------
    // Utility
    // -----------------------------------------------------------------------

    #[test]
    fn total_bytes_sums_blobs() {
        let store = InMemoryBlobStore::new();
        store.put("a/1", b"12345").unwrap();
        store.put("a/2", b"123").unwrap();
        assert_eq!(store.total_bytes(), 8);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryBlobStore::new();
        store.put("a/1", b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryBlobStore"));
        assert!(debug.contains("blob_count"));
    }
}
