use slate_types::FileRef;

use crate::error::BlobResult;

/// Path-keyed blob storage.
///
/// All implementations must satisfy these invariants:
/// - `put` fully replaces any blob already at the path and returns the
///   locator the caller embeds in its documents.
/// - The store never interprets blob contents.
/// - Deletion is idempotent at the caller's level: deleting an absent blob
///   reports `false` rather than failing.
/// - Backend failures are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Store bytes at a path and return the opaque locator for them.
    fn put(&self, path: &str, bytes: &[u8]) -> BlobResult<FileRef>;

    /// Resolve a download URL for a stored blob.
    fn url(&self, file: &FileRef) -> BlobResult<String>;

    /// Delete a blob. Returns `true` if it existed.
    fn delete(&self, file: &FileRef) -> BlobResult<bool>;

    /// Check whether a blob exists for the locator.
    fn exists(&self, file: &FileRef) -> BlobResult<bool>;
}
