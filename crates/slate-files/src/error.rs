/// Errors from blob store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobError {
    /// The upload path was empty or contained empty segments.
    #[error("invalid blob path: {path:?}")]
    InvalidPath { path: String },

    /// No blob exists for the given locator.
    #[error("blob not found: {locator}")]
    NotFound { locator: String },

    /// The underlying storage backend failed.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for blob store operations.
pub type BlobResult<T> = Result<T, BlobError>;
