/// Errors from document store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    /// A path segment was empty or contained a separator.
    #[error("invalid path segment: {segment:?}")]
    InvalidSegment { segment: String },

    /// A document could not be decoded into its expected record shape.
    #[error("malformed document {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// A transaction could not commit within the retry bound.
    #[error("transaction conflict persisted after {attempts} attempts")]
    Conflict { attempts: u32 },

    /// The underlying storage backend failed.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for document store operations.
pub type DocResult<T> = Result<T, DocError>;
