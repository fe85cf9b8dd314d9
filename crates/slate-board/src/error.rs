use slate_auth::AuthError;
use slate_docs::DocError;
use slate_files::BlobError;

/// Errors surfaced by board operations.
///
/// Every failure is scoped to the single user action that triggered it; the
/// presentation layer's only job is mapping each variant to a transient
/// notification. Nothing here is retried automatically except the document
/// store's own transaction conflict retry, which is internal to
/// [`Dependency`](BoardError::Dependency)-producing calls.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Bad input: missing required text, missing required file, empty name.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The voter already holds a vote record on this answer.
    #[error("already voted on this answer")]
    AlreadyVoted,

    /// The acting principal does not own the entity. Produced by the
    /// caller-side ownership check, never by the engines themselves.
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    /// Identity provider failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// An external store call failed, a transaction exhausted its retry
    /// bound, or a fetched document did not match its record shape.
    #[error("dependency failure: {0}")]
    Dependency(String),
}

impl From<DocError> for BoardError {
    fn from(e: DocError) -> Self {
        Self::Dependency(e.to_string())
    }
}

impl From<BlobError> for BoardError {
    fn from(e: BlobError) -> Self {
        Self::Dependency(e.to_string())
    }
}

/// Result alias for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
