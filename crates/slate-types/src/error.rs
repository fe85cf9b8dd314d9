/// Errors from foundation type parsing and construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A generated id could not be parsed from its string form.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// A user id was empty.
    #[error("user id must not be empty")]
    EmptyUserId,

    /// A file locator was empty.
    #[error("file reference must not be empty")]
    EmptyFileRef,
}
