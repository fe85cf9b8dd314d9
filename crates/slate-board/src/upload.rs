use crate::error::{BoardError, BoardResult};

/// A file selected for upload: its client-side name and raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewFile {
    name: String,
    bytes: Vec<u8>,
}

impl NewFile {
    /// Wrap a file for upload. The name becomes a blob path segment, so it
    /// must be non-empty and free of separators.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> BoardResult<Self> {
        let name = name.into();
        if name.is_empty() || name.contains('/') {
            return Err(BoardError::Validation {
                reason: format!("invalid file name {name:?}"),
            });
        }
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
