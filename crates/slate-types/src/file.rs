use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque locator for a blob held by the object store.
///
/// A `FileRef` is the only thing a document record may say about a stored
/// file. Callers hand it back to the object store to resolve a download URL
/// or to delete the blob; they never interpret its contents.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileRef(String);

impl FileRef {
    /// Wrap a store-issued locator. Fails on an empty string.
    pub fn new(locator: impl Into<String>) -> Result<Self, TypeError> {
        let locator = locator.into();
        if locator.is_empty() {
            return Err(TypeError::EmptyFileRef);
        }
        Ok(Self(locator))
    }

    /// The raw locator string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileRef({})", self.0)
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_locator() {
        assert!(matches!(FileRef::new(""), Err(TypeError::EmptyFileRef)));
    }

    #[test]
    fn preserves_locator() {
        let fr = FileRef::new("assignments/u1/hw.pdf").unwrap();
        assert_eq!(fr.as_str(), "assignments/u1/hw.pdf");
    }

    #[test]
    fn serde_roundtrip() {
        let fr = FileRef::new("answers/a1/notes.pdf").unwrap();
        let json = serde_json::to_string(&fr).unwrap();
        let parsed: FileRef = serde_json::from_str(&json).unwrap();
        assert_eq!(fr, parsed);
    }
}
