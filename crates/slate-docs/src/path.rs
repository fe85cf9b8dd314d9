use std::fmt;

use crate::error::{DocError, DocResult};

fn validate_segment(segment: &str) -> DocResult<()> {
    if segment.is_empty() || segment.contains('/') {
        return Err(DocError::InvalidSegment {
            segment: segment.to_string(),
        });
    }
    Ok(())
}

/// Path to a collection: an odd number of `/`-joined segments
/// (`assignments`, `assignments/{id}/answers`, ...).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    segments: Vec<String>,
}

/// Path to a document: an even number of `/`-joined segments
/// (`assignments/{id}`, `assignments/{id}/answers/{aid}`, ...).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// A top-level collection.
    pub fn root(name: impl Into<String>) -> DocResult<Self> {
        let name = name.into();
        validate_segment(&name)?;
        Ok(Self {
            segments: vec![name],
        })
    }

    /// The document with the given id inside this collection.
    pub fn doc(&self, id: impl Into<String>) -> DocResult<DocPath> {
        let id = id.into();
        validate_segment(&id)?;
        let mut segments = self.segments.clone();
        segments.push(id);
        Ok(DocPath { segments })
    }

    /// The `/`-joined key for this collection.
    pub fn key(&self) -> String {
        self.segments.join("/")
    }
}

impl DocPath {
    /// The sub-collection with the given name under this document.
    pub fn collection(&self, name: impl Into<String>) -> DocResult<CollectionPath> {
        let name = name.into();
        validate_segment(&name)?;
        let mut segments = self.segments.clone();
        segments.push(name);
        Ok(CollectionPath { segments })
    }

    /// The collection this document belongs to.
    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    /// The document's id (final path segment).
    pub fn id(&self) -> &str {
        self.segments
            .last()
            .expect("doc path has at least two segments")
    }

    /// The `/`-joined key for this document.
    pub fn key(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Debug for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollectionPath({})", self.key())
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl fmt::Debug for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocPath({})", self.key())
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_doc_key() {
        let path = CollectionPath::root("assignments")
            .unwrap()
            .doc("a1")
            .unwrap();
        assert_eq!(path.key(), "assignments/a1");
        assert_eq!(path.id(), "a1");
    }

    #[test]
    fn nested_collection_key() {
        let voted = CollectionPath::root("assignments")
            .unwrap()
            .doc("a1")
            .unwrap()
            .collection("answers")
            .unwrap()
            .doc("x1")
            .unwrap()
            .collection("voted")
            .unwrap();
        assert_eq!(voted.key(), "assignments/a1/answers/x1/voted");
    }

    #[test]
    fn parent_returns_owning_collection() {
        let doc = CollectionPath::root("users").unwrap().doc("u1").unwrap();
        assert_eq!(doc.parent().key(), "users");
    }

    #[test]
    fn empty_segment_rejected() {
        let err = CollectionPath::root("").unwrap_err();
        assert!(matches!(err, DocError::InvalidSegment { .. }));
    }

    #[test]
    fn separator_in_segment_rejected() {
        let col = CollectionPath::root("assignments").unwrap();
        let err = col.doc("a/b").unwrap_err();
        assert!(matches!(err, DocError::InvalidSegment { .. }));
    }
}
