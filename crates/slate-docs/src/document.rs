use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DocError, DocResult};

/// A fetched document: its id within the owning collection plus its
/// schemaless JSON payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Decode the payload into a typed record.
    ///
    /// The backend enforces no schema, so decoding is where shape errors
    /// surface; a document that does not match its expected record shape is
    /// reported as [`DocError::Malformed`] rather than propagating
    /// missing-field failures into callers.
    pub fn decode<T: DeserializeOwned>(&self) -> DocResult<T> {
        serde_json::from_value(self.data.clone()).map_err(|e| DocError::Malformed {
            path: self.id.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Marker {
        voted: bool,
    }

    #[test]
    fn decode_well_formed() {
        let doc = Document::new("u1", json!({ "voted": true }));
        assert_eq!(doc.decode::<Marker>().unwrap(), Marker { voted: true });
    }

    #[test]
    fn decode_malformed_reports_path() {
        let doc = Document::new("u1", json!({ "voted": "yes" }));
        let err = doc.decode::<Marker>().unwrap_err();
        match err {
            DocError::Malformed { path, .. } => assert_eq!(path, "u1"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
