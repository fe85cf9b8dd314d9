use std::collections::HashMap;

use serde_json::Value;

use crate::document::Document;
use crate::error::DocResult;
use crate::memory::InMemoryDocStore;
use crate::path::{CollectionPath, DocPath};
use crate::traits::TransactionHandle;

pub(crate) enum WriteOp {
    Set(Value),
    Delete,
}

pub(crate) struct BufferedWrite {
    pub(crate) doc_key: String,
    pub(crate) collection_key: String,
    pub(crate) op: WriteOp,
}

/// One attempt of an optimistic transaction against the in-memory backend.
///
/// Reads record the version they observed (0 for an absent document or an
/// empty collection); writes are buffered in order. Commit validation
/// re-checks every recorded version under the store's write lock, so a
/// concurrent commit that touched anything this attempt read forces a
/// fresh re-execution of the body.
pub(crate) struct MemoryTransaction<'a> {
    store: &'a InMemoryDocStore,
    pub(crate) doc_reads: HashMap<String, u64>,
    pub(crate) collection_reads: HashMap<String, u64>,
    pub(crate) writes: Vec<BufferedWrite>,
}

impl<'a> MemoryTransaction<'a> {
    pub(crate) fn new(store: &'a InMemoryDocStore) -> Self {
        Self {
            store,
            doc_reads: HashMap::new(),
            collection_reads: HashMap::new(),
            writes: Vec::new(),
        }
    }
}

impl TransactionHandle for MemoryTransaction<'_> {
    fn get(&mut self, path: &DocPath) -> DocResult<Option<Document>> {
        let (doc, version) = self.store.read_versioned(path);
        // Keep the first observed version; if a later read of the same key
        // sees something newer, commit validation catches the skew.
        self.doc_reads.entry(path.key()).or_insert(version);
        Ok(doc)
    }

    fn list_ids(&mut self, collection: &CollectionPath) -> DocResult<Vec<String>> {
        let (ids, version) = self.store.list_versioned(collection);
        self.collection_reads
            .entry(collection.key())
            .or_insert(version);
        Ok(ids)
    }

    fn set(&mut self, path: &DocPath, data: Value) -> DocResult<()> {
        self.writes.push(BufferedWrite {
            doc_key: path.key(),
            collection_key: path.parent().key(),
            op: WriteOp::Set(data),
        });
        Ok(())
    }

    fn delete(&mut self, path: &DocPath) -> DocResult<()> {
        self.writes.push(BufferedWrite {
            doc_key: path.key(),
            collection_key: path.parent().key(),
            op: WriteOp::Delete,
        });
        Ok(())
    }
}
