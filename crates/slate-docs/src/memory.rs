use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde_json::Value;
use tracing::debug;

use crate::config::DocStoreConfig;
use crate::document::Document;
use crate::error::{DocError, DocResult};
use crate::path::{CollectionPath, DocPath};
use crate::traits::{DocumentStore, TransactionHandle, TxBody, TxDecision};
use crate::transaction::{MemoryTransaction, WriteOp};

/// In-memory, `BTreeMap`-based document store for tests and embedding.
///
/// Documents are keyed by their full `/`-joined path, so listing a
/// collection is a range scan over its key prefix. Every mutation stamps a
/// fresh version from a store-wide clock; transactions validate the
/// versions they read at commit time (optimistic concurrency control) and
/// are re-executed on conflict.
pub struct InMemoryDocStore {
    config: DocStoreConfig,
    inner: RwLock<StoreState>,
}

struct VersionedDoc {
    data: Value,
    version: u64,
}

#[derive(Default)]
struct StoreState {
    docs: BTreeMap<String, VersionedDoc>,
    /// Membership version per collection key, bumped on insert/delete
    /// (not on in-place updates, which leave the id set unchanged).
    collections: HashMap<String, u64>,
    clock: u64,
}

impl StoreState {
    fn bump(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn apply_set(&mut self, doc_key: &str, collection_key: &str, data: Value) {
        let version = self.bump();
        let created = !self.docs.contains_key(doc_key);
        self.docs
            .insert(doc_key.to_string(), VersionedDoc { data, version });
        if created {
            self.collections.insert(collection_key.to_string(), version);
        }
    }

    fn apply_delete(&mut self, doc_key: &str, collection_key: &str) -> bool {
        if self.docs.remove(doc_key).is_none() {
            return false;
        }
        let version = self.bump();
        self.collections.insert(collection_key.to_string(), version);
        true
    }

    /// The (id, doc) pairs directly inside a collection. Keys of nested
    /// sub-collection documents share the prefix but contain a further `/`
    /// and are skipped.
    fn members<'a>(
        &'a self,
        collection_key: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a VersionedDoc)> + 'a {
        let start = format!("{collection_key}/");
        self.docs
            .range(start..)
            .take_while(move |(key, _)| {
                key.starts_with(collection_key) && key[collection_key.len()..].starts_with('/')
            })
            .filter_map(move |(key, doc)| {
                let id = &key[collection_key.len() + 1..];
                (!id.contains('/')).then_some((id, doc))
            })
    }
}

impl InMemoryDocStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DocStoreConfig::default())
    }

    /// Create an empty store with an explicit configuration.
    pub fn with_config(config: DocStoreConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(StoreState::default()),
        }
    }

    /// Number of documents currently stored, across all collections.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").docs.len()
    }

    /// Returns `true` if no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").docs.is_empty()
    }

    pub(crate) fn read_versioned(&self, path: &DocPath) -> (Option<Document>, u64) {
        let state = self.inner.read().expect("lock poisoned");
        match state.docs.get(&path.key()) {
            Some(doc) => (
                Some(Document::new(path.id(), doc.data.clone())),
                doc.version,
            ),
            None => (None, 0),
        }
    }

    pub(crate) fn list_versioned(&self, collection: &CollectionPath) -> (Vec<String>, u64) {
        let state = self.inner.read().expect("lock poisoned");
        let key = collection.key();
        let ids = state.members(&key).map(|(id, _)| id.to_string()).collect();
        let version = state.collections.get(&key).copied().unwrap_or(0);
        (ids, version)
    }

    /// Validate the transaction's read set and, if still current, apply its
    /// writes. Runs entirely under the write lock, so validation and
    /// application are a single atomic step.
    fn try_commit(&self, tx: &MemoryTransaction<'_>) -> bool {
        let mut state = self.inner.write().expect("lock poisoned");
        for (key, version) in &tx.doc_reads {
            let current = state.docs.get(key).map(|d| d.version).unwrap_or(0);
            if current != *version {
                return false;
            }
        }
        for (key, version) in &tx.collection_reads {
            let current = state.collections.get(key).copied().unwrap_or(0);
            if current != *version {
                return false;
            }
        }
        for write in &tx.writes {
            match &write.op {
                WriteOp::Set(data) => {
                    state.apply_set(&write.doc_key, &write.collection_key, data.clone());
                }
                WriteOp::Delete => {
                    state.apply_delete(&write.doc_key, &write.collection_key);
                }
            }
        }
        true
    }
}

impl Default for InMemoryDocStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocStore {
    fn get(&self, path: &DocPath) -> DocResult<Option<Document>> {
        Ok(self.read_versioned(path).0)
    }

    fn set(&self, path: &DocPath, data: Value) -> DocResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        state.apply_set(&path.key(), &path.parent().key(), data);
        Ok(())
    }

    fn delete(&self, path: &DocPath) -> DocResult<bool> {
        let mut state = self.inner.write().expect("lock poisoned");
        Ok(state.apply_delete(&path.key(), &path.parent().key()))
    }

    fn list(&self, collection: &CollectionPath) -> DocResult<Vec<Document>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .members(&collection.key())
            .map(|(id, doc)| Document::new(id, doc.data.clone()))
            .collect())
    }

    fn query(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> DocResult<Vec<Document>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .members(&collection.key())
            .filter(|(_, doc)| doc.data.get(field) == Some(value))
            .map(|(id, doc)| Document::new(id, doc.data.clone()))
            .collect())
    }

    fn run_transaction(&self, body: TxBody<'_>) -> DocResult<TxDecision> {
        let attempts = self.config.max_tx_retries.max(1);
        for attempt in 1..=attempts {
            let mut tx = MemoryTransaction::new(self);
            match body(&mut tx)? {
                TxDecision::Abort => {
                    debug!(attempt, "transaction aborted by body");
                    return Ok(TxDecision::Abort);
                }
                TxDecision::Commit => {
                    if self.try_commit(&tx) {
                        debug!(attempt, writes = tx.writes.len(), "transaction committed");
                        return Ok(TxDecision::Commit);
                    }
                    debug!(attempt, "transaction read set conflicted; retrying");
                }
            }
        }
        Err(DocError::Conflict { attempts })
    }
}

impl std::fmt::Debug for InMemoryDocStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocStore")
            .field("document_count", &self.len())
            .finish()
    }
}
