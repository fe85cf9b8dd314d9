use serde_json::Value;

use crate::document::Document;
use crate::error::DocResult;
use crate::path::{CollectionPath, DocPath};

/// What a transaction body decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxDecision {
    /// Apply the buffered writes atomically (retrying the whole body if the
    /// read set conflicted with a concurrent commit).
    Commit,
    /// Discard the buffered writes and stop without retrying. This is a
    /// successful outcome at the store level; the body uses it when domain
    /// logic determines there is nothing to write.
    Abort,
}

/// Read/write handle passed to a transaction body.
///
/// Reads are recorded in the transaction's read set; writes are buffered
/// until commit. Reads observe the committed state of the store, not the
/// buffered writes — read everything you need before writing.
pub trait TransactionHandle {
    /// Read a document, recording its version in the read set.
    fn get(&mut self, path: &DocPath) -> DocResult<Option<Document>>;

    /// List the document ids in a collection, recording the collection's
    /// membership in the read set (a concurrent insert or delete in the
    /// collection conflicts this transaction).
    fn list_ids(&mut self, collection: &CollectionPath) -> DocResult<Vec<String>>;

    /// Buffer a document write.
    fn set(&mut self, path: &DocPath, data: Value) -> DocResult<()>;

    /// Buffer a document deletion.
    fn delete(&mut self, path: &DocPath) -> DocResult<()>;
}

/// A transaction body: re-executed from scratch on every retry, so it must
/// be a pure read-compute-write closure over the handle (captured state may
/// be overwritten, never accumulated).
pub type TxBody<'a> = &'a mut dyn FnMut(&mut dyn TransactionHandle) -> DocResult<TxDecision>;

/// Hierarchical document store.
///
/// All implementations must satisfy these invariants:
/// - `set` creates or fully replaces; there are no partial updates outside
///   transactions.
/// - `list` returns only the immediate documents of a collection, never
///   documents of nested sub-collections.
/// - `run_transaction` is the only multi-document atomic unit: its writes
///   become visible together or not at all, and a body whose reads were
///   invalidated by a concurrent commit is re-executed against fresh state.
/// - Backend failures are propagated, never silently ignored.
pub trait DocumentStore: Send + Sync {
    /// Read a single document. Returns `Ok(None)` if absent.
    fn get(&self, path: &DocPath) -> DocResult<Option<Document>>;

    /// Create or replace a document.
    fn set(&self, path: &DocPath, data: Value) -> DocResult<()>;

    /// Delete a document. Returns `true` if it existed.
    fn delete(&self, path: &DocPath) -> DocResult<bool>;

    /// List all documents directly inside a collection.
    fn list(&self, collection: &CollectionPath) -> DocResult<Vec<Document>>;

    /// List the documents whose `field` equals `value`.
    fn query(&self, collection: &CollectionPath, field: &str, value: &Value)
        -> DocResult<Vec<Document>>;

    /// Execute `body` as an optimistic transaction.
    ///
    /// Returns the body's final decision once it commits cleanly or aborts;
    /// surfaces [`DocError::Conflict`](crate::DocError::Conflict) when the
    /// retry bound is exhausted.
    fn run_transaction(&self, body: TxBody<'_>) -> DocResult<TxDecision>;
}
