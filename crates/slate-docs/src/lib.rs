//! Hierarchical document store contract for the Slate assignment board.
//!
//! This crate models the external document database the board delegates all
//! persistence to: schemaless JSON documents arranged in alternating
//! collection/document path segments
//! (`assignments/{id}/answers/{aid}/voted/{uid}`), with CRUD, sub-collection
//! listing, equality queries, and an optimistic multi-document transaction
//! primitive.
//!
//! # Transactions
//!
//! [`DocumentStore::run_transaction`] re-executes a read-compute-write body
//! until it commits without conflicting reads, bounded by a configurable
//! retry count. The body reads through a handle that records a read set
//! (document versions and collection membership versions) and buffers a
//! write set; at commit time the read set is validated and the writes apply
//! atomically or not at all. The body may also [`TxDecision::Abort`] to
//! discard its writes without retrying, the path domain logic takes when it
//! discovers, against a fresh snapshot, that there is nothing left to do.
//!
//! # Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocStore`] — `BTreeMap`-based store for tests and embedding

pub mod config;
pub mod document;
pub mod error;
pub mod memory;
pub mod path;
pub mod traits;
mod transaction;

pub use config::DocStoreConfig;
pub use document::Document;
pub use error::{DocError, DocResult};
pub use memory::InMemoryDocStore;
pub use path::{CollectionPath, DocPath};
pub use traits::{DocumentStore, TransactionHandle, TxDecision};
