//! Core logic of the Slate classroom assignment board.
//!
//! Authenticated users post assignments with an attached file and
//! collaborate through threaded answers scored by single-vote-per-user
//! voting. All persistence lives in external managed backends consumed
//! through the [`slate_docs`], [`slate_files`], and [`slate_auth`]
//! contracts; this crate holds the consistency protocol on top of them:
//!
//! - [`AnswerEngine`] — answer submission, per-user vote exclusivity via an
//!   optimistic transaction, vote-count aggregation, and the answer
//!   deletion cascade.
//! - [`LifecycleManager`] — atomic-by-ordering creation and full-cascade
//!   deletion of assignments together with their files and sub-records.
//! - [`Accounts`] — registration, sessions, and the user profile documents
//!   answers snapshot at submission time.
//!
//! Store clients are constructed explicitly and injected, so tests (and
//! embedders) substitute fakes freely.

pub mod accounts;
pub mod answers;
pub mod assignments;
pub mod authz;
pub mod error;
pub mod upload;
mod paths;

pub use accounts::Accounts;
pub use answers::AnswerEngine;
pub use assignments::LifecycleManager;
pub use authz::require_owner;
pub use error::{BoardError, BoardResult};
pub use upload::NewFile;

/// Serialize a record into its document payload.
pub(crate) fn encode<T: serde::Serialize>(record: &T) -> BoardResult<serde_json::Value> {
    serde_json::to_value(record)
        .map_err(|e| BoardError::Dependency(format!("record serialization failed: {e}")))
}
