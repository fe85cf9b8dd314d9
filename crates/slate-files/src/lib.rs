//! Object storage contract for the Slate assignment board.
//!
//! The board keeps every uploaded file (assignment sheets, answer
//! attachments, avatars) in an external blob store and records only an
//! opaque [`FileRef`](slate_types::FileRef) locator in its documents. This
//! crate defines that collaborator contract and ships an in-memory backend
//! for tests and embedding.
//!
//! The blob store and the document store are independent systems with no
//! shared transaction; callers get consistency only from ordering (upload
//! before the document write that claims the file), accepting an orphaned
//! blob on failure rather than a record referencing a missing blob.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{BlobError, BlobResult};
pub use memory::InMemoryBlobStore;
pub use traits::BlobStore;
