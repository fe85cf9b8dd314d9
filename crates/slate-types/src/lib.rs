//! Foundation types for the Slate assignment board.
//!
//! This crate provides the identifiers, file locators, and record shapes used
//! throughout the Slate system. Every other Slate crate depends on
//! `slate-types`.
//!
//! # Key Types
//!
//! - [`AssignmentId`] / [`AnswerId`] — Time-ordered generated document ids (UUID v7)
//! - [`UserId`] — Opaque principal id issued by the identity provider
//! - [`FileRef`] — Opaque locator for a blob held by the object store
//! - [`Assignment`], [`Answer`], [`VoteRecord`] — Document record shapes
//! - [`AuthorSnapshot`] — Denormalized author profile embedded in answers

pub mod error;
pub mod file;
pub mod id;
pub mod profile;
pub mod record;

pub use error::TypeError;
pub use file::FileRef;
pub use id::{AnswerId, AssignmentId, UserId};
pub use profile::{AuthorSnapshot, UserProfile};
pub use record::{Answer, Assignment, VoteRecord};
