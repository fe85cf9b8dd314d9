//! Identity provider contract for the Slate assignment board.
//!
//! Authentication is delegated to an external provider; the board only
//! consumes the session principal (user id and email) it issues. This crate
//! defines that collaborator contract and ships an in-memory provider with
//! salted password hashing for tests and embedding.
//!
//! A provider instance models one client session, matching the one-session-
//! per-browser shape of the consuming application.

pub mod error;
pub mod memory;
pub mod principal;
pub mod traits;

pub use error::{AuthError, AuthResult};
pub use memory::InMemoryIdentityProvider;
pub use principal::Principal;
pub use traits::IdentityProvider;
