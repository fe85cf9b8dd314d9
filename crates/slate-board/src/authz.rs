//! Caller-side ownership checks.
//!
//! The engines deliberately do not re-verify identity on deletion: the
//! requester was authenticated by the identity provider and the comparison
//! against the recorded owner happens here, before the engine is invoked.
//! This is a trust boundary — callers embedding the engines must route
//! deletions through [`require_owner`] (or an equivalent check) themselves.

use slate_types::UserId;

use crate::error::{BoardError, BoardResult};

/// Fail with [`BoardError::Forbidden`] unless `requester` is the recorded
/// owner of the entity.
pub fn require_owner(
    owner: &UserId,
    requester: &UserId,
    entity: &'static str,
) -> BoardResult<()> {
    if owner != requester {
        return Err(BoardError::Forbidden {
            reason: format!("only the owner may delete this {entity}"),
        });
    }
    Ok(())
}
