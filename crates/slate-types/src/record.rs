use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::file::FileRef;
use crate::id::{AnswerId, AssignmentId, UserId};
use crate::profile::AuthorSnapshot;

/// A posted assignment with its mandatory reference file.
///
/// Owned by its creator; deletion cascades to the stored file and to every
/// answer (and vote record) beneath it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub title: String,
    pub subject: String,
    pub details: String,
    pub file_ref: FileRef,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// A user-submitted response to an assignment.
///
/// `votes` is a derived counter: at any quiescent moment it equals the
/// number of vote records beneath the answer. All mutations to it go
/// through the voting transaction, never direct increments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
    pub author: AuthorSnapshot,
    pub file_ref: Option<FileRef>,
    pub votes: u64,
}

impl Answer {
    /// Whether the given principal is the recorded author.
    pub fn authored_by(&self, user: &UserId) -> bool {
        &self.author_id == user
    }
}

/// Per-voter marker document under an answer.
///
/// The document key is the voter's user id, so a second write for the same
/// voter would be an overwrite rather than a duplicate; the voting
/// transaction pre-checks the key set so that overwrite never happens and
/// the counter stays in sync. Created once, never updated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub voted: bool,
}

impl VoteRecord {
    /// The record written when a vote is cast.
    pub fn cast() -> Self {
        Self { voted: true }
    }
}
