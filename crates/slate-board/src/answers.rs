use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use slate_docs::{DocumentStore, TxDecision};
use slate_files::BlobStore;
use slate_types::{Answer, AnswerId, AssignmentId, AuthorSnapshot, UserId, VoteRecord};
use tracing::{debug, warn};

use crate::encode;
use crate::error::{BoardError, BoardResult};
use crate::paths;
use crate::upload::NewFile;

/// What the voting transaction concluded on its final execution.
enum VoteAttempt {
    AlreadyVoted,
    AnswerMissing,
    Committed(u64),
}

/// Answer submission, per-user vote exclusivity, and vote-count aggregation.
///
/// The vote counter and its vote-record set are the only shared-mutable
/// state on the board; every mutation to them goes through
/// [`cast_vote`](Self::cast_vote)'s transaction. Direct counter increments
/// reintroduce the lost-update race and are not provided.
#[derive(Clone)]
pub struct AnswerEngine {
    docs: Arc<dyn DocumentStore>,
    files: Arc<dyn BlobStore>,
}

impl AnswerEngine {
    /// Build an engine over injected store clients.
    pub fn new(docs: Arc<dyn DocumentStore>, files: Arc<dyn BlobStore>) -> Self {
        Self { docs, files }
    }

    /// Submit an answer to an assignment.
    ///
    /// Text is mandatory; the file is optional and, when present, is
    /// uploaded before the answer document is written so the record never
    /// claims a file that does not exist. Upload failure aborts the whole
    /// submission. The author snapshot is embedded as given; later profile
    /// edits do not rewrite historical answers.
    pub fn submit_answer(
        &self,
        assignment: &AssignmentId,
        author_id: &UserId,
        author: AuthorSnapshot,
        text: &str,
        file: Option<NewFile>,
    ) -> BoardResult<Answer> {
        if text.trim().is_empty() {
            return Err(BoardError::Validation {
                reason: "answer text is required".into(),
            });
        }
        if self.docs.get(&paths::assignment_doc(assignment)?)?.is_none() {
            return Err(BoardError::NotFound {
                entity: "assignment",
                id: assignment.to_string(),
            });
        }

        let file_ref = match file {
            Some(file) => Some(
                self.files
                    .put(&paths::answer_blob_path(assignment, file.name()), file.bytes())?,
            ),
            None => None,
        };

        let answer = Answer {
            id: AnswerId::new(),
            text: text.to_string(),
            created_at: Utc::now(),
            author_id: author_id.clone(),
            author,
            file_ref,
            votes: 0,
        };
        self.docs
            .set(&paths::answer_doc(assignment, &answer.id)?, encode(&answer)?)?;
        debug!(assignment = %assignment, answer = %answer.id, "answer submitted");
        Ok(answer)
    }

    /// Cast a vote on an answer, returning the new vote count.
    ///
    /// The existence check, counter read, and the two writes (incremented
    /// counter, new vote record keyed by the voter's id) form a single
    /// optimistic transaction. Two concurrent calls for the same (answer,
    /// voter) cannot both commit: the loser is re-executed against fresh
    /// state by the store's conflict retry, re-discovers the vote record,
    /// and aborts as [`BoardError::AlreadyVoted`]. Any stale client-side
    /// "already voted" state is irrelevant; this re-verification is the
    /// source of truth.
    pub fn cast_vote(
        &self,
        assignment: &AssignmentId,
        answer: &AnswerId,
        voter: &UserId,
    ) -> BoardResult<u64> {
        let answer_path = paths::answer_doc(assignment, answer)?;
        let voted_col = paths::voted_col(assignment, answer)?;
        let vote_path = paths::vote_doc(assignment, answer, voter)?;
        let vote_data = encode(&VoteRecord::cast())?;

        let mut attempt = None;
        self.docs.run_transaction(&mut |tx| {
            attempt = None;
            let voters = tx.list_ids(&voted_col)?;
            if voters.iter().any(|v| v == voter.as_str()) {
                attempt = Some(VoteAttempt::AlreadyVoted);
                return Ok(TxDecision::Abort);
            }
            let Some(doc) = tx.get(&answer_path)? else {
                attempt = Some(VoteAttempt::AnswerMissing);
                return Ok(TxDecision::Abort);
            };
            let mut record: Answer = doc.decode()?;
            record.votes += 1;
            tx.set(&answer_path, encode(&record).map_err(to_doc_backend)?)?;
            tx.set(&vote_path, vote_data.clone())?;
            attempt = Some(VoteAttempt::Committed(record.votes));
            Ok(TxDecision::Commit)
        })?;

        match attempt {
            Some(VoteAttempt::Committed(votes)) => {
                debug!(answer = %answer, voter = %voter, votes, "vote recorded");
                Ok(votes)
            }
            Some(VoteAttempt::AlreadyVoted) => Err(BoardError::AlreadyVoted),
            Some(VoteAttempt::AnswerMissing) => Err(BoardError::NotFound {
                entity: "answer",
                id: answer.to_string(),
            }),
            None => Err(BoardError::Dependency(
                "vote transaction finished without an outcome".into(),
            )),
        }
    }

    /// Delete an answer: its vote records, the answer document, then its
    /// attached file.
    ///
    /// Authorization is caller-enforced — compare the requester against the
    /// recorded author (see [`crate::authz::require_owner`]) before calling;
    /// the engine trusts its caller here. Documents go first so a crash
    /// mid-way leaves at worst an orphaned blob, never an answer pointing
    /// at a missing file. A file-deletion failure after the documents are
    /// gone is logged and does not fail the operation; the user-visible
    /// entity is already deleted.
    pub fn delete_answer(&self, assignment: &AssignmentId, answer: &AnswerId) -> BoardResult<()> {
        let answer_path = paths::answer_doc(assignment, answer)?;
        let doc = self
            .docs
            .get(&answer_path)?
            .ok_or_else(|| BoardError::NotFound {
                entity: "answer",
                id: answer.to_string(),
            })?;
        let record: Answer = doc.decode()?;

        let voted_col = paths::voted_col(assignment, answer)?;
        let mut failed = 0usize;
        for voter in self.docs.list(&voted_col)? {
            let vote_path = voted_col.doc(&voter.id)?;
            if let Err(e) = self.docs.delete(&vote_path) {
                warn!(answer = %answer, voter = %voter.id, error = %e, "vote record deletion failed");
                failed += 1;
            }
        }
        if failed > 0 {
            return Err(BoardError::Dependency(format!(
                "failed to delete {failed} vote record(s)"
            )));
        }

        self.docs.delete(&answer_path)?;
        if let Some(file) = &record.file_ref {
            // Best-effort: storage reclamation is secondary to the document
            // deletion already committed above.
            if let Err(e) = self.files.delete(file) {
                warn!(answer = %answer, file = %file, error = %e, "answer file deletion failed");
            }
        }
        debug!(assignment = %assignment, answer = %answer, "answer deleted");
        Ok(())
    }

    /// All answers under an assignment, in fetch order.
    pub fn list_answers(&self, assignment: &AssignmentId) -> BoardResult<Vec<Answer>> {
        self.docs
            .list(&paths::answers_col(assignment)?)?
            .iter()
            .map(|doc| doc.decode::<Answer>().map_err(BoardError::from))
            .collect()
    }

    /// For each answer, whether `voter` already holds a vote record on it.
    ///
    /// Read-only reconciliation for rendering vote-button state. One store
    /// round trip per answer; a scalability limit, not a correctness one,
    /// since [`cast_vote`](Self::cast_vote) never trusts this map.
    pub fn voted_set(
        &self,
        assignment: &AssignmentId,
        answers: &[Answer],
        voter: &UserId,
    ) -> BoardResult<HashMap<AnswerId, bool>> {
        let mut voted = HashMap::with_capacity(answers.len());
        for answer in answers {
            let path = paths::vote_doc(assignment, &answer.id, voter)?;
            voted.insert(answer.id, self.docs.get(&path)?.is_some());
        }
        Ok(voted)
    }
}

/// Encoding a record we just decoded can only fail on a backend-level
/// malfunction; keep the transaction body's error type uniform.
fn to_doc_backend(e: BoardError) -> slate_docs::DocError {
    slate_docs::DocError::Backend(e.to_string())
}
