use std::sync::Arc;

use chrono::Utc;
use slate_docs::DocumentStore;
use slate_files::BlobStore;
use slate_types::{Assignment, AssignmentId, UserId};
use tracing::{debug, warn};

use crate::answers::AnswerEngine;
use crate::encode;
use crate::error::{BoardError, BoardResult};
use crate::paths;
use crate::upload::NewFile;

/// Assignment creation and deletion, keeping the document store and the
/// blob store consistent.
///
/// The two stores share no transaction, so ordering is the consistency
/// tool: the file is uploaded before the document that claims it exists,
/// and documents are deleted before their files. The accepted worst case
/// is an orphaned blob, never a record referencing a missing blob.
#[derive(Clone)]
pub struct LifecycleManager {
    docs: Arc<dyn DocumentStore>,
    files: Arc<dyn BlobStore>,
    answers: AnswerEngine,
}

impl LifecycleManager {
    /// Build a manager over injected store clients.
    pub fn new(docs: Arc<dyn DocumentStore>, files: Arc<dyn BlobStore>) -> Self {
        let answers = AnswerEngine::new(docs.clone(), files.clone());
        Self {
            docs,
            files,
            answers,
        }
    }

    /// Post a new assignment. The reference file is mandatory, unlike
    /// answer attachments; without it nothing is written anywhere.
    pub fn create_assignment(
        &self,
        creator: &UserId,
        title: &str,
        subject: &str,
        details: &str,
        file: Option<NewFile>,
    ) -> BoardResult<Assignment> {
        if title.trim().is_empty() {
            return Err(BoardError::Validation {
                reason: "assignment title is required".into(),
            });
        }
        let Some(file) = file else {
            return Err(BoardError::Validation {
                reason: "assignment file is required".into(),
            });
        };

        let file_ref = self
            .files
            .put(&paths::assignment_blob_path(creator, file.name()), file.bytes())?;
        let assignment = Assignment {
            id: AssignmentId::new(),
            title: title.to_string(),
            subject: subject.to_string(),
            details: details.to_string(),
            file_ref,
            created_by: creator.clone(),
            created_at: Utc::now(),
        };
        self.docs
            .set(&paths::assignment_doc(&assignment.id)?, encode(&assignment)?)?;
        debug!(assignment = %assignment.id, creator = %creator, "assignment created");
        Ok(assignment)
    }

    /// Delete an assignment and everything beneath it: every answer with
    /// its vote records and attachment, the assignment document, and the
    /// assignment's own file.
    ///
    /// Authorization is caller-enforced, the same trust boundary as
    /// [`AnswerEngine::delete_answer`]. Deleting an assignment that is
    /// already gone fails with `NotFound` rather than silently succeeding
    /// twice.
    pub fn delete_assignment(&self, assignment: &AssignmentId) -> BoardResult<()> {
        let record = self.get_assignment(assignment)?;

        for answer in self.answers.list_answers(assignment)? {
            self.answers.delete_answer(assignment, &answer.id)?;
        }
        self.docs.delete(&paths::assignment_doc(assignment)?)?;
        // Best-effort, after the documents: worst case is an orphaned blob.
        if let Err(e) = self.files.delete(&record.file_ref) {
            warn!(assignment = %assignment, file = %record.file_ref, error = %e,
                "assignment file deletion failed");
        }
        debug!(assignment = %assignment, "assignment deleted");
        Ok(())
    }

    /// Fetch one assignment.
    pub fn get_assignment(&self, assignment: &AssignmentId) -> BoardResult<Assignment> {
        self.docs
            .get(&paths::assignment_doc(assignment)?)?
            .ok_or_else(|| BoardError::NotFound {
                entity: "assignment",
                id: assignment.to_string(),
            })?
            .decode()
            .map_err(BoardError::from)
    }

    /// All assignments on the board, in fetch order.
    pub fn list_assignments(&self) -> BoardResult<Vec<Assignment>> {
        self.docs
            .list(&paths::assignments_col()?)?
            .iter()
            .map(|doc| doc.decode::<Assignment>().map_err(BoardError::from))
            .collect()
    }

    /// The assignments posted by one user (the profile page view).
    pub fn assignments_by_creator(&self, creator: &UserId) -> BoardResult<Vec<Assignment>> {
        self.docs
            .query(
                &paths::assignments_col()?,
                "created_by",
                &serde_json::Value::String(creator.as_str().to_string()),
            )?
            .iter()
            .map(|doc| doc.decode::<Assignment>().map_err(BoardError::from))
            .collect()
    }
}
