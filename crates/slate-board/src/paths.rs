//! Document and blob path layout.
//!
//! Documents follow the hierarchical scheme
//! `assignments/{id}/answers/{aid}/voted/{uid}` plus a flat `users/{uid}`
//! collection for profiles. Blob paths namespace assignment files by
//! creator and answer files by assignment, so deleting an assignment's
//! subtree maps to a well-known blob prefix.

use slate_docs::{CollectionPath, DocPath, DocResult};
use slate_types::{AnswerId, AssignmentId, UserId};

const ASSIGNMENTS: &str = "assignments";
const ANSWERS: &str = "answers";
const VOTED: &str = "voted";
const USERS: &str = "users";

pub(crate) fn assignments_col() -> DocResult<CollectionPath> {
    CollectionPath::root(ASSIGNMENTS)
}

pub(crate) fn assignment_doc(id: &AssignmentId) -> DocResult<DocPath> {
    assignments_col()?.doc(id.to_string())
}

pub(crate) fn answers_col(assignment: &AssignmentId) -> DocResult<CollectionPath> {
    assignment_doc(assignment)?.collection(ANSWERS)
}

pub(crate) fn answer_doc(assignment: &AssignmentId, answer: &AnswerId) -> DocResult<DocPath> {
    answers_col(assignment)?.doc(answer.to_string())
}

pub(crate) fn voted_col(assignment: &AssignmentId, answer: &AnswerId) -> DocResult<CollectionPath> {
    answer_doc(assignment, answer)?.collection(VOTED)
}

pub(crate) fn vote_doc(
    assignment: &AssignmentId,
    answer: &AnswerId,
    voter: &UserId,
) -> DocResult<DocPath> {
    voted_col(assignment, answer)?.doc(voter.as_str())
}

pub(crate) fn users_col() -> DocResult<CollectionPath> {
    CollectionPath::root(USERS)
}

pub(crate) fn user_doc(user: &UserId) -> DocResult<DocPath> {
    users_col()?.doc(user.as_str())
}

pub(crate) fn assignment_blob_path(creator: &UserId, file_name: &str) -> String {
    format!("assignments/{creator}/{file_name}")
}

pub(crate) fn answer_blob_path(assignment: &AssignmentId, file_name: &str) -> String {
    format!("assignment-answers/{assignment}/{file_name}")
}

pub(crate) fn avatar_blob_path(user: &UserId, file_name: &str) -> String {
    format!("profile-pictures/{user}/{file_name}")
}
