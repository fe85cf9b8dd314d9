use serde::{Deserialize, Serialize};

use crate::file::FileRef;

/// A user profile document, keyed by the provider-issued user id.
///
/// Written at registration and mutable afterwards. Answers do not link to
/// this document; they embed an [`AuthorSnapshot`] captured at submission
/// time instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar: Option<FileRef>,
}

/// Denormalized author details embedded in an answer at write time.
///
/// This is a snapshot, not a live link: later profile edits do not
/// retroactively change historical answers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
    pub display_name: String,
    pub email: String,
    pub avatar: Option<FileRef>,
}

impl AuthorSnapshot {
    /// Capture a snapshot from the current profile state.
    pub fn capture(profile: &UserProfile) -> Self {
        Self {
            display_name: profile.name.clone(),
            email: profile.email.clone(),
            avatar: profile.avatar.clone(),
        }
    }
}
