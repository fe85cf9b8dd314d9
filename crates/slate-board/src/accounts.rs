use std::sync::Arc;

use slate_auth::{IdentityProvider, Principal};
use slate_docs::DocumentStore;
use slate_files::BlobStore;
use slate_types::{AuthorSnapshot, UserId, UserProfile};
use tracing::debug;

use crate::encode;
use crate::error::{BoardError, BoardResult};
use crate::paths;
use crate::upload::NewFile;

/// Account registration, sessions, and user profile documents.
///
/// Registration couples the identity provider with the profile document the
/// rest of the board reads: the provider issues the principal, the profile
/// lives at `users/{uid}`. Answers embed a snapshot of the profile rather
/// than linking to it, which [`snapshot_author`](Self::snapshot_author)
/// captures.
#[derive(Clone)]
pub struct Accounts {
    auth: Arc<dyn IdentityProvider>,
    docs: Arc<dyn DocumentStore>,
    files: Arc<dyn BlobStore>,
}

impl Accounts {
    /// Build an accounts service over injected clients.
    pub fn new(
        auth: Arc<dyn IdentityProvider>,
        docs: Arc<dyn DocumentStore>,
        files: Arc<dyn BlobStore>,
    ) -> Self {
        Self { auth, docs, files }
    }

    /// Create an account: provider sign-up, optional avatar upload, then
    /// the profile document. The avatar upload precedes the document write
    /// so the profile never claims a missing blob.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        avatar: Option<NewFile>,
    ) -> BoardResult<Principal> {
        if name.trim().is_empty() {
            return Err(BoardError::Validation {
                reason: "display name is required".into(),
            });
        }
        let principal = self.auth.sign_up(email, password)?;

        let avatar_ref = match avatar {
            Some(file) => Some(self.files.put(
                &paths::avatar_blob_path(&principal.user_id, file.name()),
                file.bytes(),
            )?),
            None => None,
        };
        let profile = UserProfile {
            name: name.to_string(),
            email: email.to_string(),
            avatar: avatar_ref,
        };
        self.docs
            .set(&paths::user_doc(&principal.user_id)?, encode(&profile)?)?;
        debug!(user = %principal.user_id, "account registered");
        Ok(principal)
    }

    /// Verify credentials and start a session.
    pub fn sign_in(&self, email: &str, password: &str) -> BoardResult<Principal> {
        Ok(self.auth.sign_in(email, password)?)
    }

    /// End the current session.
    pub fn sign_out(&self) {
        self.auth.sign_out();
    }

    /// The currently signed-in principal, if any.
    pub fn current(&self) -> Option<Principal> {
        self.auth.current()
    }

    /// Fetch a user's profile document.
    pub fn profile(&self, user: &UserId) -> BoardResult<UserProfile> {
        self.docs
            .get(&paths::user_doc(user)?)?
            .ok_or_else(|| BoardError::NotFound {
                entity: "user profile",
                id: user.to_string(),
            })?
            .decode()
            .map_err(BoardError::from)
    }

    /// Update the display name and/or avatar on a profile.
    pub fn update_profile(
        &self,
        user: &UserId,
        new_name: Option<&str>,
        new_avatar: Option<NewFile>,
    ) -> BoardResult<UserProfile> {
        let mut profile = self.profile(user)?;
        if let Some(name) = new_name {
            if name.trim().is_empty() {
                return Err(BoardError::Validation {
                    reason: "display name is required".into(),
                });
            }
            profile.name = name.to_string();
        }
        if let Some(file) = new_avatar {
            profile.avatar = Some(
                self.files
                    .put(&paths::avatar_blob_path(user, file.name()), file.bytes())?,
            );
        }
        self.docs.set(&paths::user_doc(user)?, encode(&profile)?)?;
        debug!(user = %user, "profile updated");
        Ok(profile)
    }

    /// Capture the denormalized author snapshot embedded in new answers.
    pub fn snapshot_author(&self, user: &UserId) -> BoardResult<AuthorSnapshot> {
        Ok(AuthorSnapshot::capture(&self.profile(user)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_auth::{AuthError, InMemoryIdentityProvider};
    use slate_docs::InMemoryDocStore;
    use slate_files::InMemoryBlobStore;

    struct Fixture {
        accounts: Accounts,
        files: Arc<InMemoryBlobStore>,
    }

    fn fixture() -> Fixture {
        let auth = Arc::new(InMemoryIdentityProvider::new());
        let docs = Arc::new(InMemoryDocStore::new());
        let files = Arc::new(InMemoryBlobStore::new());
        Fixture {
            accounts: Accounts::new(auth, docs, files.clone()),
            files,
        }
    }

    fn avatar() -> NewFile {
        NewFile::new("me.png", b"png".to_vec()).unwrap()
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    #[test]
    fn register_writes_profile_document() {
        let fx = fixture();
        let principal = fx
            .accounts
            .register("ada@example.edu", "hunter22", "Ada", None)
            .unwrap();
        let profile = fx.accounts.profile(&principal.user_id).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.email, "ada@example.edu");
        assert!(profile.avatar.is_none());
    }

    #[test]
    fn register_uploads_avatar() {
        let fx = fixture();
        let principal = fx
            .accounts
            .register("ada@example.edu", "hunter22", "Ada", Some(avatar()))
            .unwrap();
        let profile = fx.accounts.profile(&principal.user_id).unwrap();
        let avatar_ref = profile.avatar.expect("avatar stored");
        assert!(fx.files.exists(&avatar_ref).unwrap());
    }

    #[test]
    fn register_requires_name() {
        let fx = fixture();
        let err = fx
            .accounts
            .register("ada@example.edu", "hunter22", "  ", None)
            .unwrap_err();
        assert!(matches!(err, BoardError::Validation { .. }));
    }

    #[test]
    fn provider_failure_surfaces_as_auth_error() {
        let fx = fixture();
        fx.accounts
            .register("ada@example.edu", "hunter22", "Ada", None)
            .unwrap();
        let err = fx
            .accounts
            .register("ada@example.edu", "hunter22", "Imposter", None)
            .unwrap_err();
        assert!(matches!(err, BoardError::Auth(AuthError::EmailTaken { .. })));
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    #[test]
    fn sign_in_and_out() {
        let fx = fixture();
        let created = fx
            .accounts
            .register("ada@example.edu", "hunter22", "Ada", None)
            .unwrap();
        fx.accounts.sign_out();
        assert!(fx.accounts.current().is_none());

        let signed_in = fx.accounts.sign_in("ada@example.edu", "hunter22").unwrap();
        assert_eq!(signed_in.user_id, created.user_id);
        assert_eq!(fx.accounts.current(), Some(signed_in));
    }

    // -----------------------------------------------------------------------
    // Profiles and snapshots
    // -----------------------------------------------------------------------

    #[test]
    fn missing_profile_is_not_found() {
        let fx = fixture();
        let ghost = UserId::new("uid-ghost").unwrap();
        let err = fx.accounts.profile(&ghost).unwrap_err();
        assert!(matches!(err, BoardError::NotFound { entity: "user profile", .. }));
    }

    #[test]
    fn update_profile_changes_name_and_avatar() {
        let fx = fixture();
        let principal = fx
            .accounts
            .register("ada@example.edu", "hunter22", "Ada", None)
            .unwrap();
        let updated = fx
            .accounts
            .update_profile(&principal.user_id, Some("Countess"), Some(avatar()))
            .unwrap();
        assert_eq!(updated.name, "Countess");
        assert!(updated.avatar.is_some());
        assert_eq!(fx.accounts.profile(&principal.user_id).unwrap(), updated);
    }

    #[test]
    fn snapshot_is_frozen_at_capture_time() {
        let fx = fixture();
        let principal = fx
            .accounts
            .register("ada@example.edu", "hunter22", "Ada", None)
            .unwrap();
        let snap = fx.accounts.snapshot_author(&principal.user_id).unwrap();
        fx.accounts
            .update_profile(&principal.user_id, Some("Countess"), None)
            .unwrap();
        // The earlier snapshot still carries the old name.
        assert_eq!(snap.display_name, "Ada");
        let fresh = fx.accounts.snapshot_author(&principal.user_id).unwrap();
        assert_eq!(fresh.display_name, "Countess");
    }
}
