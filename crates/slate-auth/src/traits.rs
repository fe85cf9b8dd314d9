use crate::error::AuthResult;
use crate::principal::Principal;

/// External identity provider: account creation, credential verification,
/// and the current session principal.
///
/// Implementations hold the session; callers never see credentials again
/// after sign-in, only the [`Principal`].
pub trait IdentityProvider: Send + Sync {
    /// Create an account and start a session for it.
    fn sign_up(&self, email: &str, password: &str) -> AuthResult<Principal>;

    /// Verify credentials and start a session.
    fn sign_in(&self, email: &str, password: &str) -> AuthResult<Principal>;

    /// End the current session, if any.
    fn sign_out(&self);

    /// The currently signed-in principal, if any.
    fn current(&self) -> Option<Principal>;
}
