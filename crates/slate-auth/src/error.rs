/// Errors from identity provider operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account already exists for the email.
    #[error("an account already exists for {email}")]
    EmailTaken { email: String },

    /// The email is not a plausible address.
    #[error("invalid email address: {email:?}")]
    InvalidEmail { email: String },

    /// The password is below the provider's minimum length.
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// The underlying provider failed.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for identity provider operations.
pub type AuthResult<T> = Result<T, AuthError>;
