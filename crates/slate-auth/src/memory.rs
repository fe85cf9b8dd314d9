use std::collections::HashMap;
use std::sync::RwLock;

use rand::RngCore;
use slate_types::UserId;
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::principal::Principal;
use crate::traits::IdentityProvider;

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    user_id: UserId,
    salt: [u8; 16],
    password_hash: [u8; 32],
}

#[derive(Default)]
struct ProviderState {
    /// Accounts keyed by email.
    accounts: HashMap<String, Account>,
    session: Option<Principal>,
}

/// In-memory identity provider for tests and embedding.
///
/// Passwords are stored as salted BLAKE3 digests; user ids are random and
/// stable for the life of the account.
pub struct InMemoryIdentityProvider {
    inner: RwLock<ProviderState>,
}

fn hash_password(salt: &[u8; 16], password: &str) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"slate-password-v1:");
    hasher.update(salt);
    hasher.update(password.as_bytes());
    *hasher.finalize().as_bytes()
}

fn validate_email(email: &str) -> AuthResult<()> {
    let plausible = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !plausible {
        return Err(AuthError::InvalidEmail {
            email: email.to_string(),
        });
    }
    Ok(())
}

impl InMemoryIdentityProvider {
    /// Create a provider with no accounts and no session.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ProviderState::default()),
        }
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").accounts.len()
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn sign_up(&self, email: &str, password: &str) -> AuthResult<Principal> {
        validate_email(email)?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        let mut state = self.inner.write().expect("lock poisoned");
        if state.accounts.contains_key(email) {
            return Err(AuthError::EmailTaken {
                email: email.to_string(),
            });
        }

        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        let mut uid_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut uid_bytes);
        let user_id = UserId::new(format!("uid-{}", hex::encode(uid_bytes)))
            .map_err(|e| AuthError::Backend(e.to_string()))?;

        state.accounts.insert(
            email.to_string(),
            Account {
                user_id: user_id.clone(),
                salt,
                password_hash: hash_password(&salt, password),
            },
        );
        let principal = Principal::new(user_id, email);
        state.session = Some(principal.clone());
        debug!(email, user_id = %principal.user_id, "account created");
        Ok(principal)
    }

    fn sign_in(&self, email: &str, password: &str) -> AuthResult<Principal> {
        let mut state = self.inner.write().expect("lock poisoned");
        let account = state
            .accounts
            .get(email)
            .ok_or(AuthError::InvalidCredentials)?;
        if hash_password(&account.salt, password) != account.password_hash {
            return Err(AuthError::InvalidCredentials);
        }
        let principal = Principal::new(account.user_id.clone(), email);
        state.session = Some(principal.clone());
        debug!(email, "signed in");
        Ok(principal)
    }

    fn sign_out(&self) {
        let mut state = self.inner.write().expect("lock poisoned");
        state.session = None;
    }

    fn current(&self) -> Option<Principal> {
        self.inner.read().expect("lock poisoned").session.clone()
    }
}

impl std::fmt::Debug for InMemoryIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryIdentityProvider")
            .field("account_count", &self.account_count())
            .finish()
    }
}
