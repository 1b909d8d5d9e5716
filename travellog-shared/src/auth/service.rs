/// Registration, login, and profile updates.
///
/// [`AuthService`] orchestrates the password hasher and the credential
/// store. It performs no transport I/O and returns typed failures
/// throughout; mapping them to HTTP statuses is the API layer's concern.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::password::{self, PasswordError};
use crate::auth::store::{CredentialStore, StoreError};
use crate::models::user::{Credentials, NewUser, ProfilePatch, User};

/// Error type for authentication operations. All variants are expected,
/// reportable outcomes, never process-fatal.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The email is already bound to an account
    #[error("email is already registered")]
    DuplicateEmail,

    /// No account exists for the given email
    #[error("no account exists for this email")]
    NoSuchUser,

    /// The account exists but the password does not verify
    #[error("password does not match")]
    PasswordMismatch,

    /// The current password supplied with a profile update does not verify
    #[error("current password could not be verified")]
    ReauthenticationFailed,

    #[error(transparent)]
    Hash(#[from] PasswordError),

    /// Credential store failure other than a uniqueness rejection
    #[error("credential store failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AuthError::DuplicateEmail,
            other => AuthError::Store(other),
        }
    }
}

/// Orchestrates credential verification against a [`CredentialStore`].
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Creates a new account from a registration candidate.
    ///
    /// The candidate's admin flag is discarded: accounts cannot
    /// self-elevate at registration. The plaintext password is hashed
    /// before anything touches the store.
    pub async fn register(&self, candidate: NewUser) -> Result<User, AuthError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            fullname: candidate.fullname,
            email: candidate.email,
            password_hash: password::hash_password(&candidate.password)?,
            is_admin: false,
            lang_code: None,
            created_at: now,
            updated_at: now,
        };

        self.store.save(&user).await?;
        Ok(user)
    }

    /// Verifies credentials and returns the stored record on success.
    ///
    /// An unknown email and a wrong password fail with distinct reasons,
    /// matching the service's established wire contract.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let Some(user) = self.store.find_by_email(&credentials.email).await? else {
            return Err(AuthError::NoSuchUser);
        };

        if !password::verify_password(&credentials.password, &user.password_hash) {
            return Err(AuthError::PasswordMismatch);
        }

        Ok(user)
    }

    /// Applies a partial update to a user's profile.
    ///
    /// The caller must supply the account's current plaintext password,
    /// verified against the stored hash before any field changes; a valid
    /// session token alone is not enough. Absent patch fields keep their
    /// stored values. A missing record fails the same way a bad password
    /// does, without touching the store.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        patch: ProfilePatch,
        current_password: &str,
    ) -> Result<User, AuthError> {
        let Some(mut user) = self.store.find_by_id(user_id).await? else {
            return Err(AuthError::ReauthenticationFailed);
        };

        if !password::verify_password(current_password, &user.password_hash) {
            return Err(AuthError::ReauthenticationFailed);
        }

        if let Some(fullname) = patch.fullname {
            user.fullname = fullname;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(lang_code) = patch.lang_code {
            user.lang_code = Some(lang_code);
        }
        if let Some(new_password) = patch.password {
            // An empty replacement is treated as "no change".
            if !new_password.is_empty() {
                user.password_hash = password::hash_password(&new_password)?;
            }
        }
        user.updated_at = Utc::now();

        self.store.save(&user).await?;
        Ok(user)
    }
}
