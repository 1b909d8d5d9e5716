/// Identity resolution and the ownership gate.
///
/// [`RequestAuthorizer`] turns a bearer token into an [`Identity`] by
/// decoding the token and re-fetching the user record it names. The admin
/// flag always comes from the store, never from the token, so a role change
/// takes effect on the next request instead of at token expiry.
///
/// [`authorize_owner_or_admin`] is the single gate for mutating operations.
/// Every handler that mutates or deactivates a resource (profile updates
/// here; trips, destinations, and memberships in the data layer) calls this
/// one function rather than repeating the check inline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::store::{CredentialStore, StoreError};
use crate::auth::token::{TokenCodec, TokenError};

/// Error type for authentication and authorization checks.
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// No usable credentials, or the token's subject no longer resolves
    #[error("request is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    InvalidToken(#[from] TokenError),

    /// The caller is neither the resource owner nor an admin
    #[error("not authorized to modify this resource")]
    Forbidden,

    #[error("credential store failure: {0}")]
    Store(#[from] StoreError),
}

/// The authenticated caller of a request, derived from a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// Resolves bearer tokens into identities.
///
/// Token issuance and verification are pure; the only I/O here is the user
/// lookup, so the authorizer is safe to clone and share across requests.
#[derive(Clone)]
pub struct RequestAuthorizer {
    codec: TokenCodec,
    store: Arc<dyn CredentialStore>,
}

impl RequestAuthorizer {
    pub fn new(codec: TokenCodec, store: Arc<dyn CredentialStore>) -> Self {
        Self { codec, store }
    }

    /// Resolves a bearer token into the caller's current identity.
    ///
    /// Fails if the token does not verify or if its subject no longer
    /// exists in the store. The token string is an explicit parameter;
    /// extracting it from a transport request is the caller's job.
    pub async fn resolve(&self, bearer_token: &str) -> Result<Identity, AuthzError> {
        let claims = self.codec.decode(bearer_token)?;

        let user = self
            .store
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthzError::Unauthenticated)?;

        Ok(Identity {
            user_id: user.id,
            is_admin: user.is_admin,
        })
    }
}

/// Allows a mutating operation only for the resource owner or an admin.
///
/// ```
/// use travellog_shared::auth::authorization::{authorize_owner_or_admin, Identity};
/// use uuid::Uuid;
///
/// let owner = Uuid::new_v4();
/// let caller = Identity { user_id: owner, is_admin: false };
/// assert!(authorize_owner_or_admin(&caller, owner).is_ok());
/// assert!(authorize_owner_or_admin(&caller, Uuid::new_v4()).is_err());
/// ```
pub fn authorize_owner_or_admin(
    identity: &Identity,
    resource_owner_id: Uuid,
) -> Result<(), AuthzError> {
    if identity.user_id == resource_owner_id || identity.is_admin {
        Ok(())
    } else {
        Err(AuthzError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemoryCredentialStore;
    use crate::models::user::User;
    use chrono::{Duration, Utc};

    const SECRET: &str = "authorizer-test-secret-0123456789ab";

    fn test_user(is_admin: bool) -> User {
        let now = Utc::now();
        let id = Uuid::new_v4();
        User {
            id,
            fullname: "Priya Shah".to_string(),
            email: format!("{id}@example.com"),
            password_hash: "$argon2id$stub".to_string(),
            is_admin,
            lang_code: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn authorizer(ttl: Duration) -> (RequestAuthorizer, TokenCodec, Arc<MemoryCredentialStore>) {
        let codec = TokenCodec::new(SECRET, "travellog", ttl);
        let store = Arc::new(MemoryCredentialStore::new());
        (
            RequestAuthorizer::new(codec.clone(), store.clone()),
            codec,
            store,
        )
    }

    #[test]
    fn gate_allows_owner_denies_stranger_allows_admin() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let caller = Identity { user_id: owner, is_admin: false };
        assert!(authorize_owner_or_admin(&caller, owner).is_ok());
        assert!(matches!(
            authorize_owner_or_admin(&caller, other),
            Err(AuthzError::Forbidden)
        ));

        let admin = Identity { user_id: owner, is_admin: true };
        assert!(authorize_owner_or_admin(&admin, other).is_ok());
    }

    #[tokio::test]
    async fn resolve_reads_the_live_admin_flag() {
        let (authorizer, codec, store) = authorizer(Duration::minutes(30));
        let user = test_user(false);
        store.save(&user).await.unwrap();

        let token = codec.issue(user.id).unwrap();
        let identity = authorizer.resolve(&token).await.unwrap();
        assert_eq!(identity.user_id, user.id);
        assert!(!identity.is_admin);

        // Promote the user; the same token now resolves with the new role.
        let mut promoted = user.clone();
        promoted.is_admin = true;
        store.save(&promoted).await.unwrap();

        assert!(authorizer.resolve(&token).await.unwrap().is_admin);
    }

    #[tokio::test]
    async fn resolve_rejects_a_token_for_an_unknown_subject() {
        let (authorizer, codec, _store) = authorizer(Duration::minutes(30));

        let token = codec.issue(Uuid::new_v4()).unwrap();
        let err = authorizer.resolve(&token).await.unwrap_err();
        assert!(matches!(err, AuthzError::Unauthenticated));
    }

    #[tokio::test]
    async fn resolve_rejects_expired_and_corrupted_tokens() {
        let (authorizer, codec, store) = authorizer(Duration::minutes(-5));
        let user = test_user(false);
        store.save(&user).await.unwrap();

        let token = codec.issue(user.id).unwrap();
        let err = authorizer.resolve(&token).await.unwrap_err();
        assert!(matches!(err, AuthzError::InvalidToken(TokenError::Expired)));

        let err = authorizer.resolve("garbage.token.here").await.unwrap_err();
        assert!(matches!(err, AuthzError::InvalidToken(_)));
    }
}
