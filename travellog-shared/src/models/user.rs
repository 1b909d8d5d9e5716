/// User account model and the request-scoped shapes derived from it.
///
/// The stored record keeps the password only as an Argon2id hash. Anything
/// that leaves the service goes through [`UserProfile`], which has no hash
/// field at all, so the hash cannot end up in a response by accident.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user account.
///
/// `email` is the unique login key; uniqueness is owned by the credential
/// store, not by this type.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    /// Argon2id PHC string, never plaintext
    pub password_hash: String,
    pub is_admin: bool,
    /// Preferred locale, e.g. "de" or "en-GB"
    pub lang_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration candidate, as submitted by a client.
///
/// The admin flag is accepted on the wire for compatibility but the service
/// discards it: a fresh registration is never an admin.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Login credentials. Request-scoped; never persisted or logged.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Partial profile update. `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub lang_code: Option<String>,
    /// Plaintext replacement password; re-hashed before storage
    pub password: Option<String>,
}

/// Outward-facing representation of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub is_admin: bool,
    pub lang_code: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
            is_admin: user.is_admin,
            lang_code: user.lang_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_carries_no_password_material() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            fullname: "Mara Voss".to_string(),
            email: "mara@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            is_admin: false,
            lang_code: Some("de".to_string()),
            created_at: now,
            updated_at: now,
        };

        let profile = UserProfile::from(user.clone());
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.email, user.email);

        let json = serde_json::to_value(&profile).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.contains(&"isAdmin"));
        assert!(keys.contains(&"langCode"));
        assert!(!json.to_string().contains("argon2id"));
    }
}
