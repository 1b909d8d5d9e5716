/// Password hashing built on Argon2id.
///
/// Hashes are emitted in PHC string format, so the salt and cost parameters
/// travel with the hash and verification needs no extra configuration. The
/// cost factors live in one place here and can be raised without touching
/// stored hashes.
///
/// # Example
///
/// ```
/// use travellog_shared::auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("correct horse battery").unwrap();
/// assert!(verify_password("correct horse battery", &hash));
/// assert!(!verify_password("incorrect horse", &hash));
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for hashing operations.
///
/// Verification deliberately has no error type: see [`verify_password`].
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to produce a hash
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Hashes a plaintext password with a fresh random salt.
///
/// Two calls with the same input produce different outputs; equality of
/// hashes is never meaningful, only [`verify_password`] is.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    // m_cost in KiB. These track the current OWASP baseline for Argon2id.
    let params = ParamsBuilder::new()
        .m_cost(19_456)
        .t_cost(2)
        .p_cost(1)
        .build()
        .map_err(|e| PasswordError::Hash(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC-format hash.
///
/// Comparison is constant-time inside the argon2 crate. A malformed or
/// truncated hash verifies as `false` rather than surfacing an error, so a
/// damaged record can never be interpreted as a match and callers on the
/// login path have exactly one failure mode to handle.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    // Parameters come from the parsed hash, not from this instance.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
