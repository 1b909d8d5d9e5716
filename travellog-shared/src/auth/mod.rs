/// Authentication and authorization for the travel log service.
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: signed, time-limited bearer token issuance and validation
/// - [`store`]: the credential persistence seam (Postgres and in-memory)
/// - [`service`]: registration, login, and reauthenticated profile updates
/// - [`authorization`]: identity resolution and the owner-or-admin gate
/// - [`middleware`]: axum layer enforcing authentication on protected routes
///
/// # Design
///
/// Tokens carry only the subject identifier. The caller's admin flag is
/// re-resolved from the credential store on every protected request, so a
/// role change applies immediately instead of waiting for token expiry.

pub mod authorization;
pub mod middleware;
pub mod password;
pub mod service;
pub mod store;
pub mod token;
