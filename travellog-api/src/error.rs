/// Error handling for the API server.
///
/// Handlers return `ApiResult<T>`; every failure converts into an
/// [`ApiError`], which maps to an HTTP status and a JSON body of the form
/// `{ "message": "..." }`. The message strings are the service's stable
/// reason codes (`NO_USER`, `PASSWORD_MISSMATCH`, `TOKEN_PARSE_FAILED`,
/// ...); internal details are logged, never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use travellog_shared::auth::{
    authorization::AuthzError, service::AuthError, store::StoreError, token::TokenError,
};
use validator::ValidationErrors;

/// API result type alias.
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type.
#[derive(Debug)]
pub enum ApiError {
    /// 401 with a reason code
    Unauthorized(&'static str),

    /// 403, ownership/admin denial
    Forbidden,

    /// 404
    NotFound(&'static str),

    /// 409, e.g. duplicate email
    Conflict(&'static str),

    /// 422, request body validation failures
    Validation(Vec<ValidationErrorDetail>),

    /// 500; the detail is logged server-side only
    Internal(String),
}

/// A single field validation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub message: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(code) => write!(f, "unauthorized: {code}"),
            ApiError::Forbidden => write!(f, "forbidden"),
            ApiError::NotFound(code) => write!(f, "not found: {code}"),
            ApiError::Conflict(code) => write!(f, "conflict: {code}"),
            ApiError::Validation(errors) => write!(f, "validation failed: {} errors", errors.len()),
            ApiError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::Unauthorized(code) => (StatusCode::UNAUTHORIZED, code.to_string(), None),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN".to_string(), None),
            ApiError::NotFound(code) => (StatusCode::NOT_FOUND, code.to_string(), None),
            ApiError::Conflict(code) => (StatusCode::CONFLICT, code.to_string(), None),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED".to_string(),
                Some(errors),
            ),
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { message, details })).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateEmail => ApiError::Conflict("DUPLICATE_EMAIL"),
            AuthError::NoSuchUser => ApiError::Unauthorized("NO_USER"),
            AuthError::PasswordMismatch => ApiError::Unauthorized("PASSWORD_MISSMATCH"),
            AuthError::ReauthenticationFailed => ApiError::Unauthorized("REAUTHENTICATION_FAILED"),
            AuthError::Hash(e) => ApiError::Internal(e.to_string()),
            AuthError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Unauthenticated | AuthzError::InvalidToken(_) => {
                ApiError::Unauthorized("TOKEN_PARSE_FAILED")
            }
            AuthzError::Forbidden => ApiError::Forbidden,
            AuthzError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::Conflict("DUPLICATE_EMAIL"),
            StoreError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        // Decode failures surface through AuthzError; reaching here means
        // signing failed, which is a server fault.
        ApiError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "validation failed".to_string()),
                })
            })
            .collect();

        ApiError::Validation(details)
    }
}
