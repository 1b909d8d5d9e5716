/// Registration and login endpoints.
///
/// # Endpoints
///
/// - `POST /api/v1/auth/register` - create an account
/// - `POST /api/v1/auth/login` - verify credentials and issue a token

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use travellog_shared::models::user::{Credentials, NewUser, UserProfile};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Register request.
///
/// `isAdmin` is accepted for wire compatibility but has no effect; the
/// service forces new accounts to non-admin.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub fullname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub is_admin: bool,
}

/// Register response: the created account, without its hash.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub status: bool,
    pub user: UserProfile,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Login response.
///
/// `isAdmin` here is informational for the client UI; authorization always
/// re-resolves the flag server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub is_admin: bool,
    pub user_id: Uuid,
}

/// Registers a new user.
///
/// # Errors
///
/// - `409 Conflict` with `DUPLICATE_EMAIL` if the email is taken
/// - `422 Unprocessable Entity` on validation failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate().map_err(ApiError::from)?;

    let user = state
        .auth
        .register(NewUser {
            fullname: req.fullname,
            email: req.email,
            password: req.password,
            is_admin: req.is_admin,
        })
        .await?;

    Ok(Json(RegisterResponse {
        status: true,
        user: user.into(),
    }))
}

/// Verifies credentials and returns a fresh bearer token.
///
/// # Errors
///
/// - `401 Unauthorized` with `NO_USER` or `PASSWORD_MISSMATCH`
/// - `422 Unprocessable Entity` on validation failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(ApiError::from)?;

    let user = state
        .auth
        .login(&Credentials {
            email: req.email,
            password: req.password,
        })
        .await?;

    let token = state.tokens.issue(user.id)?;

    Ok(Json(LoginResponse {
        token,
        is_admin: user.is_admin,
        user_id: user.id,
    }))
}
