/// Profile endpoints.
///
/// # Endpoints
///
/// - `GET /api/v1/my-profile` - the caller's own profile
/// - `PUT /api/v1/users/:id` - partial profile update, gated on
///   owner-or-admin and on reauthentication with the account's current
///   password

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use travellog_shared::auth::{
    authorization::{authorize_owner_or_admin, Identity},
    service::AuthError,
};
use travellog_shared::models::user::{ProfilePatch, UserProfile};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::StatusResponse,
};

/// Profile update request. Omitted fields keep their stored values;
/// `oldpassword` is the account's current password and is always required.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub fullname: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub lang_code: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    #[serde(rename = "oldpassword")]
    pub old_password: String,
}

/// Returns the caller's profile, re-read from the store.
pub async fn my_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .store
        .find_by_id(identity.user_id)
        .await?
        .ok_or(ApiError::NotFound("USER_NOT_FOUND"))?;

    Ok(Json(user.into()))
}

/// Applies a partial update to the addressed user's profile.
///
/// The owner-or-admin gate runs first; a denial, like a failed
/// reauthentication, is reported as a false status flag rather than an
/// error status, matching the mutation contract of the other update
/// routes.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<StatusResponse>> {
    req.validate().map_err(ApiError::from)?;

    if authorize_owner_or_admin(&identity, user_id).is_err() {
        return Ok(Json(StatusResponse::new(false, "DATA_UPDATE_FAILED")));
    }

    let patch = ProfilePatch {
        fullname: req.fullname,
        email: req.email,
        lang_code: req.lang_code,
        password: req.password,
    };

    match state
        .auth
        .update_profile(user_id, patch, &req.old_password)
        .await
    {
        Ok(_) => Ok(Json(StatusResponse::new(true, "DATA_UPDATE_SUCCESS"))),
        Err(AuthError::ReauthenticationFailed) => {
            Ok(Json(StatusResponse::new(false, "DATA_UPDATE_FAILED")))
        }
        Err(err) => Err(err.into()),
    }
}
