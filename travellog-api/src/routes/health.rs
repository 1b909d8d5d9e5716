/// Liveness endpoint.
///
/// # Endpoint
///
/// ```text
/// GET /
/// GET /heartbeat
/// ```
///
/// Response:
/// ```json
/// { "status": true, "message": "Server running..." }
/// ```

use axum::Json;

use super::StatusResponse;

pub async fn heartbeat() -> Json<StatusResponse> {
    Json(StatusResponse::new(true, "Server running..."))
}
