/// Authentication middleware for axum.
///
/// Extracts the bearer token from the `Authorization` header, resolves it
/// through [`RequestAuthorizer`], and inserts the resulting
/// [`Identity`](super::authorization::Identity) into request extensions for
/// handlers to extract with `Extension<Identity>`.
///
/// This is a hard gate: if extraction, decoding, or re-resolution fails the
/// request is answered with 401 and a `TOKEN_PARSE_FAILED` message, and the
/// inner handler never runs.

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::authorization::RequestAuthorizer;

#[derive(Debug, Serialize)]
struct RejectionBody {
    message: &'static str,
}

/// Enforces authentication on a request and forwards it with its resolved
/// identity attached.
pub async fn identity_middleware(
    authorizer: RequestAuthorizer,
    mut req: Request,
    next: Next,
) -> Response {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let identity = match bearer {
        Some(token) => match authorizer.resolve(token).await {
            Ok(identity) => Some(identity),
            Err(err) => {
                // The token itself is never logged.
                tracing::debug!(error = %err, "rejected bearer token");
                None
            }
        },
        None => None,
    };

    match identity {
        Some(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(RejectionBody {
                message: "TOKEN_PARSE_FAILED",
            }),
        )
            .into_response(),
    }
}

/// Captures an authorizer and returns a middleware closure for
/// `axum::middleware::from_fn`.
pub fn create_identity_middleware(
    authorizer: RequestAuthorizer,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone {
    move |req, next| {
        let authorizer = authorizer.clone();
        Box::pin(identity_middleware(authorizer, req, next))
    }
}
