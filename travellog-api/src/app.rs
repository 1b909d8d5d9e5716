/// Application state and router builder.
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /                          # liveness (public)
/// ├── GET  /heartbeat                 # liveness (public)
/// └── /api/v1/
///     ├── /auth/
///     │   ├── POST /register          # public
///     │   └── POST /login             # public
///     ├── GET  /my-profile            # authenticated
///     └── PUT  /users/:id             # authenticated + owner-or-admin
/// ```
///
/// Protected routes sit behind the identity middleware; handlers receive
/// the resolved `Identity` from request extensions and apply the
/// owner-or-admin gate themselves where they mutate state.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use travellog_shared::auth::{
    authorization::RequestAuthorizer, middleware::create_identity_middleware,
    service::AuthService, store::CredentialStore, token::TokenCodec,
};

use crate::{config::Config, routes};

/// Shared application state, cloned per request via axum's `State`.
#[derive(Clone)]
pub struct AppState {
    /// Credential persistence seam; Postgres in production, in-memory in
    /// tests
    pub store: Arc<dyn CredentialStore>,

    pub auth: AuthService,

    pub tokens: TokenCodec,

    pub authorizer: RequestAuthorizer,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, config: Config) -> Self {
        let tokens = TokenCodec::new(
            config.jwt.secret.clone(),
            config.jwt.issuer.clone(),
            config.token_ttl(),
        );

        Self {
            auth: AuthService::new(store.clone()),
            authorizer: RequestAuthorizer::new(tokens.clone(), store.clone()),
            tokens,
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete axum router.
pub fn build_router(state: AppState) -> Router {
    let heartbeat_routes = Router::new()
        .route("/", get(routes::health::heartbeat))
        .route("/heartbeat", get(routes::health::heartbeat));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let protected_routes = Router::new()
        .route("/my-profile", get(routes::users::my_profile))
        .route("/users/:id", put(routes::users::update_profile))
        .layer(middleware::from_fn(create_identity_middleware(
            state.authorizer.clone(),
        )));

    Router::new()
        .merge(heartbeat_routes)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1", protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
