/// Common test utilities for the API integration tests.
///
/// Builds the full router over the in-memory credential store, so the
/// suite drives real HTTP semantics without a database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::Service as _;

use travellog_api::app::{build_router, AppState};
use travellog_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use travellog_shared::auth::store::MemoryCredentialStore;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryCredentialStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_ttl_minutes(30)
    }

    /// A context whose token codec uses the given ttl; a negative value
    /// makes every issued token already expired.
    pub fn with_ttl_minutes(ttl_minutes: i64) -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgresql://unused-in-tests".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                issuer: "travellog".to_string(),
                ttl_minutes,
            },
        };

        let store = Arc::new(MemoryCredentialStore::new());
        let app = build_router(AppState::new(store.clone(), config));

        Self { app, store }
    }

    pub async fn request(&mut self, req: Request<Body>) -> Response {
        self.app.call(req).await.unwrap()
    }

    /// Registers an account and returns the response body.
    pub async fn register(&mut self, fullname: &str, email: &str, password: &str) -> Value {
        let res = self
            .request(post_json(
                "/api/v1/auth/register",
                json!({ "fullname": fullname, "email": email, "password": password }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        body_json(res).await
    }

    /// Logs in and returns the response body.
    pub async fn login(&mut self, email: &str, password: &str) -> Value {
        let res = self
            .request(post_json(
                "/api/v1/auth/login",
                json!({ "email": email, "password": password }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        body_json(res).await
    }

    /// Logs in and returns just the bearer token.
    pub async fn login_token(&mut self, email: &str, password: &str) -> String {
        self.login(email, password).await["token"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn put_json(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
