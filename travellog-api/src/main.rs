//! # TravelLog API Server
//!
//! HTTP entry point for the travel-log backend. Wires configuration, the
//! Postgres credential store, and the auth core into an axum application.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p travellog-api
//! ```

use std::sync::Arc;

use travellog_api::{
    app::{build_router, AppState},
    config::Config,
};
use travellog_shared::{
    auth::store::PgCredentialStore,
    db::pool::{create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travellog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "TravelLog API v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    let store = Arc::new(PgCredentialStore::new(pool));

    let addr = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
