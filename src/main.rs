mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Context;
use axum::{Router, middleware, routing::any};
use config::Config;
use state::AppState;
use std::sync::Arc;
use store::RedisStore;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// Every path is routed to the method dispatcher; there are no reserved
/// paths, since the whole path namespace belongs to store keys.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(routes::ROOT, any(handlers::root))
        .route(routes::KEY, any(handlers::keyed))
        .layer(middleware::from_fn(handlers::cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    tracing::info!("rust-redis-kv starting");

    let config = Arc::new(Config::from_env()?);
    config.log_startup();

    let store = RedisStore::connect(&config).await?;

    let state = AppState {
        store: Arc::new(store),
        config: config.clone(),
    };

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
