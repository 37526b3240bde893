use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{feed::FeedController, health},
    infrastructure::auth::{optional_auth_middleware, request_id_middleware},
};

/// Assemble all routes and layers
pub fn build_router(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    feed_controller: Arc<FeedController>,
) -> Router {
    // Feed routes (identity optional)
    let feed_routes = Router::new()
        .route("/api/content/feed", get(FeedController::get_feed))
        .with_state(feed_controller)
        .layer(middleware::from_fn_with_state(
            config,
            optional_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(feed_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    feed_controller: Arc<FeedController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let address = format!("{}:{}", config.host, config.port);
    let app = build_router(pool, config, feed_controller);

    let listener = tokio::net::TcpListener::bind(address).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
