//! Campus dining HTTP server library logic.

pub mod api;
pub mod api_locations;
pub mod api_restaurants;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use campus_db::{DbPool, DbRuntimeSettings, MigrationError, PoolError};
use config::{ConfigError, DatabaseConfig};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Each request checks out its own connection.
    pub pool: DbPool,
}

/// Errors that abort server startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("failed to get database connection for migrations: {0}")]
    Connection(#[from] r2d2::Error),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Opens the database pool and applies pending migrations.
///
/// Any failure here is fatal: the server never starts against a database
/// whose tables could not be created.
pub fn init_database(config: &DatabaseConfig) -> Result<DbPool, StartupError> {
    let pool = campus_db::create_pool(
        &config.path,
        DbRuntimeSettings {
            busy_timeout_ms: config.busy_timeout_ms,
            pool_max_size: config.pool_max_size,
        },
    )?;

    let conn = pool.get()?;
    let applied = campus_db::run_migrations(&conn)?;
    if applied > 0 {
        tracing::info!(count = applied, "applied database migrations");
    }

    Ok(pool)
}

/// Maximum request body size (64 KiB).
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/locations/", get(api_locations::list_locations_handler))
        .route(
            "/restaurants/",
            post(api_restaurants::create_restaurant_handler),
        )
        // GET takes a location id, DELETE a restaurant id.
        .route(
            "/restaurants/{id}/",
            get(api_locations::list_location_restaurants_handler)
                .delete(api_restaurants::delete_restaurant_handler),
        )
        .route(
            "/restaurant/{restaurantId}/",
            get(api_restaurants::get_restaurant_handler),
        )
        .route(
            "/restaurant/{restaurantId}/reviews/",
            post(api_restaurants::create_review_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
