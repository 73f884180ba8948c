// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use axum::{routing::get, Router};
use sqlx::SqlitePool;

use handlers::members;

/// Builds the application routes with the pool as shared state
pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/hello", get(members::hello))
        .route("/api/members/search", get(members::search_members))
        .with_state(pool)
}
