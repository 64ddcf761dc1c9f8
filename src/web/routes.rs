//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Main routes
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search_form).post(handlers::search))
        .route("/results", get(handlers::results))
        .route("/apply_filter", post(handlers::apply_filter))
        .route("/museums", get(handlers::museums))
        .route("/about", get(handlers::about))
        // API routes
        .route("/health", get(handlers::health))
        // Static assets (the no-image placeholder)
        .nest_service("/static", ServeDir::new("static"))
        // Add middleware
        .layer(cors)
        // Add state
        .with_state(state)
}
