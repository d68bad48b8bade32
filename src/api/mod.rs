//! API handlers for the homepage REST endpoints

pub mod health;
pub mod openapi;
pub mod profile;
pub mod publications;
pub mod students;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Upstream passthrough
        .route("/publications.json", get(publications::proxy))
        // Publications browser
        .route("/publications", get(publications::browse))
        .route("/publications/by-year", get(publications::by_year))
        .route("/citations/:index", get(publications::citation))
        // Students
        .route("/students", get(students::list_students))
        // Profile
        .route("/profile", get(profile::get_profile))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
