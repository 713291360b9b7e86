use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, middleware::metrics_middleware, naming, parser, results};
use crate::metrics::metrics_handler;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Release names
        .route("/parse", post(parser::parse_release))
        // Naming patterns
        .route("/naming/presets", get(naming::presets))
        .route("/naming/test", post(naming::test_pattern))
        .route("/naming/render", post(naming::render_episode))
        .route("/naming/legacy", post(naming::legacy_pattern))
        // Search results
        .route("/results/filter", post(results::filter_results))
        .layer(middleware::from_fn(metrics_middleware))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
