//! Read-only HTTP projection over the QPL dataset.
//!
//! The dataset is loaded once and handed to [`build_router`]; every request
//! reads from that same immutable collection.

pub mod config;
pub mod dataset;
pub mod error;
pub mod routes;

use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dataset::QplDataset;

/// Build the full application router for the given dataset
pub fn build_router(dataset: QplDataset) -> Router {
    let router = Router::new()
        .route("/", get(routes::health))
        .route(
            "/api/v1/qpl",
            get(routes::list_qpl).fallback(routes::not_found),
        )
        .route(
            "/api/v1/qpl/",
            get(routes::list_qpl).fallback(routes::not_found),
        )
        .fallback(routes::not_found)
        .with_state(dataset);

    with_middleware(router)
}

/// Request tracing, CORS and the trailing panic-to-500 stage
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(error::panic_response))
}
