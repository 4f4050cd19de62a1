pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use gnubg::Analyzer;
use tower_http::cors::{Any, CorsLayer};

/// Build the HTTP router around a shared analyzer.
pub fn app(analyzer: Arc<Analyzer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // SGF input
        .route("/evaluate", post(routes::analysis::evaluate))
        .route("/hint", post(routes::analysis::hint))
        .route("/cube", post(routes::analysis::cube))
        // Position ID input
        .route("/eval-native", post(routes::native::eval_native))
        .route("/hint-native", post(routes::native::hint_native))
        .route("/cube-native", post(routes::native::cube_native))
        // Raw passthrough
        .route("/execute", post(routes::execute::execute))
        .layer(Extension(analyzer))
        .layer(cors)
}
