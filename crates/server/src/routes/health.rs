use std::sync::Arc;

use axum::{Extension, Json};
use gnubg::Analyzer;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub gnubg_available: bool,
}

/// GET /health
pub async fn health_check(Extension(analyzer): Extension<Arc<Analyzer>>) -> Json<HealthResponse> {
    let gnubg_available = analyzer.is_available().await;

    Json(HealthResponse {
        status: if gnubg_available { "ok" } else { "degraded" },
        gnubg_available,
    })
}
