use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, Extension, Json};
use gnubg::{Analyzer, CommandSequence};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize)]
pub struct ExecuteRequest {
    pub commands: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ExecuteResponse {
    pub output: String,
}

/// POST /execute
/// Runs raw gnubg commands, e.g. `["set board simple ...", "set dice 3 1", "hint"]`.
pub async fn execute(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<Json<ExecuteResponse>, AppError> {
    let Json(req) = payload?;
    let commands = req
        .commands
        .ok_or_else(|| AppError::BadRequest("Missing 'commands' field".into()))?;

    let output = analyzer
        .raw_execute(&CommandSequence::from(commands))
        .await?;

    Ok(Json(ExecuteResponse { output }))
}
