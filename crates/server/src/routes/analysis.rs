use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, Extension, Json};
use gnubg::{Analyzer, CubeDecision, MoveAnalysis, PositionEvaluation, PositionSource};
use serde::{Deserialize, Serialize};

use super::plies_or_default;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct RecordRequest {
    /// SGF game record
    pub sgf: Option<String>,
    pub plies: Option<u32>,
}

impl RecordRequest {
    fn into_source(self) -> Result<(PositionSource, u32), AppError> {
        let sgf = self
            .sgf
            .ok_or_else(|| AppError::BadRequest("Missing 'sgf' field".into()))?;
        Ok((PositionSource::GameRecord(sgf), plies_or_default(self.plies)))
    }
}

#[derive(Serialize)]
pub struct HintResponse {
    pub moves: Vec<MoveAnalysis>,
}

/// POST /evaluate
pub async fn evaluate(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<Json<PositionEvaluation>, AppError> {
    let Json(req) = payload?;
    let (source, plies) = req.into_source()?;
    let evaluation = analyzer.evaluate(&source, plies).await?;
    Ok(Json(evaluation))
}

/// POST /hint
pub async fn hint(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<Json<HintResponse>, AppError> {
    let Json(req) = payload?;
    let (source, plies) = req.into_source()?;
    let moves = analyzer.hint(&source, plies).await?;
    Ok(Json(HintResponse { moves }))
}

/// POST /cube
/// The raw gnubg text is too verbose for clients and is stripped.
pub async fn cube(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<Json<CubeDecision>, AppError> {
    let Json(req) = payload?;
    let (source, plies) = req.into_source()?;
    let decision = analyzer.cube_decision(&source, plies).await?;
    Ok(Json(decision.without_details()))
}
