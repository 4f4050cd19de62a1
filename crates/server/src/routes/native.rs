//! Endpoints taking a gnubg position ID instead of an SGF record.
//! Position IDs keep bar and borne-off checkers that SGF import can lose.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, Extension, Json};
use gnubg::{
    Analyzer, CubeDecision, NativePosition, PositionEvaluation, PositionSource, Side,
};
use serde::Deserialize;

use super::analysis::HintResponse;
use super::plies_or_default;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct NativeRequest {
    /// Position ID, e.g. "4HPwATDgc/ABMA"
    pub position: Option<String>,
    pub dice: Option<[u8; 2]>,
    #[serde(default)]
    pub player: Side,
    pub plies: Option<u32>,
}

impl NativeRequest {
    fn into_source(self) -> Result<(PositionSource, u32), AppError> {
        let (Some(position_id), Some(dice)) = (self.position.filter(|p| !p.is_empty()), self.dice)
        else {
            return Err(AppError::BadRequest("Missing 'position' or 'dice' field".into()));
        };

        let source = PositionSource::Native(NativePosition {
            position_id,
            dice,
            side: self.player,
        });
        Ok((source, plies_or_default(self.plies)))
    }
}

/// POST /eval-native
pub async fn eval_native(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    payload: Result<Json<NativeRequest>, JsonRejection>,
) -> Result<Json<PositionEvaluation>, AppError> {
    let Json(req) = payload?;
    let (source, plies) = req.into_source()?;
    Ok(Json(analyzer.evaluate(&source, plies).await?))
}

/// POST /hint-native
pub async fn hint_native(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    payload: Result<Json<NativeRequest>, JsonRejection>,
) -> Result<Json<HintResponse>, AppError> {
    let Json(req) = payload?;
    let (source, plies) = req.into_source()?;
    let moves = analyzer.hint(&source, plies).await?;
    Ok(Json(HintResponse { moves }))
}

/// POST /cube-native
pub async fn cube_native(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    payload: Result<Json<NativeRequest>, JsonRejection>,
) -> Result<Json<CubeDecision>, AppError> {
    let Json(req) = payload?;
    let (source, plies) = req.into_source()?;
    let decision = analyzer.cube_decision(&source, plies).await?;
    Ok(Json(decision.without_details()))
}
