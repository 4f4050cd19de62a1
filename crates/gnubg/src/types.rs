//! Values decoded from gnubg output.

use serde::{Deserialize, Serialize};

/// Cubeless evaluation of a single position. Unparsed fields stay at 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionEvaluation {
    pub equity: f64,
    pub win_prob: f64,
    pub gammon_prob: f64,
    pub bg_prob: f64,
}

/// One ranked candidate move from `hint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveAnalysis {
    /// 1 = best
    pub rank: u32,
    /// Space separated `from/to` pairs, e.g. `8/5 6/5`
    pub notation: String,
    pub equity: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CubeRecommendation {
    #[default]
    NoDouble,
    Double,
    TooGood,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CubeDecision {
    pub no_double_eq: f64,
    pub double_take_eq: f64,
    pub double_pass_eq: f64,
    pub recommendation: CubeRecommendation,
    /// Verbatim engine output the decision was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CubeDecision {
    /// Drop the raw engine text before handing the decision to clients.
    pub fn without_details(self) -> Self {
        Self {
            details: None,
            ..self
        }
    }
}
