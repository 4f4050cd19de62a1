//! Drive GNU Backgammon (gnubg) as a subprocess and decode its text output.

pub mod analyzer;
pub mod commands;
pub mod error;
pub mod parser;
pub mod position;
pub mod runner;
pub mod types;

pub use analyzer::Analyzer;
pub use commands::{
    build_cube_commands, build_evaluation_commands, build_hint_commands, AnalysisMode,
    CommandSequence, DEFAULT_PLIES,
};
pub use error::EngineError;
pub use position::{NativePosition, PositionSource, Side};
pub use runner::{EngineConfig, GnubgRunner};
pub use types::{CubeDecision, CubeRecommendation, MoveAnalysis, PositionEvaluation};
