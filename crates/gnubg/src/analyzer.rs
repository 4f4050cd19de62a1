//! Analysis entry points: position + depth in, typed result out.

use tracing::debug;

use crate::commands::{AnalysisMode, CommandSequence};
use crate::error::EngineError;
use crate::parser::{parse_cube_decision, parse_evaluation, parse_move_analysis};
use crate::position::PositionSource;
use crate::runner::{EngineConfig, GnubgRunner};
use crate::types::{CubeDecision, MoveAnalysis, PositionEvaluation};

/// Runs gnubg for each analysis mode and decodes the reply.
pub struct Analyzer {
    runner: GnubgRunner,
}

impl Analyzer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            runner: GnubgRunner::new(config),
        }
    }

    pub async fn evaluate(
        &self,
        source: &PositionSource,
        plies: u32,
    ) -> Result<PositionEvaluation, EngineError> {
        let output = self.run(source, AnalysisMode::Evaluate, plies).await?;
        Ok(parse_evaluation(&output))
    }

    /// Ranked candidate moves, best first.
    pub async fn hint(
        &self,
        source: &PositionSource,
        plies: u32,
    ) -> Result<Vec<MoveAnalysis>, EngineError> {
        let output = self.run(source, AnalysisMode::Hint, plies).await?;
        Ok(parse_move_analysis(&output))
    }

    /// Cube decision with the raw gnubg text attached in `details`.
    pub async fn cube_decision(
        &self,
        source: &PositionSource,
        plies: u32,
    ) -> Result<CubeDecision, EngineError> {
        let output = self.run(source, AnalysisMode::CubeDecision, plies).await?;
        Ok(parse_cube_decision(&output))
    }

    /// Pass arbitrary commands straight through.
    pub async fn raw_execute(&self, commands: &CommandSequence) -> Result<String, EngineError> {
        self.runner.execute(commands).await
    }

    pub async fn is_available(&self) -> bool {
        self.runner.is_available().await
    }

    async fn run(
        &self,
        source: &PositionSource,
        mode: AnalysisMode,
        plies: u32,
    ) -> Result<String, EngineError> {
        debug!(?mode, plies, "Running analysis");
        self.runner.run_staged(source.stage(mode, plies)).await
    }
}
