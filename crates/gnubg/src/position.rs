//! Getting a position into gnubg.
//!
//! Game records (SGF) can only be loaded from a file, so they go through the
//! runner's scratch-file path. Native position IDs are set inline, which also
//! keeps bar and home-board checkers intact.

use serde::{Deserialize, Serialize};

use crate::commands::{analysis_settings, AnalysisMode, CommandSequence};

/// Player on roll. `O` moves 24 -> 1, `X` moves 1 -> 24.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[default]
    O,
    X,
}

/// A position in gnubg's native encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativePosition {
    /// gnubg position ID, e.g. `4HPwATDgc/ABMA`
    pub position_id: String,
    pub dice: [u8; 2],
    #[serde(default)]
    pub side: Side,
}

/// The two mutually exclusive ways of describing a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSource {
    /// Portable game record text (SGF), possibly with full game history
    GameRecord(String),
    Native(NativePosition),
}

/// A position staged for one run: either a file to load or inline commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedPosition<'a> {
    /// Record text the runner must write to a scratch file and `load position`.
    FromFile {
        record: &'a str,
        commands: CommandSequence,
    },
    /// Self-contained script with the board set inline.
    Inline(CommandSequence),
}

impl PositionSource {
    /// Turn the source plus mode into what the runner needs to execute.
    pub fn stage(&self, mode: AnalysisMode, plies: u32) -> StagedPosition<'_> {
        match self {
            PositionSource::GameRecord(record) => StagedPosition::FromFile {
                record,
                commands: mode.commands(plies),
            },
            PositionSource::Native(native) => {
                StagedPosition::Inline(native_commands(native, mode, plies))
            }
        }
    }
}

/// Directive that loads a game record from disk.
pub fn load_position_command(path: &std::path::Path) -> String {
    format!("load position {}", path.display())
}

/// Full inline script for a native position: settings, fresh game, board,
/// dice, then the mode directive.
pub fn native_commands(position: &NativePosition, mode: AnalysisMode, plies: u32) -> CommandSequence {
    let [die1, die2] = position.dice;

    analysis_settings(mode, plies)
        .with("new game")
        .with(format!("set board {}", position.position_id))
        .with(format!("set dice {die1} {die2}"))
        .with(mode.directive())
}
