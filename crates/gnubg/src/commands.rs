//! gnubg command scripts for each analysis mode.
//!
//! gnubg mutates its state line by line, so a script is an ordered list of
//! directives. Builders never append `quit`; the runner does that.

use serde::{Deserialize, Serialize};

/// Search depth used when the caller does not ask for one.
pub const DEFAULT_PLIES: u32 = 2;

/// An ordered list of gnubg directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSequence {
    commands: Vec<String>,
}

impl CommandSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directive, builder style.
    pub fn with(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn push(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    /// Insert directives ahead of the current ones, keeping their order.
    pub fn prepend<I, S>(self, prefix: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut commands: Vec<String> = prefix.into_iter().map(Into::into).collect();
        commands.extend(self.commands);
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    /// Render the script fed to gnubg on stdin, terminated by exactly one `quit`.
    pub fn to_script(&self) -> String {
        let mut script = String::new();
        for command in &self.commands {
            script.push_str(command);
            script.push('\n');
        }
        script.push_str("quit\n");
        script
    }
}

impl From<Vec<String>> for CommandSequence {
    fn from(commands: Vec<String>) -> Self {
        Self { commands }
    }
}

impl<'a> FromIterator<&'a str> for CommandSequence {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().map(String::from).collect(),
        }
    }
}

impl IntoIterator for CommandSequence {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

/// What gnubg is asked to do with the loaded position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    Evaluate,
    Hint,
    CubeDecision,
}

impl AnalysisMode {
    /// The final directive that triggers the analysis.
    pub fn directive(self) -> &'static str {
        match self {
            AnalysisMode::Evaluate => "eval",
            AnalysisMode::Hint => "hint",
            AnalysisMode::CubeDecision => "hint cube",
        }
    }

    /// Cube analysis has to model the cube; the others run cubeless for speed.
    pub fn cubeful(self) -> bool {
        matches!(self, AnalysisMode::CubeDecision)
    }

    /// Full command list for a position that is already loaded.
    pub fn commands(self, plies: u32) -> CommandSequence {
        analysis_settings(self, plies).with(self.directive())
    }
}

/// Automatic play must be off or gnubg will start rolling dice by itself.
pub(crate) fn automatic_off() -> CommandSequence {
    CommandSequence::new()
        .with("set automatic game off")
        .with("set automatic roll off")
}

/// Everything that precedes the mode directive: automatic play off, search
/// depth, and the cubeful switches for the mode.
pub(crate) fn analysis_settings(mode: AnalysisMode, plies: u32) -> CommandSequence {
    let mut commands = automatic_off()
        .with(format!("set evaluation chequerplay evaluation plies {plies}"))
        .with(format!("set evaluation cubedecision evaluation plies {plies}"));

    if mode.cubeful() {
        commands.push("set evaluation chequerplay evaluation cubeful on");
        commands.push("set evaluation cubedecision evaluation cubeful on");
    } else {
        commands.push("set evaluation chequerplay evaluation cubeful off");
    }

    commands
}

/// Commands for a plain position evaluation.
pub fn build_evaluation_commands(plies: u32) -> CommandSequence {
    AnalysisMode::Evaluate.commands(plies)
}

/// Commands for ranking candidate moves.
pub fn build_hint_commands(plies: u32) -> CommandSequence {
    AnalysisMode::Hint.commands(plies)
}

/// Commands for a doubling-cube decision.
pub fn build_cube_commands(plies: u32) -> CommandSequence {
    AnalysisMode::CubeDecision.commands(plies)
}
