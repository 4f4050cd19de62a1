//! Engine error types

use std::io;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine did not exit before the configured deadline and was killed.
    #[error("gnubg process timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The engine wrote nothing to stdout but complained on stderr.
    #[error("gnubg execution failed: {0}")]
    ExecutionFailure(String),

    #[error("failed to spawn gnubg ({executable}): {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl EngineError {
    /// Timeouts are the only failure a caller may sensibly retry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, EngineError::Timeout(_))
    }
}
