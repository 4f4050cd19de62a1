//! gnubg process driver.
//!
//! Every request spawns a fresh `gnubg -t`, feeds it the whole script on
//! stdin, and collects stdout once it exits. Only one gnubg process runs per
//! runner at a time; callers queue on the runner's gate in arrival order.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::commands::CommandSequence;
use crate::error::EngineError;
use crate::position::{load_position_command, StagedPosition};

/// Substring of `show version` output that identifies a working gnubg.
const VERSION_BANNER: &str = "gnu backgammon";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path or name of the gnubg binary
    pub executable: String,
    /// Flags passed to gnubg, `-t` (text mode, no GUI) by default
    pub args: Vec<String>,
    /// Hard deadline for a single invocation
    pub timeout: Duration,
    /// Log full scripts and raw output at info level
    pub verbose: bool,
    /// Where game records are written before `load position`
    pub scratch_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            executable: "gnubg".to_string(),
            args: vec!["-t".to_string()],
            timeout: Duration::from_secs(30),
            verbose: false,
            scratch_dir: std::env::temp_dir(),
        }
    }
}

pub struct GnubgRunner {
    config: EngineConfig,
    gate: Mutex<()>,
}

impl GnubgRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            gate: Mutex::new(()),
        }
    }

    /// Liveness probe: run `show version` and look for the banner.
    /// Any failure, timeouts included, means unavailable.
    pub async fn is_available(&self) -> bool {
        let probe = CommandSequence::new().with("show version");
        match self.execute(&probe).await {
            Ok(output) => output.to_lowercase().contains(VERSION_BANNER),
            Err(e) => {
                debug!(error = %e, "gnubg availability probe failed");
                false
            }
        }
    }

    /// Run `commands` followed by `quit` and return gnubg's stdout.
    pub async fn execute(&self, commands: &CommandSequence) -> Result<String, EngineError> {
        let script = commands.to_script();

        let _gate = self.gate.lock().await;

        if self.config.verbose {
            info!("Executing gnubg commands:\n{script}");
        } else {
            debug!(commands = commands.len(), "Executing gnubg commands");
        }

        self.run_process(script).await
    }

    /// Write `record` to a scratch file, load it, then run `commands`.
    /// The scratch file is removed on every exit path.
    pub async fn execute_with_position(
        &self,
        record: &str,
        commands: &CommandSequence,
    ) -> Result<String, EngineError> {
        let scratch = ScratchFile::create(&self.config.scratch_dir, record).await?;

        if self.config.verbose {
            info!(path = %scratch.path().display(), "Wrote game record to scratch file");
        }

        let commands = commands
            .clone()
            .prepend([load_position_command(scratch.path())]);

        self.execute(&commands).await
    }

    /// Execute a staged position, through a scratch file when needed.
    pub async fn run_staged(&self, staged: StagedPosition<'_>) -> Result<String, EngineError> {
        match staged {
            StagedPosition::FromFile { record, commands } => {
                self.execute_with_position(record, &commands).await
            }
            StagedPosition::Inline(commands) => self.execute(&commands).await,
        }
    }

    async fn run_process(&self, script: String) -> Result<String, EngineError> {
        let mut child = Command::new(&self.config.executable)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                executable: self.config.executable.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                // gnubg may exit without draining stdin; that is not an error
                if let Err(e) = stdin.write_all(script.as_bytes()).await {
                    debug!(error = %e, "gnubg closed stdin early");
                }
            }
        };

        let run = async move {
            let ((), output) = tokio::join!(feed, child.wait_with_output());
            output
        };

        // Dropping `run` on timeout drops the child, which kills it
        let output = match tokio::time::timeout(self.config.timeout, run).await {
            Ok(output) => output?,
            Err(_) => {
                warn!(timeout_ms = self.config.timeout.as_millis() as u64, "gnubg timed out, process killed");
                return Err(EngineError::Timeout(self.config.timeout));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if self.config.verbose {
            info!("gnubg output:\n{stdout}");
            if !stderr.is_empty() {
                info!("gnubg stderr:\n{stderr}");
            }
        }

        if !output.status.success() {
            debug!(status = %output.status, "gnubg exited with non-zero status");
        }
        debug!(
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "gnubg finished"
        );

        if stdout.is_empty() && !stderr.is_empty() {
            return Err(EngineError::ExecutionFailure(stderr));
        }

        Ok(stdout)
    }
}

/// A uniquely named file that is deleted when dropped.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    async fn create(dir: &Path, contents: &str) -> io::Result<Self> {
        let path = dir.join(format!("gnubg_{}.sgf", Uuid::new_v4()));
        // Guard first so a partial write is still cleaned up
        let file = Self { path };
        tokio::fs::write(&file.path, contents).await?;
        Ok(file)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to delete scratch file");
            }
        }
    }
}
