use std::env;
use std::path::PathBuf;
use std::time::Duration;

use gnubg::EngineConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub gnubg_executable: String,
    pub gnubg_args: Vec<String>,
    pub gnubg_timeout_ms: u64,
    pub gnubg_verbose: bool,
    pub scratch_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gnubg_executable: env::var("GNUBG_EXECUTABLE").unwrap_or_else(|_| "gnubg".to_string()),
            gnubg_args: env::var("GNUBG_ARGS")
                .map(|v| v.split_whitespace().map(String::from).collect())
                .unwrap_or_else(|_| vec!["-t".to_string()]), // text mode
            gnubg_timeout_ms: env::var("GNUBG_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
            gnubg_verbose: env::var("GNUBG_VERBOSE")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            scratch_dir: env::var("GNUBG_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            executable: self.gnubg_executable.clone(),
            args: self.gnubg_args.clone(),
            timeout: Duration::from_millis(self.gnubg_timeout_ms),
            verbose: self.gnubg_verbose,
            scratch_dir: self.scratch_dir.clone(),
        }
    }
}
