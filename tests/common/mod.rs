use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use gnubg::{Analyzer, EngineConfig};

/// Engine config that runs `script` under `/bin/sh -c` in place of gnubg.
/// The script receives the command script on stdin like gnubg would.
pub fn sh_engine(script: &str, scratch_dir: &Path) -> EngineConfig {
    EngineConfig {
        executable: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        timeout: Duration::from_secs(5),
        verbose: false,
        scratch_dir: scratch_dir.to_path_buf(),
    }
}

/// Serve the router on an ephemeral port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_app(config: EngineConfig) -> String {
    let app = server::app(Arc::new(Analyzer::new(config)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Names of the files left in `dir`.
#[allow(dead_code)]
pub fn dir_entries(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}
