use std::sync::Arc;

use gnubg::Analyzer;
use server::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();
    tracing::info!(
        executable = %config.gnubg_executable,
        args = ?config.gnubg_args,
        timeout_ms = config.gnubg_timeout_ms,
        verbose = config.gnubg_verbose,
        scratch_dir = %config.scratch_dir.display(),
        "gnubg config loaded"
    );

    let analyzer = Arc::new(Analyzer::new(config.engine_config()));

    // Keep serving even without gnubg; /health reports degraded
    if analyzer.is_available().await {
        tracing::info!("gnubg: available");
    } else {
        tracing::warn!("gnubg: NOT AVAILABLE - analysis requests will fail");
    }

    let app = server::app(analyzer);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting gnubg-service on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
