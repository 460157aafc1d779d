mod api;
mod middleware;

use std::sync::Arc;

use cdna_scanner::{CreatorDnaScanner, OpenAiClient, ScannerConfig};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cdna_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = cdna_db::connect_pool_from_config(&config).await?;
    let applied = cdna_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let llm = OpenAiClient::from_config(&config)?;
    tracing::info!(model = llm.model(), endpoint = %llm.endpoint(), "model client ready");
    let scanner = CreatorDnaScanner::new(Arc::new(llm), ScannerConfig::from_app_config(&config));

    let state = AppState {
        pool,
        scanner: Arc::new(scanner),
        persist_scans: config.persist_scans,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "cdna-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
