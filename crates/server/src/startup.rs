use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig, ShareConfig};
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{
    runtime,
    share::{SeaOrmShareRepository, ShareRepository, ShareService},
};

fn load_bind_addr(cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Wire the handler state around an already-opened repository.
pub fn build_state(repo: Arc<dyn ShareRepository>, cfg: &ShareConfig) -> ServerState {
    ServerState {
        share: Arc::new(ShareService::from_config(repo, cfg)),
        base_url: cfg.base_url.clone(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}

/// Public entry: build the app and run the HTTP server until a shutdown signal.
///
/// Expects a validated config; the binary loads it and installs logging first.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    cfg.share.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    // One connection handle for the whole process lifetime.
    let db = runtime::open_store(&cfg.share)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    let repo: Arc<dyn ShareRepository> = Arc::new(SeaOrmShareRepository::new(db));
    let state = build_state(repo, &cfg.share);

    let app: Router = routes::build_router(state, routes::build_cors());

    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, db = %cfg.share.db_path.display(), base_url = %cfg.share.base_url, "starting share-link server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
