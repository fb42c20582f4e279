use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{metrics, runtime, store};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Open the configured users store and assemble handler state.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let store = store::build_store(&cfg.storage).await?;
    Ok(ServerState {
        store,
        meta: Arc::new(cfg.app.clone()),
        database_configured: cfg.database.is_configured(),
        debug_routes: cfg.storage.debug_routes,
    })
}

/// Build the router for `cfg` without binding a socket.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors(), &cfg.server.static_dir))
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    metrics::init();
    runtime::ensure_env(&cfg.server.static_dir, &cfg.storage)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(
        %addr,
        environment = %cfg.app.environment,
        backend = ?cfg.storage.backend,
        database = cfg.database.is_configured(),
        "starting server; health check at /api/health"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}
