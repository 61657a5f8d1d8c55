use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use common::env::ensure_upload_dir;
use configs::AppConfig;
use service::{auth::service::AuthConfig, services::bootstrap, DocumentStore};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::{ServerState, UploadSettings};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", cfg.server.host, cfg.server.port))
}

/// Seed accounts and assemble the router over an already opened store.
pub async fn build_app(cfg: &AppConfig, store: Arc<dyn DocumentStore>) -> anyhow::Result<Router> {
    bootstrap::ensure_default_admin(store.as_ref(), &cfg.auth).await?;
    if cfg.auth.seed_demo_team {
        let added = bootstrap::seed_demo_team(store.as_ref()).await?;
        info!(added, "demo team seeded");
    }
    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET not set; using the development secret");
    }
    let state = ServerState::new(store, AuthConfig::from_settings(&cfg.auth), UploadSettings::from(&cfg.uploads));
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: open the store, build the app and serve until a shutdown signal arrives.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    ensure_upload_dir(&cfg.uploads.dir).await?;
    let store = service::connect(&cfg.database).await.context("opening document store")?;
    let backend = cfg.database.backend()?;
    info!(?backend, schema = %cfg.database.name, "document store ready");

    let app = build_app(&cfg, Arc::clone(&store)).await?;

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    if let Err(e) = store.close().await {
        warn!(error = %e, "document store did not close cleanly");
    }
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
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
}
