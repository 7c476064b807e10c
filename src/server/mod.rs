//! Local HTTP endpoint for the browser extension
//!
//! Listens on loopback by default. Lifecycle is explicit: construct an
//! [`IntegrationServer`], `start` it on an address, `stop` it on exit.

use crate::downloader::DownloadOrchestrator;
use crate::extractor::Extractor;
use crate::utils::config::SettingsStore;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod routes;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub extractor: Arc<dyn Extractor>,
    pub orchestrator: DownloadOrchestrator,
    /// Reloaded on every request so GUI edits apply without a restart
    pub settings: SettingsStore,
}

impl AppContext {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        orchestrator: DownloadOrchestrator,
        settings: SettingsStore,
    ) -> Self {
        Self {
            extractor,
            orchestrator,
            settings,
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(routes::status))
        .route("/api/download", post(routes::download))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

pub struct IntegrationServer {
    ctx: AppContext,
    running: Option<Running>,
}

struct Running {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<()>>,
}

impl IntegrationServer {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx, running: None }
    }

    /// Address actually bound, once started
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.local_addr)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Bind `addr` and serve on a background task.
    ///
    /// Port 0 picks a free port; see [`IntegrationServer::local_addr`].
    pub async fn start(&mut self, addr: SocketAddr) -> Result<SocketAddr> {
        if let Some(running) = &self.running {
            anyhow::bail!("Server already running on {}", running.local_addr);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        let local_addr = listener.local_addr()?;
        let app = create_router(self.ctx.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tracing::info!("Starting integration server on {}", local_addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await?;
            Ok::<(), anyhow::Error>(())
        });

        self.running = Some(Running {
            local_addr,
            shutdown: shutdown_tx,
            handle,
        });
        Ok(local_addr)
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };

        let _ = running.shutdown.send(());
        running
            .handle
            .await
            .context("Integration server task panicked")??;

        tracing::info!("Integration server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
