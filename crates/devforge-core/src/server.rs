//! API server process: startup, shutdown, and Ctrl-C handling.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, warn};

use devforge_config::AppConfig;

use crate::api::{self, ApiState};
use crate::registry::ToolRegistry;

/// Shutdown signal sent via broadcast channel.
#[derive(Debug, Clone)]
pub struct ShutdownSignal;

/// Serves the HTTP API for a registry.
pub struct Server {
    config: AppConfig,
    registry: Arc<ToolRegistry>,
    shutdown_tx: broadcast::Sender<ShutdownSignal>,
    _shutdown_rx: broadcast::Receiver<ShutdownSignal>,
}

impl Server {
    pub fn new(config: AppConfig, registry: Arc<ToolRegistry>) -> Self {
        let (shutdown_tx, _shutdown_rx) = broadcast::channel(1);
        Self {
            config,
            registry,
            shutdown_tx,
            _shutdown_rx,
        }
    }

    /// The full application router, CORS layer included.
    pub fn router(&self) -> axum::Router {
        let state = Arc::new(ApiState::new(Arc::clone(&self.registry)));
        api::router(state).layer(api::cors_layer(&self.config.server.cors_origins))
    }

    /// Resolve the configured address, bind it, and serve until shutdown.
    pub async fn run(&self) -> Result<(), ServerError> {
        let addr = self.resolve_addr().await?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.run_on(listener).await
    }

    /// Serve on an already-bound listener until shutdown or Ctrl-C.
    pub async fn run_on(&self, listener: TcpListener) -> Result<(), ServerError> {
        info!(
            addr = %listener.local_addr()?,
            tools = self.registry.len(),
            "DevForge API server starting"
        );

        let shutdown_rx = self.shutdown_tx.subscribe();
        let ctrl_c_tx = self.shutdown_tx.clone();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Ctrl-C received, initiating graceful shutdown");
                let _ = ctrl_c_tx.send(ShutdownSignal);
            }
        });

        let result = api::serve(listener, self.router(), shutdown_rx).await;
        ctrl_c.abort();
        result?;

        info!("API server stopped");
        Ok(())
    }

    /// Request a graceful shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(ShutdownSignal);
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    async fn resolve_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = self.config.bind_addr();
        tokio::net::lookup_host(&addr)
            .await
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or(ServerError::InvalidAddress(addr))
    }
}

/// Errors from the API server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
