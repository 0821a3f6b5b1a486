use log::{error, info};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::http::{AppState, build_router};
use crate::storage::{Category, CategoryStore};

pub struct Server {
    listener: TcpListener,
    state: AppState,
    max_body_bytes: usize,
}

impl Server {
    /// Create the data directories and bind the configured address
    pub async fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let addr = config.socket_addr()?;

        let store = CategoryStore::with_root(config.data_root_path());
        if let Err(e) = store.ensure_all_locations().await {
            error!("Failed to prepare data directories under {}: {}", config.data_root, e);
            return Err(e.into());
        }
        for category in Category::ALL {
            info!(
                "Category {} stored in {}",
                category,
                store.resolve_location(category).display()
            );
        }

        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => {
                info!("Server bound to {}", addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", addr, e);
                return Err(e.into());
            }
        };

        Ok(Self {
            listener,
            state: AppState::new(store, &config),
            max_body_bytes: config.max_upload_size_bytes(),
        })
    }

    /// Address actually bound, useful when the configured port is ephemeral
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve requests until Ctrl-C
    pub async fn start(self) -> Result<(), ServerError> {
        self.serve_until(shutdown_signal()).await
    }

    /// Serve requests until `shutdown` resolves
    pub async fn serve_until(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let addr = self.local_addr()?;
        let app = build_router(self.state, self.max_body_bytes);

        info!("Starting map asset server on http://{}", addr);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
