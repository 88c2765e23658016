//! Diagram store - token-gated blob service for diagram documents
//!
//! Stores opaque JSON documents from browser-based diagram editors.
//! Access control is capability-style:
//! 1. Creating a document mints a read token and a write token
//! 2. The read token doubles as the storage key; anyone holding it can fetch
//! 3. The write token is kept in the document's metadata; updates must
//!    present it and are refused otherwise
//!
//! Documents live on the local filesystem, payload next to a metadata
//! sidecar, under a configurable data directory.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use diagram_store::api::{create_router, AppState};
use diagram_store::config::Config;
use diagram_store::storage::{BlobStore, FsStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,diagram_store=debug".into()),
        )
        .init();

    info!("Diagram store starting...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    info!(
        server_addr = %config.server_addr,
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .context("Failed to create data directory")?;

    let store: Arc<dyn BlobStore> = Arc::new(FsStore::new(config.data_dir.clone()));

    // Create API server
    let app_state = AppState::new(store);
    let router = create_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.server_addr)
        .await
        .context("Failed to bind server")?;

    info!(addr = %config.server_addr, "Diagram store API server started");

    // Run server (this blocks until shutdown)
    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
}
