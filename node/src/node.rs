use crate::api::ApiServer;
use crate::config::NodeConfig;
use crate::storage::{DocumentStore, EntryStore, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Node operation errors
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One EmoGo backend process: the opened store plus the HTTP API over it
pub struct EmogoNode {
    config: NodeConfig,
    store: Arc<DocumentStore>,
}

impl EmogoNode {
    /// Validate the configuration and open the document store
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        config
            .validate()
            .map_err(|e| NodeError::ConfigError(e.to_string()))?;

        let location = config.storage.location()?;
        let store = DocumentStore::open(&location, &config.storage.store_config())?;

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<DocumentStore> {
        Arc::clone(&self.store)
    }

    /// Serve the API until the server stops, then flush the store.
    ///
    /// The server stops on SIGINT or SIGTERM.
    pub async fn run(self) -> Result<(), NodeError> {
        let store: Arc<dyn EntryStore> = self.store();
        let server = ApiServer::new(store, self.config.api.clone()).start()?;

        let served = server.await;
        if let Err(e) = &served {
            error!("API server terminated with error: {}", e);
        }

        self.shutdown().await?;
        served.map_err(NodeError::from)
    }

    /// Flush pending writes to disk
    pub async fn shutdown(&self) -> Result<(), NodeError> {
        info!("Shutting down EmoGo node...");
        self.store.flush().await?;
        info!("Store flushed to {}", self.store.location());
        Ok(())
    }
}
