use crate::api::ApiConfig;
use crate::storage::{DocumentStoreConfig, StoreLocation};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Environment variable holding the document store connection string
pub const STORE_URI_ENV: &str = "EMOGO_STORE_URI";

/// Prefix for every other environment override, e.g. `EMOGO_API__PORT`
pub const ENV_PREFIX: &str = "EMOGO";

/// Config file picked up when no `--config` flag is given
pub const DEFAULT_CONFIG_PATH: &str = "config/emogo.toml";

#[derive(Debug, Error)]
pub enum NodeConfigValidationError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NodeConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub node: GeneralConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Connection string, `sled://<path>` or `memory://`
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub cache_size: u64,
    pub flush_interval_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    pub log_level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let store = DocumentStoreConfig::default();
        Self {
            uri: String::new(),
            database: store.database,
            collection: store.collection,
            cache_size: store.cache_size,
            flush_interval_ms: store.flush_interval_ms,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), NodeConfigValidationError> {
        if self.uri.trim().is_empty() {
            return Err(NodeConfigValidationError::MissingField(format!(
                "storage.uri is not set; export {STORE_URI_ENV} or add it to a local .env file"
            )));
        }
        self.location()
            .map_err(|e| NodeConfigValidationError::InvalidValue(e.to_string()))?;
        if self.database.is_empty() || self.collection.is_empty() {
            return Err(NodeConfigValidationError::InvalidValue(
                "storage.database and storage.collection cannot be empty".to_string(),
            ));
        }
        if self.cache_size == 0 {
            return Err(NodeConfigValidationError::InvalidValue(
                "storage.cache_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn location(&self) -> Result<StoreLocation, crate::storage::StorageError> {
        self.uri.parse()
    }

    pub fn store_config(&self) -> DocumentStoreConfig {
        DocumentStoreConfig {
            database: self.database.clone(),
            collection: self.collection.clone(),
            cache_size: self.cache_size,
            flush_interval_ms: self.flush_interval_ms,
        }
    }
}

impl NodeConfig {
    /// Load configuration from defaults, an optional TOML file, `EMOGO_*`
    /// environment variables and finally the store connection string.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Local development only; deployments set real environment variables.
        let _ = dotenv::dotenv();

        Self::load_with(path, Self::environment(), env::var(STORE_URI_ENV).ok())
    }

    pub(crate) fn load_with(
        path: Option<&Path>,
        environment: Environment,
        store_uri: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::builder();
        config = config.add_source(Config::try_from(&Self::default())?);

        config = match path {
            Some(path) => config.add_source(File::from(path)),
            None => config.add_source(File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false)),
        };

        config = config
            .add_source(environment)
            .set_override_option("storage.uri", store_uri)?;

        let config: NodeConfig = config.build()?.try_deserialize()?;
        if let Err(e) = config.validate() {
            return Err(ConfigError::Message(format!("Configuration validation error: {e}")));
        }

        Ok(config)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    pub fn validate(&self) -> Result<(), NodeConfigValidationError> {
        if self.api.port == 0 {
            return Err(NodeConfigValidationError::InvalidPort(
                "api.port cannot be 0".to_string(),
            ));
        }
        if self.api.max_json_payload_size == 0 {
            return Err(NodeConfigValidationError::InvalidValue(
                "api.max_json_payload_size must be greater than 0".to_string(),
            ));
        }
        if self.node.log_level.trim().is_empty() {
            return Err(NodeConfigValidationError::InvalidValue(
                "node.log_level cannot be empty".to_string(),
            ));
        }
        self.storage.validate()
    }

    /// Log the effective configuration, without the raw connection string
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  API listen address: {}:{}", self.api.bind_address, self.api.port);
        info!("  API docs enabled: {}", self.api.enable_docs);
        if let Ok(location) = self.storage.location() {
            match location {
                StoreLocation::Sled(path) => info!("  Store: sled at {:?}", path),
                StoreLocation::Memory => info!("  Store: temporary (memory://)"),
            }
        }
        info!("  Collection: {}", self.storage.store_config().tree_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NodeConfig::environment().source(Some(source))
    }

    #[test]
    fn test_defaults_with_store_uri() {
        let config =
            NodeConfig::load_with(None, env_with(&[]), Some("memory://".to_string())).unwrap();
        assert_eq!(config.api.port, 8000);
        assert_eq!(config.api.bind_address, "0.0.0.0");
        assert_eq!(config.storage.uri, "memory://");
        assert_eq!(config.storage.store_config().tree_name(), "emogo.entries");
        assert_eq!(config.node.log_level, "info");
    }

    #[test]
    fn test_missing_store_uri_is_fatal() {
        let err = NodeConfig::load_with(None, env_with(&[]), None).unwrap_err();
        assert!(err.to_string().contains("storage.uri"));
    }

    #[test]
    fn test_unknown_store_scheme_is_rejected() {
        let result = NodeConfig::load_with(
            None,
            env_with(&[]),
            Some("mongodb://localhost:27017".to_string()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let config = NodeConfig::load_with(
            None,
            env_with(&[
                ("EMOGO_API__PORT", "9000"),
                ("EMOGO_STORAGE__COLLECTION", "journal"),
            ]),
            Some("memory://".to_string()),
        )
        .unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.storage.collection, "journal");
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emogo.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nport = 9100\nenable_docs = false\n\n[storage]\nuri = \"sled://data/emogo\"").unwrap();

        let config = NodeConfig::load_with(Some(&path), env_with(&[]), None).unwrap();
        assert_eq!(config.api.port, 9100);
        assert!(!config.api.enable_docs);
        assert_eq!(
            config.storage.location().unwrap(),
            StoreLocation::Sled("data/emogo".into())
        );
    }

    #[test]
    fn test_store_uri_variable_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emogo.toml");
        std::fs::write(&path, "[storage]\nuri = \"sled://data/emogo\"\n").unwrap();

        let config =
            NodeConfig::load_with(Some(&path), env_with(&[]), Some("memory://".to_string()))
                .unwrap();
        assert_eq!(config.storage.location().unwrap(), StoreLocation::Memory);
    }

    #[test]
    fn test_zero_port_is_invalid() {
        let mut config = NodeConfig::default();
        config.storage.uri = "memory://".to_string();
        config.api.port = 0;
        assert!(matches!(
            config.validate(),
            Err(NodeConfigValidationError::InvalidPort(_))
        ));
    }
}
