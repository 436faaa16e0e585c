pub mod api;
pub mod config;
pub mod logging;
pub mod node;
pub mod storage;


pub use crate::api::{ApiConfig, ApiServer};
pub use crate::config::NodeConfig;
pub use crate::node::{EmogoNode, NodeError};
pub use crate::storage::{DocumentStore, DocumentStoreConfig, EntryStore, StorageError, StoreLocation};
