use sled::{self, Db, Tree};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use emogo_core::{Document, Projection, INTERNAL_ID_FIELD};

use super::traits::EntryStore;
use super::uri::StoreLocation;

/// Configuration for the document store
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    /// Database name, the first half of the collection tree name
    pub database: String,
    /// Collection name holding the entries
    pub collection: String,
    /// Cache size in bytes
    pub cache_size: u64,
    /// Flush interval in milliseconds
    pub flush_interval_ms: Option<u64>,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            database: "emogo".to_string(),
            collection: "entries".to_string(),
            cache_size: 64 * 1024 * 1024, // 64MB
            flush_interval_ms: Some(500),
        }
    }
}

impl DocumentStoreConfig {
    /// Name of the sled tree backing the collection
    pub fn tree_name(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}

/// Embedded document store holding the entry collection.
///
/// Documents are serialized as JSON and keyed by a store-wide monotonic
/// counter, so iteration order is insertion order.
pub struct DocumentStore {
    db: Arc<Db>,
    entries: Tree,
    location: StoreLocation,
}

impl DocumentStore {
    pub fn open(location: &StoreLocation, store_config: &DocumentStoreConfig) -> Result<Self, StorageError> {
        let config = match location {
            StoreLocation::Sled(path) => sled::Config::new().path(path),
            StoreLocation::Memory => sled::Config::new().temporary(true),
        }
        .cache_capacity(store_config.cache_size)
        .flush_every_ms(store_config.flush_interval_ms);

        let db = config.open()?;
        let entries = db.open_tree(store_config.tree_name())?;

        info!(
            "Opened document store at {} ({} entries in {})",
            location,
            entries.len(),
            store_config.tree_name()
        );

        Ok(Self {
            db: Arc::new(db),
            entries,
            location: location.clone(),
        })
    }

    /// Open a throwaway store with default settings
    pub fn temporary() -> Result<Self, StorageError> {
        Self::open(&StoreLocation::Memory, &DocumentStoreConfig::default())
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Allocate the next key and its public identifier.
    ///
    /// The identifier is 4 bytes of Unix seconds followed by the 8-byte
    /// counter, hex encoded (24 characters).
    fn next_id(&self) -> Result<([u8; 8], String), StorageError> {
        let counter = self.db.generate_id()?;
        let key = counter.to_be_bytes();
        let seconds = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;

        let mut raw = [0u8; 12];
        raw[..4].copy_from_slice(&seconds.to_be_bytes());
        raw[4..].copy_from_slice(&key);
        Ok((key, hex::encode(raw)))
    }
}

#[async_trait::async_trait]
impl EntryStore for DocumentStore {
    async fn insert_document(&self, mut doc: Document) -> Result<String, StorageError> {
        let (key, internal_id) = self.next_id()?;
        doc.insert(INTERNAL_ID_FIELD.to_string(), serde_json::Value::String(internal_id.clone()));

        let value = serde_json::to_vec(&doc)?;
        self.entries.insert(key, value)?;

        debug!("Inserted document {}", internal_id);
        Ok(internal_id)
    }

    async fn find_all(&self, projection: Projection) -> Result<Vec<Document>, StorageError> {
        let mut documents = Vec::with_capacity(self.entries.len());
        for result in self.entries.iter() {
            let (_, value) = result?;
            let doc: Document = serde_json::from_slice(&value)?;
            documents.push(projection.apply(doc));
        }
        Ok(documents)
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.entries.len())
    }

    async fn flush(&self) -> Result<(), StorageError> {
        let bytes = self.db.flush_async().await?;
        debug!("Flushed {} bytes to {}", bytes, self.location);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid store URI: {0}")]
    InvalidUri(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn entry_doc(id: i64, mood: i64) -> Document {
        match json!({
            "id": id,
            "latitude": 25.03,
            "longitude": 121.56,
            "mood": mood,
            "photoUri": null,
            "timestamp": "2024-01-01T10:00:00Z",
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_internal_id() -> Result<(), StorageError> {
        let store = DocumentStore::temporary()?;
        let first = store.insert_document(entry_doc(1, 3)).await?;
        let second = store.insert_document(entry_doc(2, 4)).await?;

        assert_eq!(first.len(), 24);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
        assert_eq!(store.count().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_strips_internal_id_and_keeps_order() -> Result<(), StorageError> {
        let store = DocumentStore::temporary()?;
        for id in 1..=5 {
            store.insert_document(entry_doc(id, id)).await?;
        }

        let docs = store.find_all(Projection::WITHOUT_INTERNAL_ID).await?;
        let ids: Vec<i64> = docs.iter().map(|d| d["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(docs.iter().all(|d| !d.contains_key(INTERNAL_ID_FIELD)));
        assert_eq!(docs[0], entry_doc(1, 1));
        Ok(())
    }

    #[tokio::test]
    async fn test_client_supplied_internal_id_is_replaced() -> Result<(), StorageError> {
        let store = DocumentStore::temporary()?;
        let mut doc = entry_doc(1, 1);
        doc.insert(INTERNAL_ID_FIELD.to_string(), json!("forged"));
        let id = store.insert_document(doc).await?;
        assert_ne!(id, "forged");
        Ok(())
    }

    #[tokio::test]
    async fn test_documents_survive_reopen() -> Result<(), StorageError> {
        let dir = tempdir().unwrap();
        let location = StoreLocation::Sled(dir.path().join("db"));
        let config = DocumentStoreConfig {
            flush_interval_ms: None,
            ..DocumentStoreConfig::default()
        };

        {
            let store = DocumentStore::open(&location, &config)?;
            store.insert_document(entry_doc(7, 2)).await?;
            store.flush().await?;
        }

        let store = DocumentStore::open(&location, &config)?;
        let docs = store.find_all(Projection::Include(&["id", "mood"])).await?;
        assert_eq!(docs, vec![match json!({"id": 7, "mood": 2}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }]);
        Ok(())
    }

    #[tokio::test]
    async fn test_collections_are_separate_trees() -> Result<(), StorageError> {
        let dir = tempdir().unwrap();
        let location = StoreLocation::Sled(dir.path().join("db"));
        let entries = DocumentStoreConfig {
            flush_interval_ms: None,
            ..DocumentStoreConfig::default()
        };
        let archive = DocumentStoreConfig {
            collection: "archive".to_string(),
            ..entries.clone()
        };

        {
            let store = DocumentStore::open(&location, &entries)?;
            store.insert_document(entry_doc(1, 1)).await?;
            store.flush().await?;
        }

        let store = DocumentStore::open(&location, &archive)?;
        assert_eq!(store.count().await?, 0);
        Ok(())
    }
}
