use emogo_core::{Document, Projection};

use super::database::StorageError;

/// Storage trait for the entry collection.
///
/// Every method is a single store operation; nothing here spans calls, so
/// implementations only need per-operation atomicity.
#[async_trait::async_trait]
pub trait EntryStore: Send + Sync {
    /// Insert one document as-is and return the store-generated identifier
    async fn insert_document(&self, doc: Document) -> Result<String, StorageError>;

    /// Every document in default store order, projected
    async fn find_all(&self, projection: Projection) -> Result<Vec<Document>, StorageError>;

    /// Number of stored documents
    async fn count(&self) -> Result<usize, StorageError>;

    /// Persist pending writes
    async fn flush(&self) -> Result<(), StorageError>;
}
