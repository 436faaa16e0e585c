// Storage module for the EmoGo node
//
// This module persists journal entries in an embedded document store and
// exposes them to the API layer through the `EntryStore` trait.

pub mod database;
pub mod traits;
pub mod uri;

pub use database::{DocumentStore, DocumentStoreConfig, StorageError};
pub use traits::EntryStore;
pub use uri::StoreLocation;
