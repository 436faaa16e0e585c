//! EmoGo HTTP API
//!
//! Entry ingestion, listing, field-projected exports and health reporting
//! over a shared [`EntryStore`](crate::storage::EntryStore).

mod error;
mod server;
mod types;
pub mod docs;
pub mod middleware;
pub mod routes;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_app, configure_docs, ApiConfig, ApiServer};
pub use types::*;
