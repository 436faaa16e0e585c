//! API routes
//!
//! This module defines the HTTP routes of the EmoGo backend.

use actix_web::web;
use std::sync::Arc;

use super::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::storage::EntryStore;

pub mod entries;
pub mod export;
pub mod health;
pub mod root;

// Type alias for the store handle passed to route handlers
pub type StoreData = web::Data<Arc<dyn EntryStore>>;

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(root::configure)
        .configure(entries::configure)
        .configure(export::configure)
        .configure(health::configure);
}

/// Extractor settings shared by the server and the tests
pub fn configure_extractors(cfg: &mut web::ServiceConfig, json_limit: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(json_limit)
            .error_handler(json_error_handler),
    )
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}
