//! Health check endpoint
//!
//! Reports whether the document store answers. Used by container probes.

use actix_web::{web, HttpResponse};
use tracing::{debug, warn};

use super::StoreData;
use crate::api::types::HealthResponse;

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Store health
///
/// Returns 200 with the entry count when the store can be read, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store is reachable", body = HealthResponse),
        (status = 503, description = "Store is unavailable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(store: StoreData) -> HttpResponse {
    match store.count().await {
        Ok(entries) => {
            debug!("Health check: OK ({} entries)", entries);
            HttpResponse::Ok().json(HealthResponse {
                status: "ok".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                entries: Some(entries),
                error: None,
            })
        }
        Err(e) => {
            warn!("Health check: store unavailable - {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unavailable".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                entries: None,
                error: Some(e.to_string()),
            })
        }
    }
}
