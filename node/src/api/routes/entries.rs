//! Entry ingestion and listing

use actix_web::{web, HttpResponse};
use emogo_core::{Entry, Projection};
use tracing::{debug, error, info};

use super::StoreData;
use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::api::types::{EntriesResponse, InsertResponse};

/// Configure entry routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/entries")
            .route(web::post().to(create_entry))
            .route(web::get().to(list_entries)),
    );
}

/// Store one journal entry
///
/// The body is stored exactly as decoded. No deduplication takes place, so
/// posting the same entry twice stores it twice.
#[utoipa::path(
    post,
    path = "/entries",
    request_body = Entry,
    responses(
        (status = 200, description = "Entry stored", body = InsertResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 422, description = "Missing or mistyped field", body = ErrorResponse),
        (status = 500, description = "Insert failed", body = ErrorResponse)
    ),
    tag = "entries"
)]
pub async fn create_entry(store: StoreData, entry: web::Json<Entry>) -> ApiResult<HttpResponse> {
    let doc = entry.into_inner().into_document()?;

    let inserted_id = store.insert_document(doc).await.map_err(|e| {
        error!("Failed to insert entry: {}", e);
        ApiError::InsertFailed(e.to_string())
    })?;

    info!("Stored entry {}", inserted_id);
    Ok(HttpResponse::Ok().json(InsertResponse {
        status: "ok".to_string(),
        inserted_id,
    }))
}

/// List every stored entry
///
/// Returns the whole collection in store order, without internal identifiers.
#[utoipa::path(
    get,
    path = "/entries",
    responses(
        (status = 200, description = "All entries", body = EntriesResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "entries"
)]
pub async fn list_entries(store: StoreData) -> ApiResult<HttpResponse> {
    let data = store.find_all(Projection::WITHOUT_INTERNAL_ID).await?;
    debug!("Listing {} entries", data.len());
    Ok(HttpResponse::Ok().json(EntriesResponse { data }))
}
