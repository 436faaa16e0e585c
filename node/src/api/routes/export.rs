//! Export routes
//!
//! `/export` is a static index. `/export/{view}` returns the projected records
//! as JSON and `/export/{view}/html` renders the same snapshot as a table page.

use actix_web::{http::header::ContentType, web, HttpResponse};
use emogo_core::export::render_index_page;
use emogo_core::ExportView;
use tracing::debug;

use super::StoreData;
use crate::api::error::{ApiResult, ErrorResponse};

/// Configure export routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/export", web::get().to(export_index))
        .route("/export/{view}", web::get().to(export_json))
        .route("/export/{view}/html", web::get().to(export_html));
}

/// Export index page
#[utoipa::path(
    get,
    path = "/export",
    responses(
        (status = 200, description = "Links to every export view", content_type = "text/html", body = String)
    ),
    tag = "export"
)]
pub async fn export_index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_index_page())
}

/// Projected records of one view
///
/// The records sit under a single key named after the view (`data` for
/// `all`).
#[utoipa::path(
    get,
    path = "/export/{view}",
    params(
        ("view" = String, Path, description = "One of all, vlogs, sentiments, gps")
    ),
    responses(
        (status = 200, description = "View records under the view's envelope key", content_type = "application/json"),
        (status = 404, description = "Unknown view", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "export"
)]
pub async fn export_json(store: StoreData, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let view: ExportView = path.parse()?;
    let records = store.find_all(view.projection()).await?;
    debug!("Exporting {} records for view {}", records.len(), view);
    Ok(HttpResponse::Ok().json(view.envelope(records)))
}

/// Table page of one view with per-row and bulk downloads
#[utoipa::path(
    get,
    path = "/export/{view}/html",
    params(
        ("view" = String, Path, description = "One of all, vlogs, sentiments, gps")
    ),
    responses(
        (status = 200, description = "HTML table page", content_type = "text/html", body = String),
        (status = 404, description = "Unknown view", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "export"
)]
pub async fn export_html(store: StoreData, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let view: ExportView = path.parse()?;
    let records = store.find_all(view.projection()).await?;
    debug!("Rendering {} records for view {}", records.len(), view);
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(view.table_page().render(&records)))
}
