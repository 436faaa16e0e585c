use actix_web::{web, HttpResponse};

use crate::api::error::ErrorResponse;
use crate::api::types::{ItemQuery, ItemResponse, MessageResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/items/{item_id}", web::get().to(read_item));
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Backend is running", body = MessageResponse)
    ),
    tag = "basic"
)]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "EmoGo backend is running.".to_string(),
    })
}

/// Echo an item id and optional query
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    params(
        ("item_id" = i64, Path, description = "Integer item id"),
        ItemQuery
    ),
    responses(
        (status = 200, description = "Echoed parameters", body = ItemResponse),
        (status = 422, description = "item_id is not an integer", body = ErrorResponse)
    ),
    tag = "basic"
)]
pub async fn read_item(path: web::Path<i64>, query: web::Query<ItemQuery>) -> HttpResponse {
    HttpResponse::Ok().json(ItemResponse {
        item_id: path.into_inner(),
        q: query.into_inner().q,
    })
}
