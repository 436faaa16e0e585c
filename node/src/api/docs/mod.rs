//! API documentation module
//!
//! OpenAPI description of every route, served with Swagger UI when
//! `api.enable_docs` is set.

use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::routes::{entries, export, health, root};
use crate::api::types::{EntriesResponse, HealthResponse, InsertResponse, ItemResponse, MessageResponse};

/// Generate OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        root::read_item,
        entries::create_entry,
        entries::list_entries,
        export::export_index,
        export::export_json,
        export::export_html,
        health::health_check,
    ),
    components(schemas(
        emogo_core::Entry,
        MessageResponse,
        ItemResponse,
        InsertResponse,
        EntriesResponse,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "basic", description = "Service banner and parameter echo"),
        (name = "entries", description = "Journal entry ingestion and listing"),
        (name = "export", description = "Field-projected export views"),
        (name = "health", description = "Store health"),
    ),
    info(title = "EmoGo API", description = "Mood and location journaling backend")
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/items/{item_id}", "/entries", "/export", "/export/{view}", "/export/{view}/html", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_error_responses_reference_error_schema() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schema = &json["paths"]["/entries"]["post"]["responses"]["422"]["content"]
            ["application/json"]["schema"]["$ref"];
        assert_eq!(schema, "#/components/schemas/ErrorResponse");
        assert!(json["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
