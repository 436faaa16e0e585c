//! API server implementation
//!
//! Builds the actix-web application around a shared entry store: extractor
//! limits, middleware stack, routes and the optional Swagger UI.

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse},
    middleware, web, App, Error, HttpServer,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::middleware::ApiLogger;
use super::routes::{self, StoreData};
use crate::storage::EntryStore;

/// Configuration options for the API server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind address for the API server
    pub bind_address: String,
    /// Port for the API server
    pub port: u16,
    /// Serve OpenAPI JSON and Swagger UI
    pub enable_docs: bool,
    /// Maximum JSON payload size in kibibytes
    pub max_json_payload_size: usize,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Detailed request logging
    pub detailed_logging: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            enable_docs: true,
            max_json_payload_size: 64,
            request_timeout: 30,
            detailed_logging: true,
        }
    }
}

impl ApiConfig {
    pub fn json_limit_bytes(&self) -> usize {
        self.max_json_payload_size.saturating_mul(1024)
    }
}

/// API server
pub struct ApiServer {
    store: Arc<dyn EntryStore>,
    config: ApiConfig,
}

impl ApiServer {
    /// Create a new API server instance
    pub fn new(store: Arc<dyn EntryStore>, config: ApiConfig) -> Self {
        Self { store, config }
    }

    /// Bind the listener and return the running server handle
    pub fn start(self) -> std::io::Result<Server> {
        let store_data: StoreData = web::Data::new(self.store);
        let config = self.config;
        let app_config = config.clone();

        info!("Starting API server on {}:{}", config.bind_address, config.port);
        if config.enable_docs {
            info!("API docs at /swagger-ui/");
        }

        let server = HttpServer::new(move || build_app(store_data.clone(), &app_config))
            .client_request_timeout(Duration::from_secs(config.request_timeout))
            .bind((config.bind_address.as_str(), config.port))?
            .run();

        info!("API server started on {}:{}", config.bind_address, config.port);

        Ok(server)
    }
}

/// The application served by every worker: extractor limits, middleware,
/// routes and, when enabled, the docs.
pub fn build_app(
    store: StoreData,
    config: &ApiConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_limit = config.json_limit_bytes();
    let enable_docs = config.enable_docs;

    App::new()
        .app_data(store)
        .configure(|cfg| routes::configure_extractors(cfg, json_limit))
        .wrap(middleware::DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
        .wrap(middleware::Compress::default())
        .wrap(middleware::NormalizePath::trim())
        .wrap(Cors::permissive())
        .wrap(ApiLogger::new(config.detailed_logging))
        .configure(routes::configure)
        .configure(|cfg| {
            if enable_docs {
                configure_docs(cfg);
            }
        })
}

/// Mount the OpenAPI document and Swagger UI.
///
/// Trailing slashes are trimmed before routing, so `/swagger-ui/` arrives as
/// `/swagger-ui` and is redirected to the UI's index page.
pub fn configure_docs(cfg: &mut web::ServiceConfig) {
    cfg.service(web::redirect("/swagger-ui", "/swagger-ui/index.html"))
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
}
