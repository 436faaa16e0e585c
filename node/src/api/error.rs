//! API error types and error handling

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

/// API Result type alias
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// API error response structure
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub code: u16,
    /// Error message
    pub message: String,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Not found error
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed request (bad JSON syntax, wrong content type)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Well-formed request with missing or mistyped fields
    #[error("Validation error")]
    Validation(String),

    /// The store did not accept a write
    #[error("Insert failed")]
    InsertFailed(String),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn details(&self) -> Option<String> {
        match self {
            ApiError::Validation(details) | ApiError::InsertFailed(details) => Some(details.clone()),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_response = ErrorResponse {
            code: status_code.as_u16(),
            message: self.to_string(),
            details: self.details(),
        };

        HttpResponse::build(status_code).json(error_response)
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InsertFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Conversion from storage errors
impl From<crate::storage::StorageError> for ApiError {
    fn from(err: crate::storage::StorageError) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

/// Conversion from domain errors
impl From<emogo_core::CoreError> for ApiError {
    fn from(err: emogo_core::CoreError) -> Self {
        match err {
            emogo_core::CoreError::UnknownView(view) => {
                ApiError::NotFound(format!("export view '{}'", view))
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

/// Maps JSON body extraction failures. Type and missing-field problems are
/// validation errors; anything that is not parseable JSON is a bad request.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let api_error = match &err {
        JsonPayloadError::Deserialize(e) if e.is_data() => ApiError::Validation(e.to_string()),
        JsonPayloadError::Deserialize(e) => ApiError::BadRequest(format!("JSON error: {}", e)),
        JsonPayloadError::ContentType => {
            ApiError::BadRequest("Content type must be application/json".to_string())
        }
        other => ApiError::BadRequest(other.to_string()),
    };
    warn!("Rejected body for {} {}: {}", req.method(), req.path(), err);
    api_error.into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected path {}: {}", req.path(), err);
    ApiError::Validation(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected query for {}: {}", req.path(), err);
    ApiError::Validation(err.to_string()).into()
}
