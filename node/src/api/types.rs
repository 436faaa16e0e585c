//! API request and response types

use emogo_core::Document;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Greeting returned by the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Echo of the item lookup parameters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    pub item_id: i64,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// Optional free-form query string
    pub q: Option<String>,
}

/// Acknowledgement of a stored entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsertResponse {
    /// Always "ok"
    pub status: String,
    /// Store-generated identifier, for debugging only
    pub inserted_id: String,
}

/// Every stored entry, internal identifiers removed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntriesResponse {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Document>,
}

/// Store health
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" or "unavailable"
    pub status: String,
    pub version: String,
    /// Stored entry count, when the store answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
