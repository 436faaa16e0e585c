//! The journal entry submitted by clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::document::Document;
use crate::error::{CoreError, CoreResult};

/// One mood/location journal record.
///
/// Decoding is the only validation the backend performs: required fields must
/// be present and of the declared primitive type. Ranges are not checked and
/// `timestamp` is kept exactly as the client formatted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Entry {
    /// Client-assigned identifier, not unique
    pub id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub mood: i64,
    /// Opaque photo reference (path or URL)
    #[serde(rename = "photoUri")]
    pub photo_uri: Option<String>,
    /// Client-formatted time, usually ISO 8601
    #[schema(example = "2024-01-01T10:00:00Z")]
    pub timestamp: String,
}

impl Entry {
    /// Names of every entry field, in stored order
    pub const FIELDS: [&'static str; 6] = ["id", "latitude", "longitude", "mood", "photoUri", "timestamp"];

    /// Convert into the document that gets stored.
    ///
    /// Absent optional fields become explicit nulls so every stored document
    /// carries all six fields.
    pub fn into_document(self) -> CoreResult<Document> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(CoreError::NotAnObject("entry")),
        }
    }
}
