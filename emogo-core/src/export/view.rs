use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use super::html::TablePage;
use crate::error::CoreError;
use crate::types::{Document, Entry, Projection};

/// Prefix shared by every exported file name
pub const FILENAME_PREFIX: &str = "emogo";

/// The named export views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportView {
    /// Every entry field
    All,
    /// Photo references
    Vlogs,
    /// Mood ratings
    Sentiments,
    /// Coordinates
    Gps,
}

impl ExportView {
    /// All views, in index page order
    pub const ALL: [ExportView; 4] = [
        ExportView::All,
        ExportView::Vlogs,
        ExportView::Sentiments,
        ExportView::Gps,
    ];

    /// Path segment and file name component
    pub fn name(&self) -> &'static str {
        match self {
            ExportView::All => "all",
            ExportView::Vlogs => "vlogs",
            ExportView::Sentiments => "sentiments",
            ExportView::Gps => "gps",
        }
    }

    /// Key wrapping the records in the JSON rendering
    pub fn envelope_key(&self) -> &'static str {
        match self {
            ExportView::All => "data",
            other => other.name(),
        }
    }

    /// Human readable heading
    pub fn title(&self) -> &'static str {
        match self {
            ExportView::All => "All data (vlogs + sentiments + GPS)",
            ExportView::Vlogs => "Vlogs",
            ExportView::Sentiments => "Sentiments",
            ExportView::Gps => "GPS",
        }
    }

    /// Entry fields retained by this view, in stored order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ExportView::All => &Entry::FIELDS,
            ExportView::Vlogs => &["id", "photoUri", "timestamp"],
            ExportView::Sentiments => &["id", "mood", "timestamp"],
            ExportView::Gps => &["id", "latitude", "longitude", "timestamp"],
        }
    }

    /// Projection handed to the store
    pub fn projection(&self) -> Projection {
        match self {
            ExportView::All => Projection::WITHOUT_INTERNAL_ID,
            other => Projection::Include(other.columns()),
        }
    }

    pub fn filename_prefix(&self) -> String {
        format!("{}_{}", FILENAME_PREFIX, self.name())
    }

    /// JSON rendering: `{ "<envelope key>": [records...] }`
    pub fn envelope(&self, records: Vec<Document>) -> Value {
        envelope(self.envelope_key(), &records)
    }

    /// Table page template for the HTML rendering
    pub fn table_page(&self) -> TablePage {
        TablePage {
            view_name: self.name(),
            title: self.title(),
            envelope_key: self.envelope_key(),
            columns: self.columns(),
            filename_prefix: self.filename_prefix(),
        }
    }
}

/// `{ "<key>": [records...] }`, shared by both renderings
pub(crate) fn envelope(key: &str, records: &[Document]) -> Value {
    let mut body = serde_json::Map::with_capacity(1);
    body.insert(key.to_string(), json!(records));
    Value::Object(body)
}

impl fmt::Display for ExportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportView {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportView::ALL
            .into_iter()
            .find(|view| view.name() == s)
            .ok_or_else(|| CoreError::UnknownView(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::INTERNAL_ID_FIELD;

    fn stored(id: i64) -> Document {
        match json!({
            "id": id,
            "latitude": 25.03,
            "longitude": 121.56,
            "mood": 4,
            "photoUri": "p1.jpg",
            "timestamp": "2024-01-01T10:00:00Z",
            "_id": "65a0c0de0000000000000001",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_view_names_round_trip() {
        for view in ExportView::ALL {
            assert_eq!(view.name().parse::<ExportView>().unwrap(), view);
        }
        assert!("moods".parse::<ExportView>().is_err());
    }

    #[test]
    fn test_envelope_keys() {
        assert_eq!(ExportView::All.envelope_key(), "data");
        assert_eq!(ExportView::Vlogs.envelope_key(), "vlogs");
        assert_eq!(ExportView::Sentiments.envelope_key(), "sentiments");
        assert_eq!(ExportView::Gps.envelope_key(), "gps");
    }

    #[test]
    fn test_projection_matches_columns() {
        for view in ExportView::ALL {
            let doc = view.projection().apply(stored(1));
            let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
            assert_eq!(keys, view.columns(), "view {view}");
            assert!(!doc.contains_key(INTERNAL_ID_FIELD));
        }
    }

    #[test]
    fn test_envelope_wraps_records() {
        let records = vec![
            ExportView::Vlogs.projection().apply(stored(1)),
            ExportView::Vlogs.projection().apply(stored(2)),
        ];
        let body = ExportView::Vlogs.envelope(records);
        let vlogs = body["vlogs"].as_array().unwrap();
        assert_eq!(vlogs.len(), 2);
        assert_eq!(vlogs[1], json!({"id": 2, "photoUri": "p1.jpg", "timestamp": "2024-01-01T10:00:00Z"}));
    }

    #[test]
    fn test_filename_prefix() {
        assert_eq!(ExportView::Gps.filename_prefix(), "emogo_gps");
    }
}
