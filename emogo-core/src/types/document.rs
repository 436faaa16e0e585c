//! Stored documents and field projections.

use serde_json::{Map, Value};

/// A stored entry: field name to JSON value, in insertion order
pub type Document = Map<String, Value>;

/// Key the store uses for its own identifier. Never leaves the storage layer
/// through a read path.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// Field selection applied to every document returned by a find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Keep every field except the listed ones
    Exclude(&'static [&'static str]),
    /// Keep only the listed fields that the document has
    Include(&'static [&'static str]),
}

impl Projection {
    /// The full record minus the internal identifier
    pub const WITHOUT_INTERNAL_ID: Projection = Projection::Exclude(&[INTERNAL_ID_FIELD]);

    /// Project a document. Field order follows the document, not the
    /// projection, and the internal identifier is always dropped.
    pub fn apply(&self, doc: Document) -> Document {
        doc.into_iter()
            .filter(|(key, _)| key != INTERNAL_ID_FIELD && self.keeps(key))
            .collect()
    }

    fn keeps(&self, key: &str) -> bool {
        match self {
            Projection::Exclude(fields) => !fields.contains(&key),
            Projection::Include(fields) => fields.contains(&key),
        }
    }
}
