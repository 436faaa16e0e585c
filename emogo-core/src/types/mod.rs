//! Journal entry types

pub mod document;
pub mod entry;

pub use document::{Document, Projection, INTERNAL_ID_FIELD};
pub use entry::Entry;
