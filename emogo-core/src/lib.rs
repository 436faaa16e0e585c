//! EmoGo core
//!
//! Domain types for the EmoGo journaling backend: the [`Entry`] record clients
//! submit, the stored [`Document`] form, field [`Projection`]s and the four
//! export views with their HTML renderings. Nothing in this crate performs I/O.

pub mod error;
pub mod export;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use export::{ExportView, TablePage};
pub use types::{Document, Entry, Projection, INTERNAL_ID_FIELD};
