//! Export views
//!
//! Every view is a fixed projection of the whole entry collection. Each one has
//! a JSON rendering (the projected records under a single envelope key) and an
//! HTML rendering built by the shared [`TablePage`] helper.

pub mod html;
pub mod view;

pub use html::{render_index_page, TablePage};
pub use view::ExportView;
