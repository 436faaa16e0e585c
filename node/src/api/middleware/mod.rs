//! API middleware components

pub mod logging;

pub use logging::{get_request_id, ApiLogger, REQUEST_ID_HEADER};
