//! Error types for the EmoGo domain layer

use thiserror::Error;

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while converting or rendering entries
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value could not be turned into a document
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The value serialized to something other than a JSON object
    #[error("{0} did not serialize to a JSON object")]
    NotAnObject(&'static str),

    /// No export view with this name
    #[error("Unknown export view: {0}")]
    UnknownView(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_view_message() {
        let err = CoreError::UnknownView("moods".into());
        assert_eq!(err.to_string(), "Unknown export view: moods");
    }
}
