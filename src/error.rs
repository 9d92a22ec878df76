//! Error types for lexrender library.

use std::io;
use thiserror::Error;

/// Result type alias for lexrender operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or converting documents.
///
/// Rendering itself never fails: malformed nodes degrade to their children
/// or to nothing. Errors only arise at the I/O and JSON boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is valid but holds no recognizable rich-text document.
    #[error("Unrecognized input shape: {0}")]
    UnknownShape(String),

    /// A collection entry lacks the rich-text field.
    #[error("Entry {index} has no rich-text field `{field}`")]
    MissingField {
        /// Zero-based position in the collection
        index: usize,
        /// Field that was looked up
        field: String,
    },

    /// Error while producing output (JSON re-serialization).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownShape("array".to_string());
        assert_eq!(err.to_string(), "Unrecognized input shape: array");

        let err = Error::MissingField {
            index: 2,
            field: "content".to_string(),
        };
        assert_eq!(err.to_string(), "Entry 2 has no rich-text field `content`");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
