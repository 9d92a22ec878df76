//! Input shape detection for CMS JSON payloads.
//!
//! A headless CMS hands out rich text in three envelopes: the bare editor
//! state, a single entry carrying the editor state in a field, and a
//! paginated collection of entries under `docs`.

use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Field that holds rich text on CMS entries unless configured otherwise.
pub const DEFAULT_FIELD: &str = "content";

/// Shape of a JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputShape {
    /// A bare editor state: `{"root": {...}}`
    EditorState,

    /// A single CMS entry holding an editor state in `field`
    Entry {
        /// Field name holding the rich text
        field: String,
    },

    /// A collection response: `{"docs": [...]}`
    Collection {
        /// Number of entries in `docs`
        count: usize,
    },
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputShape::EditorState => write!(f, "editor state"),
            InputShape::Entry { field } => write!(f, "entry (field `{}`)", field),
            InputShape::Collection { count } => write!(f, "collection ({} docs)", count),
        }
    }
}

/// Detect the shape of a parsed JSON value.
///
/// # Arguments
/// * `value` - Parsed JSON
/// * `field` - Rich-text field name to look for on entries
///
/// # Returns
/// * `Ok(InputShape)` for a recognized envelope
/// * `Err(Error::UnknownShape)` otherwise
pub fn detect_shape(value: &Value, field: &str) -> Result<InputShape> {
    let Some(obj) = value.as_object() else {
        return Err(Error::UnknownShape(json_kind(value).to_string()));
    };

    let shape = if obj.contains_key("root") {
        InputShape::EditorState
    } else if let Some(docs) = obj.get("docs").and_then(Value::as_array) {
        InputShape::Collection { count: docs.len() }
    } else if obj.get(field).is_some_and(is_rich_text_value) {
        InputShape::Entry {
            field: field.to_string(),
        }
    } else {
        return Err(Error::UnknownShape(format!(
            "object without `root`, `docs` or `{}`",
            field
        )));
    };

    log::debug!("Detected input shape: {}", shape);
    Ok(shape)
}

/// Detect the shape of raw JSON bytes.
pub fn detect_shape_from_bytes(data: &[u8], field: &str) -> Result<InputShape> {
    let value: Value = serde_json::from_slice(data)?;
    detect_shape(&value, field)
}

/// Detect the shape of a JSON file.
///
/// # Example
/// ```no_run
/// use lexrender::detect::{detect_shape_from_path, DEFAULT_FIELD};
///
/// let shape = detect_shape_from_path("post.json", DEFAULT_FIELD).unwrap();
/// println!("Input is a {}", shape);
/// ```
pub fn detect_shape_from_path<P: AsRef<Path>>(path: P, field: &str) -> Result<InputShape> {
    let data = fs::read(path)?;
    detect_shape_from_bytes(&data, field)
}

/// Check if a value looks like an editor state.
pub fn is_editor_state(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key("root"))
}

/// A rich-text field is either an editor state or `null` (never edited).
pub(crate) fn is_rich_text_value(value: &Value) -> bool {
    value.is_null() || is_editor_state(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_editor_state() {
        let value = json!({"root": {"children": []}});
        assert_eq!(
            detect_shape(&value, DEFAULT_FIELD).unwrap(),
            InputShape::EditorState
        );
    }

    #[test]
    fn test_detect_entry() {
        let value = json!({"id": "1", "title": "Hi", "content": {"root": {"children": []}}});
        assert_eq!(
            detect_shape(&value, DEFAULT_FIELD).unwrap(),
            InputShape::Entry {
                field: "content".to_string()
            }
        );

        let value = json!({"id": "1", "body": null});
        assert!(matches!(
            detect_shape(&value, "body").unwrap(),
            InputShape::Entry { .. }
        ));
    }

    #[test]
    fn test_detect_collection() {
        let value = json!({"docs": [{}, {}], "totalDocs": 2, "page": 1});
        assert_eq!(
            detect_shape(&value, DEFAULT_FIELD).unwrap(),
            InputShape::Collection { count: 2 }
        );
    }

    #[test]
    fn test_detect_unknown() {
        let result = detect_shape(&json!([1, 2]), DEFAULT_FIELD);
        assert!(matches!(result, Err(Error::UnknownShape(ref s)) if s == "array"));

        let result = detect_shape(&json!({"content": "plain string"}), DEFAULT_FIELD);
        assert!(matches!(result, Err(Error::UnknownShape(_))));
    }

    #[test]
    fn test_detect_from_bytes_invalid_json() {
        let result = detect_shape_from_bytes(b"{not json", DEFAULT_FIELD);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
