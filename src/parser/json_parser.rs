//! Rich-text document parser over CMS JSON payloads.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::detect::{detect_shape, is_rich_text_value, InputShape};
use crate::error::{Error, Result};
use crate::model::Document;

use super::options::{ErrorMode, ParseOptions};

/// A document together with the CMS entry fields that identify it.
#[derive(Debug, Clone, Default)]
pub struct ParsedEntry {
    /// Entry ID (numeric IDs are stringified)
    pub id: Option<String>,

    /// URL slug
    pub slug: Option<String>,

    /// Entry title
    pub title: Option<String>,

    /// The rich-text document
    pub document: Document,
}

/// Parser for rich-text JSON in any of the supported envelopes.
pub struct DocumentParser {
    value: Value,
    shape: InputShape,
    options: ParseOptions,
}

impl DocumentParser {
    /// Parse a JSON string.
    pub fn from_str(json: &str) -> Result<Self> {
        Self::from_str_with_options(json, ParseOptions::default())
    }

    /// Parse a JSON string with custom options.
    pub fn from_str_with_options(json: &str, options: ParseOptions) -> Result<Self> {
        let value = serde_json::from_str(json)?;
        Self::from_value_with_options(value, options)
    }

    /// Parse JSON bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse JSON bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let value = serde_json::from_slice(data)?;
        Self::from_value_with_options(value, options)
    }

    /// Parse JSON from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse JSON from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Open a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a JSON file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Wrap an already-parsed JSON value.
    pub fn from_value_with_options(value: Value, options: ParseOptions) -> Result<Self> {
        let shape = detect_shape(&value, &options.field)?;
        Ok(Self {
            value,
            shape,
            options,
        })
    }

    /// The detected input shape.
    pub fn shape(&self) -> &InputShape {
        &self.shape
    }

    /// Parse the single document.
    ///
    /// For a collection this is the first usable entry, or the empty
    /// document when there is none.
    pub fn parse(&self) -> Result<Document> {
        Ok(self
            .parse_entries()?
            .into_iter()
            .next()
            .map(|entry| entry.document)
            .unwrap_or_default())
    }

    /// Parse every document, in input order.
    pub fn parse_all(&self) -> Result<Vec<Document>> {
        Ok(self
            .parse_entries()?
            .into_iter()
            .map(|entry| entry.document)
            .collect())
    }

    /// Parse every document with its entry identification.
    pub fn parse_entries(&self) -> Result<Vec<ParsedEntry>> {
        match &self.shape {
            InputShape::EditorState => Ok(vec![ParsedEntry {
                document: document_from(&self.value)?,
                ..Default::default()
            }]),
            InputShape::Entry { field } => Ok(vec![entry_from(&self.value, field)?]),
            InputShape::Collection { count } => {
                log::debug!("Parsing collection of {} docs", count);
                self.parse_collection()
            }
        }
    }

    fn parse_collection(&self) -> Result<Vec<ParsedEntry>> {
        let docs = self
            .value
            .get("docs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let field = self.options.field.as_str();
        let mut entries = Vec::with_capacity(docs.len());

        for (index, doc) in docs.iter().enumerate() {
            if !doc.get(field).is_some_and(is_rich_text_value) {
                match self.options.error_mode {
                    ErrorMode::Strict => {
                        return Err(Error::MissingField {
                            index,
                            field: field.to_string(),
                        })
                    }
                    ErrorMode::Lenient => {
                        log::warn!("Skipping entry {}: no rich-text field `{}`", index, field);
                        continue;
                    }
                }
            }
            entries.push(entry_from(doc, field)?);
        }

        Ok(entries)
    }
}

fn document_from(value: &Value) -> Result<Document> {
    if value.is_null() {
        return Ok(Document::new());
    }
    Ok(Document::deserialize(value)?)
}

fn entry_from(value: &Value, field: &str) -> Result<ParsedEntry> {
    let document = match value.get(field) {
        Some(content) => document_from(content)?,
        None => Document::new(),
    };

    Ok(ParsedEntry {
        id: value.get("id").and_then(scalar_string),
        slug: value.get("slug").and_then(scalar_string),
        title: value.get("title").and_then(scalar_string),
        document,
    })
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use serde_json::json;

    fn editor_state(text: &str) -> Value {
        json!({
            "root": {
                "type": "root",
                "children": [{
                    "type": "paragraph",
                    "children": [{"type": "text", "text": text, "format": 0}]
                }]
            }
        })
    }

    #[test]
    fn test_parse_editor_state() {
        let json = editor_state("Hello").to_string();
        let parser = DocumentParser::from_str(&json).unwrap();
        assert_eq!(parser.shape(), &InputShape::EditorState);

        let doc = parser.parse().unwrap();
        assert_eq!(
            doc.children(),
            &[Node::paragraph(vec![Node::text("Hello")])]
        );
    }

    #[test]
    fn test_parse_entry_with_meta() {
        let json = json!({
            "id": 42,
            "slug": "hello-world",
            "title": "Hello",
            "content": editor_state("Body")
        })
        .to_string();

        let entries = DocumentParser::from_str(&json)
            .unwrap()
            .parse_entries()
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_deref(), Some("42"));
        assert_eq!(entries[0].slug.as_deref(), Some("hello-world"));
        assert_eq!(entries[0].document.block_count(), 1);
    }

    #[test]
    fn test_parse_entry_null_content() {
        let json = json!({"id": "a", "content": null}).to_string();
        let doc = DocumentParser::from_str(&json).unwrap().parse().unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_collection_strict_missing_field() {
        let json = json!({
            "docs": [
                {"id": "1", "content": editor_state("a")},
                {"id": "2", "title": "no content"}
            ]
        })
        .to_string();

        let parser = DocumentParser::from_str(&json).unwrap();
        let result = parser.parse_all();
        assert!(matches!(
            result,
            Err(Error::MissingField { index: 1, .. })
        ));
    }

    #[test]
    fn test_parse_collection_lenient_skips() {
        let json = json!({
            "docs": [
                {"id": "1", "title": "no content"},
                {"id": "2", "content": editor_state("b")}
            ]
        })
        .to_string();

        let parser =
            DocumentParser::from_str_with_options(&json, ParseOptions::new().lenient()).unwrap();
        let entries = parser.parse_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_empty_collection() {
        let parser = DocumentParser::from_str(r#"{"docs": []}"#).unwrap();
        assert!(parser.parse().unwrap().is_empty());
        assert!(parser.parse_all().unwrap().is_empty());
    }

    #[test]
    fn test_custom_field() {
        let json = json!({"body": editor_state("x")}).to_string();
        let options = ParseOptions::new().with_field("body");
        let doc = DocumentParser::from_str_with_options(&json, options)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            DocumentParser::from_bytes(b"not json"),
            Err(Error::Json(_))
        ));
    }
}
