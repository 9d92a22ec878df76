//! # lexrender
//!
//! Server-side renderer for Lexical rich-text documents.
//!
//! This library turns the JSON tree a Lexical editor (as embedded in a
//! headless CMS) stores for rich-text fields into an HTML fragment, plain
//! text, or normalized JSON. Rendering never fails: unknown node kinds
//! render their children and malformed nodes degrade to partial output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lexrender::{parse_file, render};
//!
//! fn main() -> lexrender::Result<()> {
//!     // Parse an editor state, a CMS entry or a collection response
//!     let doc = parse_file("post.json")?;
//!
//!     // Convert to HTML
//!     let html = render::to_html(&doc);
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **HTML output**: Escaped, deterministic markup for every editor node kind
//! - **Plain text and excerpts**: For search indexes and meta descriptions
//! - **Visitors**: Rewrite, replace or drop nodes while rendering
//! - **Streaming**: Emit HTML one top-level block at a time
//! - **Parallel processing**: Uses Rayon for collections of documents

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{convert, ConvertOptions, ConvertResult, OutputFormat};
pub use detect::{detect_shape, detect_shape_from_bytes, detect_shape_from_path, InputShape};
pub use error::{Error, Result};
pub use model::{
    Document, LinkKind, LinkNode, ListType, Node, Root, TextFormat, TextNode, UploadNode,
};
pub use parser::{DocumentParser, ErrorMode, ParseOptions, ParsedEntry};
pub use render::{
    escape_html, render_html, CleanupOptions, CleanupPreset, JsonFormat, RenderOptions,
    RenderResult, RenderStats,
};

use std::io::Read;
use std::path::Path;

/// Parse a JSON string and return its document.
///
/// # Example
///
/// ```
/// use lexrender::{parse_str, render_html};
///
/// let doc = parse_str(r#"{"root": {"children": [{"type": "horizontalrule"}]}}"#).unwrap();
/// assert_eq!(render_html(Some(&doc)), "<hr>");
/// ```
pub fn parse_str(json: &str) -> Result<Document> {
    DocumentParser::from_str(json)?.parse()
}

/// Parse a JSON string with custom options.
pub fn parse_str_with_options(json: &str, options: ParseOptions) -> Result<Document> {
    DocumentParser::from_str_with_options(json, options)?.parse()
}

/// Parse a document from JSON bytes.
///
/// # Arguments
///
/// * `data` - UTF-8 JSON
///
/// # Example
///
/// ```no_run
/// use lexrender::parse_bytes;
///
/// let data = std::fs::read("post.json").unwrap();
/// let doc = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    DocumentParser::from_bytes(data)?.parse()
}

/// Parse a document from JSON bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    DocumentParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse a document from a reader.
///
/// # Example
///
/// ```no_run
/// use lexrender::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("post.json").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    DocumentParser::from_reader(reader)?.parse()
}

/// Parse a document from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Document> {
    DocumentParser::from_reader_with_options(reader, options)?.parse()
}

/// Parse a JSON file and return its document.
///
/// For a collection response this is the first document; use
/// [`DocumentParser::parse_all`] for all of them.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocumentParser::open(path)?.parse()
}

/// Parse a JSON file with custom options.
///
/// # Example
///
/// ```no_run
/// use lexrender::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .with_field("body");
/// let doc = parse_file_with_options("posts.json", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    DocumentParser::open_with_options(path, options)?.parse()
}

/// Convert a JSON file to HTML.
///
/// # Example
///
/// ```no_run
/// use lexrender::to_html;
///
/// let html = to_html("post.json").unwrap();
/// std::fs::write("post.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_html(&doc))
}

/// Convert a JSON file to plain text.
///
/// # Example
///
/// ```no_run
/// use lexrender::{to_text, RenderOptions, CleanupPreset};
///
/// let options = RenderOptions::new()
///     .with_cleanup_preset(CleanupPreset::Standard);
/// let text = to_text("post.json", &options).unwrap();
/// ```
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_text(&doc, options))
}

/// Re-serialize the document in a JSON file.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting rich-text documents.
///
/// # Example
///
/// ```no_run
/// use lexrender::Lexrender;
///
/// let text = Lexrender::new()
///     .with_field("body")
///     .lenient()
///     .parse("post.json")?
///     .to_text();
/// # Ok::<(), lexrender::Error>(())
/// ```
pub struct Lexrender {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Lexrender {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the rich-text field read from CMS entries.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_field(field);
        self
    }

    /// Set cleanup preset for text output.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.sequential();
        self
    }

    /// Parse a JSON file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<LexrenderResult> {
        let document = DocumentParser::open_with_options(path, self.parse_options)?.parse()?;
        Ok(LexrenderResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a JSON string.
    pub fn parse_str(self, json: &str) -> Result<LexrenderResult> {
        let document = DocumentParser::from_str_with_options(json, self.parse_options)?.parse()?;
        Ok(LexrenderResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse JSON bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<LexrenderResult> {
        let document =
            DocumentParser::from_bytes_with_options(data, self.parse_options)?.parse()?;
        Ok(LexrenderResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Lexrender {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a rich-text document.
pub struct LexrenderResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl LexrenderResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.document)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Single-line excerpt of at most `max_chars` characters.
    pub fn excerpt(&self, max_chars: usize) -> String {
        render::excerpt(&self.document, max_chars)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r#"{
        "id": 7,
        "title": "Hello",
        "content": {
            "root": {
                "type": "root",
                "children": [
                    {"type": "heading", "tag": "h1", "children": [{"type": "text", "text": "Hello"}]},
                    {"type": "paragraph", "children": [{"type": "text", "text": "World  & more"}]}
                ]
            }
        }
    }"#;

    #[test]
    fn test_lexrender_builder() {
        let builder = Lexrender::new()
            .lenient()
            .with_field("body")
            .with_cleanup(CleanupPreset::Standard)
            .sequential();

        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert_eq!(builder.parse_options.field, "body");
        assert!(builder.render_options.cleanup.is_some());
        assert!(!builder.render_options.parallel);
    }

    #[test]
    fn test_lexrender_builder_default() {
        let builder = Lexrender::default();
        assert_eq!(builder.parse_options.field, "content");
        assert!(builder.render_options.cleanup.is_none());
    }

    #[test]
    fn test_builder_parse_str_outputs() {
        let result = Lexrender::new()
            .with_cleanup(CleanupPreset::Standard)
            .parse_str(POST)
            .unwrap();

        assert_eq!(
            result.to_html(),
            "<h1>Hello</h1><p>World  &amp; more</p>"
        );
        assert_eq!(result.to_text(), "Hello\n\nWorld & more");
        assert_eq!(result.excerpt(8), "Hello…");
        assert_eq!(result.document().block_count(), 2);
        assert!(result.to_json(JsonFormat::Compact).is_ok());
    }

    #[test]
    fn test_parse_str_editor_state() {
        let doc = parse_str(r#"{"root": {"children": [{"type": "linebreak"}]}}"#).unwrap();
        assert_eq!(render_html(Some(&doc)), "<br>");
    }

    #[test]
    fn test_parse_bytes_invalid_json() {
        let result = parse_bytes(b"{not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_bytes_unknown_shape() {
        let result = parse_bytes(b"[1, 2, 3]");
        assert!(matches!(result, Err(Error::UnknownShape(_))));

        let result = parse_bytes(br#"{"title": "no rich text"}"#);
        assert!(matches!(result, Err(Error::UnknownShape(_))));
    }

    #[test]
    fn test_parse_reader() {
        let doc = parse_reader(POST.as_bytes()).unwrap();
        assert_eq!(doc.block_count(), 2);
    }

    #[test]
    fn test_parse_with_field_option() {
        let json = r#"{"body": {"root": {"children": [{"type": "horizontalrule"}]}}}"#;
        assert!(parse_str(json).is_err());

        let doc = parse_str_with_options(json, ParseOptions::new().with_field("body")).unwrap();
        assert_eq!(render::to_html(&doc), "<hr>");
    }

    #[test]
    fn test_null_root_is_absent() {
        let doc = parse_str(r#"{"root": null}"#).unwrap();
        assert!(doc.is_empty());
        assert_eq!(render::to_html(&doc), "");
    }
}
