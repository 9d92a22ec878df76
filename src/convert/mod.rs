//! One-call conversion of a document to a chosen output format.
//!
//! # Example
//!
//! ```no_run
//! use lexrender::convert::{convert, ConvertOptions, OutputFormat};
//!
//! fn main() -> lexrender::Result<()> {
//!     let doc = lexrender::parse_file("page.json")?;
//!     let options = ConvertOptions::new().with_format(OutputFormat::Text);
//!     let result = convert(&doc, &options)?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

use crate::error::Result;
use crate::model::Document;
use crate::render::{self, HtmlRenderer, JsonFormat, RenderOptions, RenderStats};

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// HTML fragment
    #[default]
    Html,

    /// Plain text
    Text,

    /// Editor JSON
    Json,
}

impl OutputFormat {
    /// All formats, in the order the CLI writes them.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Html, OutputFormat::Text, OutputFormat::Json];

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub format: OutputFormat,

    /// Layout of JSON output
    pub json_format: JsonFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.render.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Format of the content
    pub format: OutputFormat,

    /// Node statistics (if collected)
    pub stats: Option<RenderStats>,
}

impl ConvertResult {
    /// MIME type of the content.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Convert a document to the format named in the options.
///
/// Only JSON output can fail.
pub fn convert(doc: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
    let content = match options.format {
        OutputFormat::Html => HtmlRenderer::new(options.render.clone()).render(doc),
        OutputFormat::Text => render::to_text(doc, &options.render),
        OutputFormat::Json => render::to_json(doc, options.json_format)?,
    };

    let stats = options
        .render
        .collect_stats
        .then(|| render::to_html_with_stats(doc, &options.render).stats);

    Ok(ConvertResult {
        content,
        format: options.format,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    fn sample() -> Document {
        Document::with_children(vec![
            Node::heading("h1", vec![Node::text("Title")]),
            Node::paragraph(vec![Node::text("a & b")]),
        ])
    }

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_stats(true)
            .with_format(OutputFormat::Text)
            .with_json_format(JsonFormat::Compact);

        assert!(options.render.collect_stats);
        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(options.json_format, JsonFormat::Compact);
    }

    #[test]
    fn test_output_format_metadata() {
        assert_eq!(OutputFormat::default(), OutputFormat::Html);
        assert_eq!(OutputFormat::Html.mime_type(), "text/html");
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_convert_each_format() {
        let doc = sample();

        let html = convert(&doc, &ConvertOptions::new()).unwrap();
        assert_eq!(html.content, "<h1>Title</h1><p>a &amp; b</p>");
        assert_eq!(html.mime_type(), "text/html");
        assert!(html.stats.is_none());

        let text = convert(&doc, &ConvertOptions::new().with_format(OutputFormat::Text)).unwrap();
        assert_eq!(text.content, "Title\n\na & b");

        let json = convert(&doc, &ConvertOptions::new().with_format(OutputFormat::Json)).unwrap();
        assert!(json.content.contains("\"heading\""));
    }

    #[test]
    fn test_convert_with_stats() {
        let result = convert(&sample(), &ConvertOptions::new().with_stats(true)).unwrap();
        let stats = result.stats.unwrap();
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
    }
}
