//! Rendering module for converting documents to HTML, plain text and JSON.

mod batch;
mod cleanup;
mod escape;
mod html;
mod json;
mod options;
mod result;
pub mod streaming;
mod text;
pub mod visitor;

pub use batch::render_batch;
pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use escape::escape_html;
pub use html::{render_html, to_html, to_html_with_stats, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::{RenderResult, RenderStats};
pub use streaming::{collect_content, RenderEvent, StreamingRenderer};
pub use text::{excerpt, to_text};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, ExternalLinkVisitor, HeadingShiftVisitor, NodeVisitor,
    SkipUploadsVisitor, VisitorAction,
};
