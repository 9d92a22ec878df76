//! Streaming renderer that yields HTML one top-level block at a time.
//!
//! The streaming renderer provides an iterator-based interface, so a large
//! document can be written to a socket or file without building the whole
//! fragment in memory first. Concatenating every [`RenderEvent::Block`]
//! gives exactly what [`to_html`](super::to_html) returns.
//!
//! # Example
//!
//! ```no_run
//! use lexrender::{parse_file, render::{StreamingRenderer, RenderEvent}};
//! use std::io::Write;
//!
//! fn main() -> lexrender::Result<()> {
//!     let doc = parse_file("page.json")?;
//!     let renderer = StreamingRenderer::new(&doc, Default::default());
//!     let mut out = std::io::stdout().lock();
//!
//!     for event in renderer {
//!         if let RenderEvent::Block(html) = event {
//!             out.write_all(html.as_bytes())?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use crate::model::Document;

use super::visitor::NodeVisitor;
use super::{HtmlRenderer, RenderOptions, RenderStats};

/// Events emitted during streaming rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// Document rendering has started.
    DocumentStart {
        /// Number of top-level blocks
        block_count: usize,
    },

    /// Rendered HTML of one top-level block.
    Block(String),

    /// Document rendering has completed.
    DocumentEnd,
}

impl RenderEvent {
    /// Check if this is a content-bearing event.
    pub fn has_content(&self) -> bool {
        matches!(self, RenderEvent::Block(_))
    }

    /// Get the content if this is a content event.
    pub fn content(&self) -> Option<&str> {
        match self {
            RenderEvent::Block(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is a document boundary event.
    pub fn is_document_boundary(&self) -> bool {
        matches!(
            self,
            RenderEvent::DocumentStart { .. } | RenderEvent::DocumentEnd
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// Before any output
    Initial,
    /// Rendering top-level blocks
    InDocument { block_index: usize },
    /// Rendering complete
    Done,
}

/// Streaming renderer that yields rendering events as an iterator.
pub struct StreamingRenderer<'a> {
    doc: &'a Document,
    renderer: HtmlRenderer,
    state: StreamState,
}

impl<'a> StreamingRenderer<'a> {
    /// Create a new streaming renderer.
    pub fn new(doc: &'a Document, options: RenderOptions) -> Self {
        Self {
            doc,
            renderer: HtmlRenderer::new(options),
            state: StreamState::Initial,
        }
    }

    /// Consult a visitor before each node.
    pub fn with_visitor<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.renderer = self.renderer.with_visitor(visitor);
        self
    }

    /// Number of top-level blocks in the document.
    pub fn block_count(&self) -> usize {
        self.doc.block_count()
    }

    /// Check if rendering is complete.
    pub fn is_done(&self) -> bool {
        self.state == StreamState::Done
    }

    /// Statistics collected so far (when enabled in the options).
    pub fn stats(&self) -> &RenderStats {
        self.renderer.stats()
    }
}

impl Iterator for StreamingRenderer<'_> {
    type Item = RenderEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                StreamState::Initial => {
                    let block_count = self.doc.block_count();
                    if block_count > 0 {
                        self.renderer.start_document(block_count);
                    }
                    self.state = StreamState::InDocument { block_index: 0 };
                    return Some(RenderEvent::DocumentStart { block_count });
                }

                StreamState::InDocument { block_index } => {
                    let blocks = self.doc.children();
                    let Some(node) = blocks.get(block_index) else {
                        if !blocks.is_empty() {
                            self.renderer.end_document();
                        }
                        self.state = StreamState::Done;
                        return Some(RenderEvent::DocumentEnd);
                    };

                    self.state = StreamState::InDocument {
                        block_index: block_index + 1,
                    };
                    let content = self.renderer.render_block(node);

                    // Skip empty content
                    if content.is_empty() {
                        continue;
                    }
                    return Some(RenderEvent::Block(content));
                }

                StreamState::Done => return None,
            }
        }
    }
}

/// Collect all content from a streaming renderer into a single string.
pub fn collect_content(renderer: StreamingRenderer<'_>) -> String {
    let mut output = String::new();
    for event in renderer {
        if let Some(content) = event.content() {
            output.push_str(content);
        }
    }
    output
}
