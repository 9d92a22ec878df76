//! HTML rendering for rich-text documents.

use crate::model::{Document, LinkNode, ListType, Node, TextNode, UploadNode};

use super::escape::push_escaped;
use super::visitor::{dispatch, NodeVisitor, VisitorAction};
use super::{RenderOptions, RenderResult, RenderStats};

/// Convert a document to an HTML fragment.
///
/// Never fails: unknown node kinds render their children and nodes with
/// missing fields degrade to partial or empty output.
pub fn to_html(doc: &Document) -> String {
    HtmlRenderer::new(RenderOptions::default()).render(doc)
}

/// Convert an optional document to HTML; an absent document renders to the
/// empty string.
pub fn render_html(doc: Option<&Document>) -> String {
    doc.map(to_html).unwrap_or_default()
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> RenderResult {
    let mut options = options.clone();
    options.collect_stats = true;
    HtmlRenderer::new(options).render_with_stats(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    visitor: Option<Box<dyn NodeVisitor>>,
    stats: RenderStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            visitor: None,
            stats: RenderStats::new(),
        }
    }

    /// Consult a visitor before each node.
    pub fn with_visitor<V: NodeVisitor + 'static>(self, visitor: V) -> Self {
        self.with_boxed_visitor(Box::new(visitor))
    }

    /// Consult an already boxed visitor before each node.
    pub fn with_boxed_visitor(mut self, visitor: Box<dyn NodeVisitor>) -> Self {
        self.visitor = Some(visitor);
        self
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &Document) -> String {
        self.render_internal(doc)
    }

    /// Render a document to HTML with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> RenderResult {
        self.options.collect_stats = true;
        let content = self.render_internal(doc);

        self.stats.count_text(&leaf_text(doc));

        RenderResult::new(content, self.stats)
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    fn render_internal(&mut self, doc: &Document) -> String {
        let mut output = String::new();
        if doc.is_empty() {
            return output;
        }

        self.start_document(doc.block_count());
        for node in doc.children() {
            self.render_node(&mut output, node);
        }
        self.end_document();

        output
    }

    pub(crate) fn start_document(&mut self, block_count: usize) {
        if let Some(visitor) = self.visitor.as_mut() {
            visitor.on_document_start(block_count);
        }
    }

    pub(crate) fn end_document(&mut self) {
        if let Some(visitor) = self.visitor.as_mut() {
            visitor.on_document_end();
        }
    }

    /// Render one node and its subtree to a new string.
    pub(crate) fn render_block(&mut self, node: &Node) -> String {
        let mut output = String::new();
        self.render_node(&mut output, node);
        output
    }

    fn render_node(&mut self, output: &mut String, node: &Node) {
        let action = match self.visitor.as_mut() {
            Some(visitor) => dispatch(visitor.as_mut(), node),
            None => VisitorAction::Continue,
        };

        match action {
            VisitorAction::Continue => self.render_default(output, node),
            VisitorAction::Replace(content) => output.push_str(&content),
            VisitorAction::Substitute(substitute) => self.render_default(output, &substitute),
            VisitorAction::Skip => {}
        }
    }

    fn render_children(&mut self, output: &mut String, children: &[Node]) {
        for child in children {
            self.render_node(output, child);
        }
    }

    fn render_default(&mut self, output: &mut String, node: &Node) {
        match node {
            Node::Text(text) => {
                if self.options.collect_stats {
                    self.stats.text_count += 1;
                }
                render_text(output, text);
            }
            Node::LineBreak => output.push_str("<br>"),
            Node::Tab => output.push('\t'),
            Node::Paragraph { children } => {
                if self.options.collect_stats {
                    self.stats.paragraph_count += 1;
                }
                self.render_paragraph(output, children);
            }
            Node::Heading { tag, children } => {
                if self.options.collect_stats {
                    self.stats.heading_count += 1;
                }
                self.render_wrapped(output, tag, children);
            }
            Node::Quote { children } => {
                if self.options.collect_stats {
                    self.stats.quote_count += 1;
                }
                self.render_wrapped(output, "blockquote", children);
            }
            Node::List {
                list_type,
                start,
                children,
            } => {
                if self.options.collect_stats {
                    self.stats.list_count += 1;
                }
                self.render_list(output, list_type, *start, children);
            }
            Node::ListItem { checked, children } => {
                if self.options.collect_stats {
                    self.stats.list_item_count += 1;
                    if checked.is_some() {
                        self.stats.checklist_item_count += 1;
                    }
                }
                self.render_list_item(output, *checked, children);
            }
            Node::Link(link) => {
                if self.options.collect_stats {
                    self.stats.link_count += 1;
                }
                self.render_link(output, link);
            }
            Node::HorizontalRule => {
                if self.options.collect_stats {
                    self.stats.horizontal_rule_count += 1;
                }
                output.push_str("<hr>");
            }
            Node::Upload(upload) => {
                if self.options.collect_stats && upload.url.is_some() {
                    self.stats.upload_count += 1;
                }
                render_upload(output, upload);
            }
            Node::Unknown { kind, children } => {
                log::trace!("Rendering children of unknown node kind `{}`", kind);
                if self.options.collect_stats {
                    self.stats.add_unknown(kind);
                }
                self.render_children(output, children);
            }
        }
    }

    /// An empty paragraph, or one holding only a line break, keeps its
    /// height as `<p><br></p>`.
    fn render_paragraph(&mut self, output: &mut String, children: &[Node]) {
        let mut inner = String::new();
        self.render_children(&mut inner, children);

        if inner.is_empty() || inner == "<br>" {
            output.push_str("<p><br></p>");
        } else {
            output.push_str("<p>");
            output.push_str(&inner);
            output.push_str("</p>");
        }
    }

    fn render_wrapped(&mut self, output: &mut String, tag: &str, children: &[Node]) {
        output.push('<');
        output.push_str(tag);
        output.push('>');
        self.render_children(output, children);
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
    }

    fn render_list(
        &mut self,
        output: &mut String,
        list_type: &ListType,
        start: Option<i64>,
        children: &[Node],
    ) {
        let tag = if list_type.is_ordered() { "ol" } else { "ul" };

        output.push('<');
        output.push_str(tag);
        if let Some(start) = start.filter(|s| list_type.is_ordered() && *s != 0 && *s != 1) {
            output.push_str(&format!(" start=\"{}\"", start));
        }
        output.push('>');
        self.render_children(output, children);
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
    }

    fn render_list_item(&mut self, output: &mut String, checked: Option<bool>, children: &[Node]) {
        match checked {
            Some(checked) => {
                output.push_str(&format!(
                    "<li role=\"checkbox\" aria-checked=\"{}\">",
                    checked
                ));
                output.push_str("<input type=\"checkbox\" disabled");
                if checked {
                    output.push_str(" checked");
                }
                output.push('>');
            }
            None => output.push_str("<li>"),
        }
        self.render_children(output, children);
        output.push_str("</li>");
    }

    fn render_link(&mut self, output: &mut String, link: &LinkNode) {
        output.push_str("<a href=\"");
        push_escaped(output, link.url.trim());
        output.push('"');
        if link.new_tab {
            output.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
        }
        output.push('>');
        self.render_children(output, &link.children);
        output.push_str("</a>");
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Escaped text wrapped in formatting tags, innermost first.
fn render_text(output: &mut String, text: &TextNode) {
    let tags: Vec<&str> = text.format.html_tags().collect();

    for tag in tags.iter().rev() {
        output.push('<');
        output.push_str(tag);
        output.push('>');
    }
    push_escaped(output, &text.text);
    for tag in &tags {
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
    }
}

/// Text leaves with a space for every other node, so a word split across
/// formatting runs still counts once.
fn leaf_text(doc: &Document) -> String {
    let mut text = String::new();
    for node in doc.walk() {
        match node {
            Node::Text(leaf) => text.push_str(&leaf.text),
            _ => text.push(' '),
        }
    }
    text
}

/// An upload without a URL renders nothing.
fn render_upload(output: &mut String, upload: &UploadNode) {
    let Some(url) = upload.url.as_deref() else {
        return;
    };

    output.push_str("<figure><img src=\"");
    push_escaped(output, url);
    output.push_str("\" alt=\"");
    push_escaped(output, upload.alt.as_deref().unwrap_or_default());
    output.push('"');
    if let Some((width, height)) = upload.dimensions() {
        output.push_str(&format!(" width=\"{}\" height=\"{}\"", width, height));
    }
    output.push_str(" loading=\"lazy\" decoding=\"async\"></figure>");
}
