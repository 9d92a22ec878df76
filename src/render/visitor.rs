//! Visitor pattern for customizing document rendering.
//!
//! A visitor is consulted before each node is rendered and may keep the
//! default markup, replace it, swap in a different node, or drop the node.
//!
//! # Example
//!
//! ```
//! use lexrender::render::visitor::{NodeVisitor, VisitorAction};
//! use lexrender::model::UploadNode;
//!
//! struct PlaceholderImages;
//!
//! impl NodeVisitor for PlaceholderImages {
//!     fn visit_upload(&mut self, _upload: &UploadNode) -> VisitorAction {
//!         VisitorAction::Replace("<!-- image omitted -->".to_string())
//!     }
//! }
//! ```

use crate::model::{LinkNode, ListType, Node, TextNode, UploadNode};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the node with custom output, inserted verbatim.
    Replace(String),

    /// Render this node instead. The substitute is not visited again,
    /// but its children are.
    Substitute(Node),

    /// Skip this node entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the node should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Check if this action leaves rendering untouched.
    pub fn is_continue(&self) -> bool {
        matches!(self, VisitorAction::Continue)
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting nodes during rendering.
///
/// [`visit_node`](NodeVisitor::visit_node) is called for every node first;
/// when it returns `Continue` the kind-specific method is called. All
/// methods return `VisitorAction::Continue` by default.
pub trait NodeVisitor: Send + Sync {
    /// Called before rendering any node.
    fn visit_node(&mut self, node: &Node) -> VisitorAction {
        let _ = node;
        VisitorAction::Continue
    }

    /// Called before rendering a text leaf.
    fn visit_text(&mut self, text: &TextNode) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a heading.
    ///
    /// # Arguments
    /// * `tag` - The declared tag (e.g. "h2")
    /// * `children` - Heading content
    fn visit_heading(&mut self, tag: &str, children: &[Node]) -> VisitorAction {
        let _ = (tag, children);
        VisitorAction::Continue
    }

    /// Called before rendering a link or autolink.
    fn visit_link(&mut self, link: &LinkNode) -> VisitorAction {
        let _ = link;
        VisitorAction::Continue
    }

    /// Called before rendering an upload.
    fn visit_upload(&mut self, upload: &UploadNode) -> VisitorAction {
        let _ = upload;
        VisitorAction::Continue
    }

    /// Called before rendering a list.
    fn visit_list(&mut self, list_type: &ListType, start: Option<i64>) -> VisitorAction {
        let _ = (list_type, start);
        VisitorAction::Continue
    }

    /// Called before rendering a node of unrecognized kind.
    fn visit_unknown(&mut self, kind: &str, children: &[Node]) -> VisitorAction {
        let _ = (kind, children);
        VisitorAction::Continue
    }

    /// Called before the first top-level node.
    fn on_document_start(&mut self, block_count: usize) {
        let _ = block_count;
    }

    /// Called after the last top-level node.
    fn on_document_end(&mut self) {}
}

/// Ask a visitor about a node: `visit_node` first, then the kind hook.
pub(crate) fn dispatch(visitor: &mut dyn NodeVisitor, node: &Node) -> VisitorAction {
    let action = visitor.visit_node(node);
    if !action.is_continue() {
        return action;
    }

    match node {
        Node::Text(text) => visitor.visit_text(text),
        Node::Heading { tag, children } => visitor.visit_heading(tag, children),
        Node::Link(link) => visitor.visit_link(link),
        Node::Upload(upload) => visitor.visit_upload(upload),
        Node::List {
            list_type, start, ..
        } => visitor.visit_list(list_type, *start),
        Node::Unknown { kind, children } => visitor.visit_unknown(kind, children),
        _ => VisitorAction::Continue,
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl NodeVisitor for DefaultVisitor {}

/// Visitor that drops all uploads.
#[derive(Debug, Clone, Default)]
pub struct SkipUploadsVisitor;

impl NodeVisitor for SkipUploadsVisitor {
    fn visit_upload(&mut self, _upload: &UploadNode) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that opens off-site links in a new tab.
///
/// A link is off-site when its URL is absolute http(s) and its host differs
/// from the configured site host.
#[derive(Debug, Clone)]
pub struct ExternalLinkVisitor {
    site_host: String,
}

impl ExternalLinkVisitor {
    /// Create a visitor for the given site host (e.g. "example.com").
    pub fn new(site_host: impl Into<String>) -> Self {
        Self {
            site_host: site_host.into().to_ascii_lowercase(),
        }
    }

    fn is_external(&self, url: &str) -> bool {
        let url = url.trim();
        let Some((scheme, rest)) = url.split_once("://") else {
            return false;
        };
        if !scheme.eq_ignore_ascii_case("https") && !scheme.eq_ignore_ascii_case("http") {
            return false;
        }

        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let host = authority.rsplit('@').next().unwrap_or_default();
        let host = host.split(':').next().unwrap_or_default();
        !host.eq_ignore_ascii_case(&self.site_host)
    }
}

impl NodeVisitor for ExternalLinkVisitor {
    fn visit_link(&mut self, link: &LinkNode) -> VisitorAction {
        if link.new_tab || !self.is_external(&link.url) {
            return VisitorAction::Continue;
        }
        VisitorAction::Substitute(Node::Link(link.clone().with_new_tab(true)))
    }
}

/// Visitor that demotes headings by a fixed number of levels.
///
/// Useful when embedding content under a page that already has an `h1`.
/// Levels are clamped to `h6`; tags that are not `h1`-`h6` are left alone.
#[derive(Debug, Clone)]
pub struct HeadingShiftVisitor {
    shift: u8,
}

impl HeadingShiftVisitor {
    /// Create a visitor that demotes headings by `shift` levels.
    pub fn new(shift: u8) -> Self {
        Self { shift }
    }
}

impl NodeVisitor for HeadingShiftVisitor {
    fn visit_heading(&mut self, tag: &str, children: &[Node]) -> VisitorAction {
        let level = tag
            .strip_prefix('h')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=6).contains(n));
        let Some(level) = level else {
            return VisitorAction::Continue;
        };

        let shifted = level.saturating_add(self.shift).min(6);
        if shifted == level {
            return VisitorAction::Continue;
        }
        VisitorAction::Substitute(Node::heading(format!("h{}", shifted), children.to_vec()))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn NodeVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeVisitor for CompositeVisitor {
    fn visit_node(&mut self, node: &Node) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = dispatch(visitor.as_mut(), node);
            if !action.is_continue() {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn on_document_start(&mut self, block_count: usize) {
        for visitor in &mut self.visitors {
            visitor.on_document_start(block_count);
        }
    }

    fn on_document_end(&mut self) {
        for visitor in &mut self.visitors {
            visitor.on_document_end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_action_default() {
        let action = VisitorAction::default();
        assert!(action.is_continue());
    }

    #[test]
    fn test_visitor_action_should_skip() {
        assert!(!VisitorAction::Continue.should_skip());
        assert!(!VisitorAction::Replace("test".into()).should_skip());
        assert!(VisitorAction::Skip.should_skip());
    }

    #[test]
    fn test_visitor_action_replacement() {
        assert!(VisitorAction::Continue.replacement().is_none());
        assert!(VisitorAction::Skip.replacement().is_none());
        assert_eq!(
            VisitorAction::Replace("hello".into()).replacement(),
            Some("hello")
        );
    }

    #[test]
    fn test_dispatch_reaches_kind_hook() {
        let mut visitor = SkipUploadsVisitor;
        let action = dispatch(&mut visitor, &Node::Upload(UploadNode::new("/a.png")));
        assert!(action.should_skip());

        let action = dispatch(&mut visitor, &Node::text("x"));
        assert!(action.is_continue());
    }

    #[test]
    fn test_external_link_detection() {
        let visitor = ExternalLinkVisitor::new("Example.com");
        assert!(visitor.is_external("https://other.org/page"));
        assert!(visitor.is_external(" http://user@other.org:8080/x "));
        assert!(!visitor.is_external("https://example.com/blog"));
        assert!(!visitor.is_external("https://EXAMPLE.com?q=1"));
        assert!(!visitor.is_external("/blog/post"));
        assert!(!visitor.is_external("mailto:someone@other.org"));
        assert!(visitor.is_external("HTTPS://other.org"));
        assert!(visitor.is_external("Http://other.org/x"));
        assert!(!visitor.is_external("HTTPS://example.com/"));
        assert!(!visitor.is_external("/go?to=https://other.org"));
    }

    #[test]
    fn test_external_link_substitutes_new_tab() {
        let mut visitor = ExternalLinkVisitor::new("example.com");
        let link = LinkNode::new("https://rust-lang.org", vec![Node::text("Rust")]);
        let action = visitor.visit_link(&link);
        assert_eq!(
            action,
            VisitorAction::Substitute(Node::Link(link.clone().with_new_tab(true)))
        );

        let already = link.with_new_tab(true);
        assert!(visitor.visit_link(&already).is_continue());
    }

    #[test]
    fn test_heading_shift() {
        let mut visitor = HeadingShiftVisitor::new(1);
        let action = visitor.visit_heading("h2", &[Node::text("T")]);
        assert_eq!(
            action,
            VisitorAction::Substitute(Node::heading("h3", vec![Node::text("T")]))
        );

        // Clamped at h6
        assert!(visitor.visit_heading("h6", &[]).is_continue());
        // Unrecognized tags untouched
        assert!(visitor.visit_heading("div", &[]).is_continue());
    }

    #[test]
    fn test_composite_visitor() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(DefaultVisitor)
            .with_visitor(SkipUploadsVisitor);
        assert_eq!(composite.len(), 2);

        let action = dispatch(&mut composite, &Node::Upload(UploadNode::new("/x.png")));
        assert!(action.should_skip());

        let action = dispatch(&mut composite, &Node::paragraph(vec![]));
        assert!(action.is_continue());
    }
}
