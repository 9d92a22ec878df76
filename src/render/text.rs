//! Plain text rendering for rich-text documents.

use crate::model::{Document, ListType, Node};

use super::{CleanupOptions, CleanupPipeline, RenderOptions};

/// Convert a document to plain text.
///
/// Blocks are separated by blank lines, list items sit on their own lines
/// with a marker, and inline formatting is dropped.
pub fn to_text(doc: &Document, options: &RenderOptions) -> String {
    let mut renderer = TextRenderer::default();
    for node in doc.children() {
        renderer.render_block(node);
    }
    let mut output = renderer.output;

    if let Some(ref cleanup_options) = options.cleanup {
        let pipeline = CleanupPipeline::new(cleanup_options.clone());
        output = pipeline.process(&output);
    }

    output.trim().to_string()
}

/// Single-line summary of a document, cut on a word boundary.
///
/// Returns at most `max_chars` characters plus a trailing `…` when the text
/// was shortened. Suitable for meta descriptions and listing pages.
pub fn excerpt(doc: &Document, max_chars: usize) -> String {
    let options = RenderOptions::new().with_cleanup(CleanupOptions::aggressive());
    let text = to_text(doc, &options);
    truncate_words(&text, max_chars)
}

fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    // Byte offset of the first character past the limit
    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);
    let head = &text[..cut];

    let head = if text[cut..].starts_with(char::is_whitespace) {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(i) => &head[..i],
            None => head,
        }
    };

    format!("{}…", head.trim_end())
}

#[derive(Default)]
struct TextRenderer {
    output: String,
    depth: usize,
}

impl TextRenderer {
    fn render_block(&mut self, node: &Node) {
        match node {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Quote { children } => {
                self.render_inline_children(children);
                self.end_block();
            }
            Node::List {
                list_type,
                start,
                children,
            } => {
                self.render_list(list_type, *start, children);
                if self.depth == 0 {
                    self.end_block();
                }
            }
            Node::HorizontalRule => {
                self.start_line();
                self.output.push_str("---");
                self.end_block();
            }
            Node::Upload(upload) => {
                let alt = upload.alt.as_deref().unwrap_or_default().trim();
                if upload.url.is_some() && !alt.is_empty() {
                    self.start_line();
                    self.output.push_str(alt);
                    self.end_block();
                }
            }
            Node::Unknown { children, .. } => {
                for child in children {
                    self.render_block(child);
                }
            }
            _ => self.render_inline(node),
        }
    }

    fn render_inline_children(&mut self, children: &[Node]) {
        for child in children {
            self.render_inline(child);
        }
    }

    fn render_inline(&mut self, node: &Node) {
        match node {
            Node::Text(text) => self.output.push_str(&text.text),
            Node::LineBreak => self.output.push('\n'),
            Node::Tab => self.output.push('\t'),
            Node::Link(link) => self.render_inline_children(&link.children),
            Node::ListItem { children, .. } | Node::Unknown { children, .. } => {
                self.render_inline_children(children)
            }
            _ => self.render_block(node),
        }
    }

    fn render_list(&mut self, list_type: &ListType, start: Option<i64>, items: &[Node]) {
        // Zero behaves as absent, matching the HTML renderer's bare <ol>
        let mut number = start.filter(|s| *s != 0).unwrap_or(1);

        for item in items {
            let Node::ListItem { checked, children } = item else {
                self.render_inline(item);
                continue;
            };

            let (nested, inline): (Vec<&Node>, Vec<&Node>) = children
                .iter()
                .partition(|child| matches!(child, Node::List { .. }));

            if !inline.is_empty() {
                self.start_line();
                self.output.push_str(&"  ".repeat(self.depth));
                match checked {
                    Some(true) => self.output.push_str("[x] "),
                    Some(false) => self.output.push_str("[ ] "),
                    None if list_type.is_ordered() => {
                        self.output.push_str(&format!("{}. ", number));
                    }
                    None => self.output.push_str("- "),
                }
                for child in inline {
                    self.render_inline(child);
                }
                self.output.push('\n');
                number = number.saturating_add(1);
            }

            self.depth += 1;
            for list in nested {
                self.render_block(list);
            }
            self.depth -= 1;
        }
    }

    fn start_line(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }

    fn end_block(&mut self) {
        let trimmed = self.output.trim_end_matches('\n').len();
        self.output.truncate(trimmed);
        if !self.output.is_empty() {
            self.output.push_str("\n\n");
        }
    }
}
