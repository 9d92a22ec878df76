//! Rendering result with statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML or text)
    pub content: String,

    /// Node statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: RenderStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Text leaves rendered
    pub text_count: u32,

    /// Paragraphs rendered
    pub paragraph_count: u32,

    /// Headings rendered
    pub heading_count: u32,

    /// Block quotes rendered
    pub quote_count: u32,

    /// Lists rendered (nested lists included)
    pub list_count: u32,

    /// List items rendered
    pub list_item_count: u32,

    /// List items carrying a checkbox
    pub checklist_item_count: u32,

    /// Links and autolinks rendered
    pub link_count: u32,

    /// Uploads that produced an image
    pub upload_count: u32,

    /// Horizontal rules rendered
    pub horizontal_rule_count: u32,

    /// Nodes of unrecognized kind
    pub unknown_count: u32,

    /// Unrecognized kinds and how often each appeared
    pub unknown_kinds: BTreeMap<String, u32>,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unrecognized node kind.
    pub fn add_unknown(&mut self, kind: &str) {
        self.unknown_count += 1;
        *self.unknown_kinds.entry(kind.to_string()).or_default() += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of block-level nodes rendered.
    pub fn block_count(&self) -> u32 {
        self.paragraph_count
            + self.heading_count
            + self.quote_count
            + self.list_count
            + self.horizontal_rule_count
            + self.upload_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.text_count += other.text_count;
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.quote_count += other.quote_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.checklist_item_count += other.checklist_item_count;
        self.link_count += other.link_count;
        self.upload_count += other.upload_count;
        self.horizontal_rule_count += other.horizontal_rule_count;
        self.unknown_count += other.unknown_count;
        for (kind, count) in &other.unknown_kinds {
            *self.unknown_kinds.entry(kind.clone()).or_default() += count;
        }
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
