//! Rich-text node types.
//!
//! The editor emits each node as an open JSON object tagged by `type`.
//! [`Node`] closes that vocabulary into one variant per recognized kind plus
//! [`Node::Unknown`], which keeps only the children so that future kinds
//! still render their readable content.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::TextFormat;

/// Heading tag used when a heading node declares none.
pub const DEFAULT_HEADING_TAG: &str = "h2";

/// A node of the rich-text tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A run of text with inline formatting
    Text(TextNode),

    /// A hard line break
    LineBreak,

    /// A tab character
    Tab,

    /// A paragraph block
    Paragraph {
        /// Inline children
        children: Vec<Node>,
    },

    /// A heading block
    Heading {
        /// Tag name as declared by the editor (e.g. "h2")
        tag: String,
        /// Inline children
        children: Vec<Node>,
    },

    /// A block quote
    Quote {
        /// Inline children
        children: Vec<Node>,
    },

    /// An ordered, bullet or check list
    List {
        /// List flavor
        list_type: ListType,
        /// Declared start number
        start: Option<i64>,
        /// List items
        children: Vec<Node>,
    },

    /// A list item, optionally a checklist entry
    ListItem {
        /// Checkbox state, `None` for plain items
        checked: Option<bool>,
        /// Item content, possibly nested lists
        children: Vec<Node>,
    },

    /// A hyperlink (`link` or `autolink`)
    Link(LinkNode),

    /// A horizontal rule
    HorizontalRule,

    /// An embedded media upload
    Upload(UploadNode),

    /// A node kind this crate does not recognize
    Unknown {
        /// The raw `type` discriminator
        kind: String,
        /// Children rendered in place of the node
        children: Vec<Node>,
    },
}

/// A text leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextNode {
    /// Raw, unescaped text
    pub text: String,

    /// Inline formatting
    pub format: TextFormat,
}

impl TextNode {
    /// Create an unformatted text node.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::plain(),
        }
    }

    /// Create a text node with a formatting bitmask.
    pub fn formatted(text: impl Into<String>, bits: i64) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::from_bits(bits),
        }
    }
}

/// List flavor, from the node's `listType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListType {
    /// `"number"`: rendered as `<ol>`
    Number,
    /// `"bullet"`: rendered as `<ul>`
    Bullet,
    /// `"check"`: rendered as `<ul>`
    Check,
    /// Any other value, rendered as `<ul>`
    Other(String),
}

impl ListType {
    /// Parse the editor's `listType` value.
    pub fn parse(s: &str) -> Self {
        match s {
            "number" => ListType::Number,
            "bullet" => ListType::Bullet,
            "check" => ListType::Check,
            other => ListType::Other(other.to_string()),
        }
    }

    /// The editor's name for this list type.
    pub fn as_str(&self) -> &str {
        match self {
            ListType::Number => "number",
            ListType::Bullet => "bullet",
            ListType::Check => "check",
            ListType::Other(s) => s,
        }
    }

    /// Whether items are numbered.
    pub fn is_ordered(&self) -> bool {
        matches!(self, ListType::Number)
    }
}

/// Which link kind the editor emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkKind {
    /// A link inserted by the author
    #[default]
    Link,
    /// A link detected automatically from typed text
    AutoLink,
}

impl LinkKind {
    fn as_str(self) -> &'static str {
        match self {
            LinkKind::Link => "link",
            LinkKind::AutoLink => "autolink",
        }
    }
}

/// A hyperlink node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkNode {
    /// `link` or `autolink`
    pub kind: LinkKind,

    /// Raw URL, untrimmed; empty when the node carried none
    pub url: String,

    /// Open in a new browsing context
    pub new_tab: bool,

    /// Link content
    pub children: Vec<Node>,
}

impl LinkNode {
    /// Create a link with the given URL and content.
    pub fn new(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            url: url.into(),
            children,
            ..Default::default()
        }
    }

    /// Set the new-tab flag.
    pub fn with_new_tab(mut self, new_tab: bool) -> Self {
        self.new_tab = new_tab;
        self
    }
}

/// An embedded media upload (the `value` of an `upload` node).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadNode {
    /// Public URL of the media; `None` when unpopulated
    pub url: Option<String>,

    /// Alternative text
    pub alt: Option<String>,

    /// Intrinsic width in pixels
    pub width: Option<u64>,

    /// Intrinsic height in pixels
    pub height: Option<u64>,

    /// MIME type reported by the CMS
    pub mime_type: Option<String>,
}

impl UploadNode {
    /// Create an upload with a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set alt text.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Set intrinsic dimensions.
    pub fn with_dimensions(mut self, width: u64, height: u64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Both dimensions, only when both are known.
    pub fn dimensions(&self) -> Option<(u64, u64)> {
        self.width.zip(self.height)
    }
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode::new(text))
    }

    /// Create a formatted text node.
    pub fn formatted(text: impl Into<String>, bits: i64) -> Self {
        Node::Text(TextNode::formatted(text, bits))
    }

    /// Create a paragraph.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph { children }
    }

    /// Create a heading with the given tag.
    pub fn heading(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Heading {
            tag: tag.into(),
            children,
        }
    }

    /// The editor's `type` discriminator for this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Text(_) => "text",
            Node::LineBreak => "linebreak",
            Node::Tab => "tab",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::Quote { .. } => "quote",
            Node::List { .. } => "list",
            Node::ListItem { .. } => "listitem",
            Node::Link(link) => link.kind.as_str(),
            Node::HorizontalRule => "horizontalrule",
            Node::Upload(_) => "upload",
            Node::Unknown { kind, .. } => kind,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Quote { children }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Unknown { children, .. } => children,
            Node::Link(link) => &link.children,
            Node::Text(_)
            | Node::LineBreak
            | Node::Tab
            | Node::HorizontalRule
            | Node::Upload(_) => &[],
        }
    }

    /// Check if this is a kind this crate does not recognize.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Node::Unknown { .. })
    }

    /// Build a node from the editor's JSON. Never fails: missing or
    /// mistyped fields fall back to defaults and unrecognized kinds become
    /// [`Node::Unknown`].
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Node::Unknown {
                kind: String::new(),
                children: Vec::new(),
            };
        };

        let kind = str_field(obj, "type").unwrap_or_default();
        match kind {
            "text" => Node::Text(TextNode {
                text: str_field(obj, "text").unwrap_or_default().to_string(),
                format: TextFormat::from_bits(integer(obj.get("format")).unwrap_or(0)),
            }),
            "linebreak" => Node::LineBreak,
            "tab" => Node::Tab,
            "paragraph" => Node::Paragraph {
                children: children_of(obj),
            },
            "heading" => Node::Heading {
                tag: str_field(obj, "tag").unwrap_or(DEFAULT_HEADING_TAG).to_string(),
                children: children_of(obj),
            },
            "quote" => Node::Quote {
                children: children_of(obj),
            },
            "list" => Node::List {
                list_type: ListType::parse(str_field(obj, "listType").unwrap_or_default()),
                start: integer(obj.get("start")),
                children: children_of(obj),
            },
            "listitem" => Node::ListItem {
                checked: obj.get("checked").and_then(Value::as_bool),
                children: children_of(obj),
            },
            "link" | "autolink" => Node::Link(link_from(obj, kind)),
            "horizontalrule" => Node::HorizontalRule,
            "upload" => Node::Upload(upload_from(obj.get("value"))),
            other => Node::Unknown {
                kind: other.to_string(),
                children: children_of(obj),
            },
        }
    }

    /// Convert back to the editor's JSON vocabulary.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".into(), Value::from(self.kind()));

        match self {
            Node::Text(text) => {
                obj.insert("text".into(), Value::from(text.text.as_str()));
                obj.insert("format".into(), Value::from(text.format.bits()));
            }
            Node::Heading { tag, .. } => {
                obj.insert("tag".into(), Value::from(tag.as_str()));
            }
            Node::List {
                list_type, start, ..
            } => {
                obj.insert("listType".into(), Value::from(list_type.as_str()));
                if let Some(start) = start {
                    obj.insert("start".into(), Value::from(*start));
                }
            }
            Node::ListItem { checked, .. } => {
                if let Some(checked) = checked {
                    obj.insert("checked".into(), Value::from(*checked));
                }
            }
            Node::Link(link) => {
                let mut fields = Map::new();
                fields.insert("url".into(), Value::from(link.url.as_str()));
                fields.insert("newTab".into(), Value::from(link.new_tab));
                obj.insert("fields".into(), Value::Object(fields));
            }
            Node::Upload(upload) => {
                let mut value = Map::new();
                if let Some(url) = &upload.url {
                    value.insert("url".into(), Value::from(url.as_str()));
                }
                if let Some(alt) = &upload.alt {
                    value.insert("alt".into(), Value::from(alt.as_str()));
                }
                if let Some(width) = upload.width {
                    value.insert("width".into(), Value::from(width));
                }
                if let Some(height) = upload.height {
                    value.insert("height".into(), Value::from(height));
                }
                if let Some(mime) = &upload.mime_type {
                    value.insert("mimeType".into(), Value::from(mime.as_str()));
                }
                obj.insert("value".into(), Value::Object(value));
            }
            _ => {}
        }

        let children = self.children();
        if !children.is_empty() || self.has_children_slot() {
            obj.insert(
                "children".into(),
                Value::Array(children.iter().map(Node::to_value).collect()),
            );
        }

        Value::Object(obj)
    }

    fn has_children_slot(&self) -> bool {
        !matches!(
            self,
            Node::Text(_) | Node::LineBreak | Node::Tab | Node::HorizontalRule | Node::Upload(_)
        )
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Node::from_value(&value))
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        Node::from_value(value)
    }
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn children_of(obj: &Map<String, Value>) -> Vec<Node> {
    obj.get("children")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(Node::from_value).collect())
        .unwrap_or_default()
}

/// Link attributes live under `fields` in newer editor versions and at the
/// top level in older ones; `fields` wins when it has the key.
fn link_from(obj: &Map<String, Value>, kind: &str) -> LinkNode {
    let fields = obj.get("fields").and_then(Value::as_object);

    let url = fields
        .and_then(|f| str_field(f, "url"))
        .or_else(|| str_field(obj, "url"))
        .unwrap_or_default();

    let new_tab = fields
        .and_then(|f| f.get("newTab"))
        .and_then(Value::as_bool)
        .or_else(|| obj.get("newTab").and_then(Value::as_bool))
        .unwrap_or(false);

    LinkNode {
        kind: if kind == "autolink" {
            LinkKind::AutoLink
        } else {
            LinkKind::Link
        },
        url: url.to_string(),
        new_tab,
        children: children_of(obj),
    }
}

/// An unpopulated relation (just an ID, or `null`) yields an upload with no
/// URL.
fn upload_from(value: Option<&Value>) -> UploadNode {
    let Some(value) = value.and_then(Value::as_object) else {
        return UploadNode::default();
    };

    UploadNode {
        url: str_field(value, "url")
            .filter(|url| !url.is_empty())
            .map(str::to_string),
        alt: str_field(value, "alt").map(str::to_string),
        width: dimension(value.get("width")),
        height: dimension(value.get("height")),
        mime_type: str_field(value, "mimeType").map(str::to_string),
    }
}

/// Integer field that also accepts integral floats such as `3.0`.
fn integer(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn dimension(value: Option<&Value>) -> Option<u64> {
    integer(value)
        .and_then(|n| u64::try_from(n).ok())
        .filter(|n| *n > 0)
}
