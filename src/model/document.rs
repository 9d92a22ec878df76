//! Document-level types.

use serde::{Deserialize, Serialize};

use super::Node;

/// A rich-text document as stored by the CMS editor.
///
/// A `null` or missing root is the absent document; it renders to nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Root container
    #[serde(default, deserialize_with = "lenient_root")]
    pub root: Option<Root>,
}

impl Document {
    /// Create an absent (empty) document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from top-level nodes.
    pub fn with_children(children: Vec<Node>) -> Self {
        Self {
            root: Some(Root::new(children)),
        }
    }

    /// Top-level nodes; empty for an absent root.
    pub fn children(&self) -> &[Node] {
        self.root.as_ref().map_or(&[], |root| &root.children)
    }

    /// Append a top-level node, creating the root if needed.
    pub fn push(&mut self, node: Node) {
        self.root.get_or_insert_with(Root::default).children.push(node);
    }

    /// Check if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// Number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.children().len()
    }

    /// Iterate every node depth-first, parents before children.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.children().iter().rev().collect(),
        }
    }
}

/// The root container of a document.
///
/// Only `children` affects rendering; the remaining fields are kept so a
/// document can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    /// Always `"root"` in editor output
    #[serde(rename = "type", default = "root_type", deserialize_with = "lenient_string")]
    pub node_type: String,

    /// Top-level nodes in order
    #[serde(default, deserialize_with = "lenient_children")]
    pub children: Vec<Node>,

    /// Text direction ("ltr", "rtl") or none
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub direction: Option<String>,

    /// Block alignment ("left", "center", "" ...)
    #[serde(default, deserialize_with = "lenient_string")]
    pub format: String,

    /// Indentation level
    #[serde(default, deserialize_with = "lenient_u32")]
    pub indent: u32,

    /// Editor serialization version
    #[serde(default = "default_version", deserialize_with = "lenient_u32")]
    pub version: u32,
}

impl Root {
    /// Create a root with the given children.
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }
}

impl Default for Root {
    fn default() -> Self {
        Self {
            node_type: root_type(),
            children: Vec::new(),
            direction: Some("ltr".to_string()),
            format: String::new(),
            indent: 0,
            version: default_version(),
        }
    }
}

fn root_type() -> String {
    "root".to_string()
}

fn default_version() -> u32 {
    1
}

fn lenient_root<'de, D>(deserializer: D) -> Result<Option<Root>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Root::deserialize(value).map(Some).map_err(serde::de::Error::custom)
}

fn lenient_children<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|items| items.iter().map(Node::from_value).collect())
        .unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_default())
}

/// Depth-first iterator over a document's nodes.
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
