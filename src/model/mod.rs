//! Document model types for rich-text content.
//!
//! This module defines the typed tree the renderers consume. It is built
//! from the structured editor's JSON and never mutated while rendering.

mod document;
mod format;
mod node;

pub use document::{Document, Root, Walk};
pub use format::TextFormat;
pub use node::{
    LinkKind, LinkNode, ListType, Node, TextNode, UploadNode, DEFAULT_HEADING_TAG,
};
