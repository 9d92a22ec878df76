//! JSON parsing module.

mod json_parser;
mod options;

pub use json_parser::{DocumentParser, ParsedEntry};
pub use options::{ErrorMode, ParseOptions};
