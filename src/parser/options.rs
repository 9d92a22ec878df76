//! Parsing options and configuration.

use crate::detect::DEFAULT_FIELD;

/// Options for parsing rich-text JSON.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for collection entries
    pub error_mode: ErrorMode,

    /// Field holding the rich text on CMS entries
    pub field: String,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip entries without rich text).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the rich-text field name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            field: DEFAULT_FIELD.to_string(),
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when a collection entry has no rich-text field
    #[default]
    Strict,
    /// Skip such entries and continue
    Lenient,
}
