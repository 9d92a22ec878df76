//! Text cleanup pipeline for plain-text output.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HORIZONTAL_SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{00A0}]{2,}").expect("valid regex"));

static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid regex"));

static ANY_WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization only
    Minimal,
    /// Standard cleanup: NFC + invisible characters + whitespace
    #[default]
    Standard,
    /// Aggressive cleanup: everything on one line
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove zero-width characters, soft hyphens and U+FFFD
    pub remove_invisible: bool,

    /// Collapse runs of spaces and tabs to one space
    pub collapse_spaces: bool,

    /// Strip spaces at line ends
    pub trim_line_ends: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,

    /// Collapse all whitespace, newlines included, to single spaces
    pub single_line: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_invisible: false,
            collapse_spaces: false,
            trim_line_ends: false,
            max_consecutive_newlines: 0,
            single_line: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_invisible: true,
            collapse_spaces: true,
            trim_line_ends: true,
            max_consecutive_newlines: 2,
            single_line: false,
        }
    }

    /// Aggressive cleanup options for excerpts and summaries.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            remove_invisible: true,
            collapse_spaces: true,
            trim_line_ends: true,
            max_consecutive_newlines: 1,
            single_line: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.remove_invisible {
            result = remove_invisible_chars(&result);
        }

        if self.options.single_line {
            return ANY_WHITESPACE_RUN
                .replace_all(&result, " ")
                .trim()
                .to_string();
        }

        if self.options.collapse_spaces {
            result = HORIZONTAL_SPACE_RUN.replace_all(&result, " ").into_owned();
        }

        if self.options.trim_line_ends {
            result = TRAILING_SPACE.replace_all(&result, "").into_owned();
        }

        if self.options.max_consecutive_newlines > 0 {
            result = self.limit_newlines(&result);
        }

        result.trim().to_string()
    }

    fn limit_newlines(&self, text: &str) -> String {
        let max = self.options.max_consecutive_newlines as usize;
        let mut result = String::with_capacity(text.len());
        let mut run = 0;
        for c in text.chars() {
            if c == '\n' {
                run += 1;
                if run > max {
                    continue;
                }
            } else {
                run = 0;
            }
            result.push(c);
        }
        result
    }
}

fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                c,
                '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}' | '\u{FFFD}'
            )
        })
        .collect()
}
