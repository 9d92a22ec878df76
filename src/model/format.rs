//! Inline text formatting decoded from the editor's bitmask.

use serde::{Deserialize, Serialize};

/// Inline formatting flags of a text node.
///
/// The editor stores formatting as an integer bitmask. It is decoded once
/// into named flags so that the renderers never test raw bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextFormat {
    /// Bold (bit 1)
    pub bold: bool,

    /// Italic (bit 2)
    pub italic: bool,

    /// Strikethrough (bit 4)
    pub strikethrough: bool,

    /// Underline (bit 8)
    pub underline: bool,

    /// Inline code (bit 16)
    pub code: bool,

    /// Subscript (bit 32)
    pub subscript: bool,

    /// Superscript (bit 64)
    pub superscript: bool,
}

impl TextFormat {
    pub const BOLD: i64 = 1;
    pub const ITALIC: i64 = 1 << 1;
    pub const STRIKETHROUGH: i64 = 1 << 2;
    pub const UNDERLINE: i64 = 1 << 3;
    pub const CODE: i64 = 1 << 4;
    pub const SUBSCRIPT: i64 = 1 << 5;
    pub const SUPERSCRIPT: i64 = 1 << 6;

    /// Plain text with no formatting.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Decode a bitmask. Each bit is tested independently; unknown bits are
    /// ignored and negative values decode by their low bits.
    pub fn from_bits(bits: i64) -> Self {
        Self {
            bold: bits & Self::BOLD != 0,
            italic: bits & Self::ITALIC != 0,
            strikethrough: bits & Self::STRIKETHROUGH != 0,
            underline: bits & Self::UNDERLINE != 0,
            code: bits & Self::CODE != 0,
            subscript: bits & Self::SUBSCRIPT != 0,
            superscript: bits & Self::SUPERSCRIPT != 0,
        }
    }

    /// Encode back to the editor's bitmask.
    pub fn bits(&self) -> i64 {
        let mut bits = 0;
        if self.bold {
            bits |= Self::BOLD;
        }
        if self.italic {
            bits |= Self::ITALIC;
        }
        if self.strikethrough {
            bits |= Self::STRIKETHROUGH;
        }
        if self.underline {
            bits |= Self::UNDERLINE;
        }
        if self.code {
            bits |= Self::CODE;
        }
        if self.subscript {
            bits |= Self::SUBSCRIPT;
        }
        if self.superscript {
            bits |= Self::SUPERSCRIPT;
        }
        bits
    }

    /// HTML tags for the active flags, innermost first.
    ///
    /// The order is fixed: code, strong, em, u, s, sub, sup. Rendered output
    /// must stay stable for every flag combination.
    pub fn html_tags(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.code, "code"),
            (self.bold, "strong"),
            (self.italic, "em"),
            (self.underline, "u"),
            (self.strikethrough, "s"),
            (self.subscript, "sub"),
            (self.superscript, "sup"),
        ]
        .into_iter()
        .filter_map(|(on, tag)| on.then_some(tag))
    }

    /// Check if any formatting is applied.
    pub fn has_formatting(&self) -> bool {
        self.bits() != 0
    }
}

impl From<i64> for TextFormat {
    fn from(bits: i64) -> Self {
        Self::from_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_single_flags() {
        assert!(TextFormat::from_bits(1).bold);
        assert!(TextFormat::from_bits(2).italic);
        assert!(TextFormat::from_bits(4).strikethrough);
        assert!(TextFormat::from_bits(8).underline);
        assert!(TextFormat::from_bits(16).code);
        assert!(TextFormat::from_bits(32).subscript);
        assert!(TextFormat::from_bits(64).superscript);
        assert!(!TextFormat::from_bits(0).has_formatting());
    }

    #[test]
    fn test_bits_roundtrip_all_combinations() {
        for bits in 0..128 {
            assert_eq!(TextFormat::from_bits(bits).bits(), bits);
        }
    }

    #[test]
    fn test_unknown_bits_ignored() {
        // 128 is the editor's highlight bit, not rendered
        let format = TextFormat::from_bits(128 | 1);
        assert_eq!(format.bits(), 1);
    }

    #[test]
    fn test_negative_bits() {
        let format = TextFormat::from_bits(-1);
        assert_eq!(format.bits(), 127);
    }

    #[test]
    fn test_html_tag_order() {
        let tags: Vec<_> = TextFormat::from_bits(127).html_tags().collect();
        assert_eq!(tags, vec!["code", "strong", "em", "u", "s", "sub", "sup"]);

        let tags: Vec<_> = TextFormat::from_bits(4 | 2).html_tags().collect();
        assert_eq!(tags, vec!["em", "s"]);
    }
}
