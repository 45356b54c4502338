#![forbid(unsafe_code)]

//! Glyph selection (Unicode line drawing vs ASCII fallbacks).

use std::fmt;
use std::str::FromStr;

/// Overall glyph rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphMode {
    /// Use Unicode box-drawing rules.
    #[default]
    Unicode,
    /// Use ASCII-only fallbacks.
    Ascii,
}

impl GlyphMode {
    /// Parse a user-supplied mode name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unicode" | "uni" | "u" => Some(Self::Unicode),
            "ascii" | "ansi" | "a" => Some(Self::Ascii),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unicode => "unicode",
            Self::Ascii => "ascii",
        }
    }

    #[must_use]
    pub const fn glyphs(self) -> Glyphs {
        match self {
            Self::Unicode => Glyphs::UNICODE,
            Self::Ascii => Glyphs::ASCII,
        }
    }
}

impl fmt::Display for GlyphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlyphMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| format!("unknown glyph mode {s:?} (expected unicode or ascii)"))
    }
}

/// The characters the grid is drawn with. All are single-width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Horizontal rule over the dividend and under each product.
    pub rule: char,
    /// Separator between divisor and dividend.
    pub bracket: char,
    /// Sign in front of each product.
    pub minus: char,
    /// Placeholder for a quotient digit that is being worked out.
    pub pending: char,
}

impl Glyphs {
    pub const UNICODE: Self = Self {
        rule: '─',
        bracket: ')',
        minus: '−',
        pending: '?',
    };

    pub const ASCII: Self = Self {
        rule: '-',
        bracket: ')',
        minus: '-',
        pending: '?',
    };
}
