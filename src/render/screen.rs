//! Styled spans for on-screen display.
//!
//! The host walks these spans to build its own presentation (terminal
//! colors, a rich text widget, ...). Nothing here touches a display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{Block, BlockKind, Document};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s).ok_or_else(|| Error::Other(format!("Invalid color: {}", s)))
    }
}

/// Display sizes and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenTheme {
    /// Level 1, 2 and 3 heading sizes
    pub heading_sizes: [f32; 3],

    /// Size of body text, list items and blank lines
    pub body_size: f32,

    /// Color of level 1 and 2 headings
    pub accent: Rgb,

    /// Color of level 3 headings
    pub secondary: Rgb,

    /// Color of body text; `None` keeps the host default
    pub body_color: Option<Rgb>,
}

impl ScreenTheme {
    /// Create a theme with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accent color.
    pub fn with_accent(mut self, color: Rgb) -> Self {
        self.accent = color;
        self
    }

    /// Set the secondary color.
    pub fn with_secondary(mut self, color: Rgb) -> Self {
        self.secondary = color;
        self
    }

    /// Set the body text color.
    pub fn with_body_color(mut self, color: Rgb) -> Self {
        self.body_color = Some(color);
        self
    }

    /// Size and color of a block kind.
    pub fn style_for(&self, kind: BlockKind) -> (f32, Option<Rgb>) {
        match kind {
            BlockKind::Heading1 => (self.heading_sizes[0], Some(self.accent)),
            BlockKind::Heading2 => (self.heading_sizes[1], Some(self.accent)),
            BlockKind::Heading3 => (self.heading_sizes[2], Some(self.secondary)),
            _ => (self.body_size, self.body_color),
        }
    }
}

impl Default for ScreenTheme {
    fn default() -> Self {
        Self {
            heading_sizes: [24.0, 20.0, 18.0],
            body_size: 14.0,
            accent: Rgb(0x42, 0x85, 0xF4),
            secondary: Rgb(0x34, 0xA8, 0x53),
            body_color: None,
        }
    }
}

/// A piece of text with its display style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub size: f32,
    pub color: Option<Rgb>,
}

impl DisplaySpan {
    /// Whether this span only ends a line.
    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }
}

/// Convert a document to display spans, each block ending with a newline span.
pub fn to_display_spans(doc: &Document, theme: &ScreenTheme) -> Vec<DisplaySpan> {
    let mut spans = Vec::new();
    for block in &doc.blocks {
        push_block(&mut spans, block, theme);
    }
    spans
}

fn push_block(spans: &mut Vec<DisplaySpan>, block: &Block, theme: &ScreenTheme) {
    let (size, color) = theme.style_for(block.kind);
    let heading = block.kind.is_heading();

    for run in &block.runs {
        spans.push(DisplaySpan {
            text: run.text.clone(),
            bold: heading || run.bold,
            italic: run.italic,
            size,
            color,
        });
    }
    spans.push(DisplaySpan {
        text: "\n".to_string(),
        bold: heading,
        italic: false,
        size,
        color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify_and_format;

    #[test]
    fn test_heading_styles() {
        let doc = classify_and_format("# One\n## Two\n### Three");
        let spans = to_display_spans(&doc, &ScreenTheme::default());
        assert_eq!(spans.len(), 6);
        assert_eq!(spans[0].size, 24.0);
        assert_eq!(spans[0].color, Some(Rgb(0x42, 0x85, 0xF4)));
        assert!(spans[0].bold);
        assert_eq!(spans[2].size, 20.0);
        assert_eq!(spans[4].size, 18.0);
        assert_eq!(spans[4].color, Some(Rgb(0x34, 0xA8, 0x53)));
        assert!(spans[5].is_newline());
    }

    #[test]
    fn test_paragraph_runs_keep_flags() {
        let doc = classify_and_format("a **b** *c*");
        let spans = to_display_spans(&doc, &ScreenTheme::default());
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a ", "b", " ", "c", "\n"]);
        assert!(spans[1].bold && !spans[1].italic);
        assert!(spans[3].italic && !spans[3].bold);
        assert!(spans.iter().all(|s| s.size == 14.0 && s.color.is_none()));
    }

    #[test]
    fn test_blank_is_newline_only() {
        let doc = classify_and_format("   ");
        let spans = to_display_spans(&doc, &ScreenTheme::default());
        assert_eq!(spans.len(), 1);
        assert!(spans[0].is_newline());
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::from_hex("#4285F4"), Some(Rgb(0x42, 0x85, 0xF4)));
        assert_eq!(Rgb::from_hex("34a853"), Some(Rgb(0x34, 0xA8, 0x53)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb(0x42, 0x85, 0xF4).to_string(), "#4285F4");
        assert!("zzzzzz".parse::<Rgb>().is_err());
    }
}
