//! Page geometry and font configuration for pagination.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::BlockKind;

/// Distance between the top edge of the page and the first baseline.
const DEFAULT_HEADROOM: f32 = 42.0;

/// Options controlling page geometry, leading, chunking and fonts.
///
/// Defaults reproduce the original export: US Letter, 50pt margin, first
/// baseline at 750pt, 15pt leading, 80-character chunks, 12pt body text and
/// 16/14/14pt headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Page width in points (1 point = 1/72 inch)
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Left and bottom margin in points
    pub margin: f32,

    /// Baseline of the first line on each page, measured from the bottom edge
    pub top_offset: f32,

    /// Vertical advance per emitted line
    pub leading: f32,

    /// Maximum characters per line before fixed-width chunking kicks in
    pub chunk_size: usize,

    /// Font size for paragraphs, list items and blank lines
    pub body_font_size: f32,

    /// Font sizes for heading levels 1, 2 and 3
    pub heading_font_sizes: [f32; 3],
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for an arbitrary page geometry; the first baseline keeps the
    /// default distance from the top edge.
    pub fn geometry(
        page_width: f32,
        page_height: f32,
        margin: f32,
        leading: f32,
        chunk_size: usize,
    ) -> Self {
        Self {
            page_width,
            page_height,
            margin,
            top_offset: page_height - DEFAULT_HEADROOM,
            leading,
            chunk_size,
            ..Self::default()
        }
    }

    /// US Letter (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::default()
    }

    /// A4 (210 x 297 mm).
    pub fn a4() -> Self {
        Self::default().with_page_size(595.0, 842.0)
    }

    /// Set the page size; the first baseline keeps its distance from the top edge.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        let headroom = self.page_height - self.top_offset;
        self.page_width = width;
        self.page_height = height;
        self.top_offset = height - headroom;
        self
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the first baseline position.
    pub fn with_top_offset(mut self, top_offset: f32) -> Self {
        self.top_offset = top_offset;
        self
    }

    /// Set the leading.
    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    /// Set the chunk size (clamped to at least one character).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the body font size.
    pub fn with_body_font_size(mut self, size: f32) -> Self {
        self.body_font_size = size;
        self
    }

    /// Set the heading font sizes (levels 1, 2, 3).
    pub fn with_heading_font_sizes(mut self, sizes: [f32; 3]) -> Self {
        self.heading_font_sizes = sizes;
        self
    }

    /// Font used for every fragment of a block of the given kind.
    pub fn font_for(&self, kind: BlockKind) -> FontSpec {
        match kind.heading_level() {
            Some(level) => FontSpec::bold(self.heading_font_sizes[usize::from(level - 1)]),
            None => FontSpec::regular(self.body_font_size),
        }
    }

    /// Lowest baseline a line may be written at without a page break first.
    pub fn bottom_limit(&self) -> f32 {
        self.margin + self.leading
    }

    /// Number of lines that fit on one page.
    pub fn lines_per_page(&self) -> usize {
        if self.leading <= 0.0 || self.top_offset < self.bottom_limit() {
            return 1;
        }
        ((self.top_offset - self.bottom_limit()) / self.leading).floor() as usize + 1
    }

    /// Check that the geometry can hold at least one line per page.
    ///
    /// Pagination itself never fails; a geometry that fails this check still
    /// paginates, one line per page.
    pub fn validate(&self) -> Result<()> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "page size {}x{} must be positive",
                self.page_width, self.page_height
            )));
        }
        if self.leading <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "leading {} must be positive",
                self.leading
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidLayout("chunk size must be at least 1".to_string()));
        }
        if self.top_offset > self.page_height || self.top_offset < self.bottom_limit() {
            return Err(Error::InvalidLayout(format!(
                "top offset {} must lie between {} and the page height {}",
                self.top_offset,
                self.bottom_limit(),
                self.page_height
            )));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            top_offset: 750.0,
            leading: 15.0,
            chunk_size: 80,
            body_font_size: 12.0,
            heading_font_sizes: [16.0, 14.0, 14.0],
        }
    }
}

/// Typeface used for a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFace {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

impl FontFace {
    /// PostScript name of the standard Type1 font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    /// Name under which the font is registered in page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    /// All faces, in resource order.
    pub fn all() -> [FontFace; 2] {
        [FontFace::Regular, FontFace::Bold]
    }
}

/// Face and size of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Typeface
    pub face: FontFace,
    /// Size in points
    pub size: f32,
}

impl FontSpec {
    /// Regular face at the given size.
    pub fn regular(size: f32) -> Self {
        Self {
            face: FontFace::Regular,
            size,
        }
    }

    /// Bold face at the given size.
    pub fn bold(size: f32) -> Self {
        Self {
            face: FontFace::Bold,
            size,
        }
    }
}
