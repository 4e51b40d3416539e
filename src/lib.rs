//! # textgen
//!
//! Formatting and pagination for generated text.
//!
//! This library turns the raw text returned by a text generation model into
//! a structured document (headings, list items, paragraphs with bold and
//! italic runs), lays it out onto fixed-size pages and exports it as PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use textgen::{classify_and_format, export_pdf, LayoutOptions, PdfOptions};
//!
//! fn main() -> textgen::Result<()> {
//!     let doc = classify_and_format("# Tide pools\n\nTide pools are **rocky** pools.");
//!     let summary = export_pdf(&doc, "tide-pools.pdf", &LayoutOptions::default(), &PdfOptions::default())?;
//!     println!("{} pages", summary.page_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Markdown subset**: `#`/`##`/`###` headings, bullet and numbered items, `**bold**` and `*italic*`
//! - **Pagination**: fixed leading, character chunking of long lines, explicit page events
//! - **PDF export**: standard Helvetica fonts, compressed page streams, one page at a time
//! - **Host boundary**: background generation and export with per-operation busy flags

pub mod api;
pub mod error;
pub mod host;
pub mod layout;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod render;

// Re-export commonly used types
pub use api::{extract_text, TextSource};
pub use error::{Error, Result};
pub use host::{Completion, Generated, Operation, Session};
pub use layout::{paginate, paginate_pages, LayoutEvent, LayoutOptions, PageEvent, PageLayout};
pub use model::{Block, BlockKind, Document, Metadata, StyledRun};
pub use parser::{classify_and_format, classify_and_format_with_options, parse_inline, ParseOptions};
pub use prompt::{build_prompt, ContentType};
pub use render::{export_pdf, to_pdf_bytes, ExportSummary, JsonFormat, PdfOptions, ScreenTheme};

use std::path::Path;

/// Read a text file and classify it with default options.
///
/// # Example
///
/// ```no_run
/// use textgen::format_file;
///
/// let doc = format_file("response.txt").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn format_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let raw = std::fs::read_to_string(path)?;
    Ok(classify_and_format(&raw))
}

/// Builder for formatting, laying out and exporting generated text.
///
/// # Example
///
/// ```no_run
/// use textgen::Textgen;
///
/// let summary = Textgen::new()
///     .with_bullet_glyph('-')
///     .with_chunk_size(60)
///     .with_title("Notes")
///     .format("# Notes\n* first\n* second")
///     .export_pdf("notes.pdf")?;
/// # Ok::<(), textgen::Error>(())
/// ```
pub struct Textgen {
    parse_options: ParseOptions,
    layout_options: LayoutOptions,
    pdf_options: PdfOptions,
}

impl Textgen {
    /// Create a new Textgen builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            layout_options: LayoutOptions::default(),
            pdf_options: PdfOptions::default(),
        }
    }

    /// Set the glyph used for bullet items.
    pub fn with_bullet_glyph(mut self, glyph: char) -> Self {
        self.parse_options = self.parse_options.with_bullet_glyph(glyph);
        self
    }

    /// Parse emphasis in headings and list items too.
    pub fn emphasis_everywhere(mut self) -> Self {
        self.parse_options = self.parse_options.emphasis_everywhere();
        self
    }

    /// Normalize input to Unicode NFC before classification.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.parse_options = self.parse_options.with_unicode_normalization(enabled);
        self
    }

    /// Replace the layout options.
    pub fn with_layout(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Set the page size in points.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.layout_options = self.layout_options.with_page_size(width, height);
        self
    }

    /// Set the chunk size for long lines.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.layout_options = self.layout_options.with_chunk_size(chunk_size);
        self
    }

    /// Enable or disable PDF stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.pdf_options = self.pdf_options.with_compression(compress);
        self
    }

    /// Set the PDF title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.pdf_options = self.pdf_options.with_title(title);
        self
    }

    /// Classify and format raw text.
    pub fn format(self, raw: &str) -> TextgenResult {
        let document = classify_and_format_with_options(raw, &self.parse_options);
        TextgenResult {
            document,
            layout_options: self.layout_options,
            pdf_options: self.pdf_options,
        }
    }

    /// Read a text file and format it.
    pub fn format_file<P: AsRef<Path>>(self, path: P) -> Result<TextgenResult> {
        let raw = std::fs::read_to_string(path)?;
        Ok(self.format(&raw))
    }
}

impl Default for Textgen {
    fn default() -> Self {
        Self::new()
    }
}

/// A formatted document together with its layout and export settings.
pub struct TextgenResult {
    /// The formatted document
    pub document: Document,
    layout_options: LayoutOptions,
    pdf_options: PdfOptions,
}

impl TextgenResult {
    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Lay out the document, grouped by page.
    pub fn layout(&self) -> Vec<PageLayout> {
        paginate_pages(&self.document, &self.layout_options)
    }

    /// Positioned lines in emission order.
    pub fn events(&self) -> Vec<LayoutEvent> {
        paginate(&self.document, &self.layout_options)
    }

    /// Render to PDF bytes.
    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>> {
        render::to_pdf_bytes(&self.document, &self.layout_options, &self.pdf_options)
    }

    /// Render to a PDF file.
    pub fn export_pdf<P: AsRef<Path>>(&self, path: P) -> Result<ExportSummary> {
        render::export_pdf(&self.document, path, &self.layout_options, &self.pdf_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Plain text, one line per block.
    pub fn plain_text(&self) -> String {
        render::to_text(&self.document)
    }
}
