//! PDF export of paginated documents.
//!
//! Pages are written one at a time as the [`Paginator`] produces them. Each
//! page is a scoped resource: it is opened on `PageStart`, receives its
//! fragments, and is committed to the document before the next page starts,
//! even if writing its content fails part-way.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as PdfDocument, Object, ObjectId, Stream};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::layout::{FontFace, LayoutEvent, LayoutOptions, PageEvent, Paginator};
use crate::model::Document;

/// Options for the PDF writer.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Flate-compress page content streams
    pub compress: bool,

    /// Document title for the Info dictionary; falls back to the document title
    pub title: Option<String>,

    /// Producer string for the Info dictionary
    pub producer: String,
}

impl PdfOptions {
    /// Create new PDF options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the producer string.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            compress: true,
            title: None,
            producer: format!("textgen {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Pages written
    pub page_count: usize,
    /// Lines written, blank lines included
    pub fragment_count: usize,
    /// Size of the PDF in bytes
    pub byte_len: usize,
    /// Destination file, when written to disk
    pub path: Option<PathBuf>,
}

/// Render a document to PDF bytes.
pub fn to_pdf_bytes(doc: &Document, layout: &LayoutOptions, options: &PdfOptions) -> Result<Vec<u8>> {
    render_pdf(doc, layout, options).map(|(bytes, _)| bytes)
}

/// Render a document as PDF into a writer.
pub fn write_pdf<W: Write>(
    doc: &Document,
    writer: &mut W,
    layout: &LayoutOptions,
    options: &PdfOptions,
) -> Result<ExportSummary> {
    let (bytes, summary) = render_pdf(doc, layout, options)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(summary)
}

/// Render a document as PDF and write it to `path`.
///
/// A failed export leaves no partial file behind when rendering fails; I/O
/// errors while writing are returned as-is.
pub fn export_pdf(
    doc: &Document,
    path: impl AsRef<Path>,
    layout: &LayoutOptions,
    options: &PdfOptions,
) -> Result<ExportSummary> {
    let path = path.as_ref();
    let (bytes, mut summary) = render_pdf(doc, layout, options)?;
    std::fs::write(path, &bytes)?;
    summary.path = Some(path.to_path_buf());
    log::info!(
        "Exported {} pages ({} bytes) to {}",
        summary.page_count,
        summary.byte_len,
        path.display()
    );
    Ok(summary)
}

/// Async variant of [`export_pdf`]; rendering runs inline, only the file
/// write is asynchronous.
#[cfg(feature = "async")]
pub async fn export_pdf_async(
    doc: &Document,
    path: impl AsRef<Path>,
    layout: &LayoutOptions,
    options: &PdfOptions,
) -> Result<ExportSummary> {
    let path = path.as_ref();
    let (bytes, mut summary) = render_pdf(doc, layout, options)?;
    tokio::fs::write(path, &bytes).await?;
    summary.path = Some(path.to_path_buf());
    log::info!(
        "Exported {} pages ({} bytes) to {}",
        summary.page_count,
        summary.byte_len,
        path.display()
    );
    Ok(summary)
}

fn render_pdf(
    doc: &Document,
    layout: &LayoutOptions,
    options: &PdfOptions,
) -> Result<(Vec<u8>, ExportSummary)> {
    let title = options.title.clone().or_else(|| doc.title());
    let mut builder = PdfBuilder::new(layout, options.compress);
    let mut events = Paginator::new(doc, layout.clone());

    while let Some(event) = events.next() {
        match event {
            PageEvent::PageStart { index } => builder.with_page(|canvas| {
                for event in events.by_ref() {
                    match event {
                        PageEvent::Fragment(fragment) => canvas.draw(&fragment),
                        PageEvent::PageEnd { .. } => return Ok(()),
                        PageEvent::PageStart { index: next } => {
                            return Err(Error::Render(format!(
                                "page {} started while page {} was open",
                                next, index
                            )))
                        }
                    }
                }
                Err(Error::Render(format!("layout ended inside page {}", index)))
            })?,
            other => {
                return Err(Error::Render(format!(
                    "layout event outside a page: {:?}",
                    other
                )))
            }
        }
    }

    let page_count = builder.page_count();
    let fragment_count = builder.fragment_count();
    let bytes = builder.finish(title.as_deref(), &options.producer)?;
    let summary = ExportSummary {
        page_count,
        fragment_count,
        byte_len: bytes.len(),
        path: None,
    };
    Ok((bytes, summary))
}

/// Builds the PDF object graph page by page.
struct PdfBuilder {
    document: PdfDocument,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_size: (f32, f32),
    compress: bool,
    fragments: usize,
}

impl PdfBuilder {
    fn new(layout: &LayoutOptions, compress: bool) -> Self {
        let mut document = PdfDocument::with_version("1.5");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for face in FontFace::all() {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        document.objects.insert(
            resources_id,
            Object::Dictionary(dictionary! { "Font" => fonts }),
        );

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![],
                "Count" => 0,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            page_size: (layout.page_width, layout.page_height),
            compress,
            fragments: 0,
        }
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Open a page, let `write` fill it, then commit it.
    ///
    /// The page is committed whether or not `write` succeeds; the first error
    /// wins.
    fn with_page<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut PageCanvas) -> Result<()>,
    {
        let mut canvas = PageCanvas::new();
        let written = write(&mut canvas);
        let committed = self.commit_page(canvas);
        written.and(committed)
    }

    fn commit_page(&mut self, canvas: PageCanvas) -> Result<()> {
        self.fragments += canvas.fragments;
        let raw = canvas.content.encode()?;
        let stream = if self.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&raw)?;
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, encoder.finish()?)
        } else {
            Stream::new(lopdf::Dictionary::new(), raw)
        };
        let content_id = self.document.add_object(stream);

        let (width, height) = self.page_size;
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        log::debug!(
            "Committed page {} ({} lines)",
            self.page_ids.len() - 1,
            canvas.fragments
        );
        Ok(())
    }

    fn finish(mut self, title: Option<&str>, producer: &str) -> Result<Vec<u8>> {
        if let Some(Object::Dictionary(pages)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages.set("Kids", kids);
            pages.set("Count", self.page_ids.len() as i64);
        }

        let mut info = dictionary! {
            "Producer" => Object::string_literal(to_text_string(producer)),
            "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        };
        if let Some(title) = title {
            info.set("Title", Object::string_literal(to_text_string(title)));
        }
        let info_id = self.document.add_object(info);
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Content of the page currently open.
struct PageCanvas {
    content: Content,
    font: Option<(FontFace, f32)>,
    fragments: usize,
}

impl PageCanvas {
    fn new() -> Self {
        Self {
            content: Content { operations: vec![] },
            font: None,
            fragments: 0,
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.font != Some((face, size)) {
            self.content
                .operations
                .push(Operation::new("Tf", vec![face.resource_name().into(), size.into()]));
            self.font = Some((face, size));
        }
    }

    /// Write one line. Blank lines take up space but draw nothing.
    fn draw(&mut self, event: &LayoutEvent) {
        self.fragments += 1;
        if event.text.is_empty() {
            return;
        }

        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(event.font.face, event.font.size);
        self.content.operations.push(Operation::new(
            "Td",
            vec![event.position.x.into(), event.position.y.into()],
        ));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(to_win_ansi(&event.text))],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
    }
}

/// Encode a document-level text string (Info entries).
///
/// ASCII is written as-is; anything else becomes UTF-16BE behind a byte
/// order mark, which viewers read independently of any font encoding.
pub fn to_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&[0xFE, 0xFF]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

/// Encode text for a WinAnsiEncoding font. Unmappable characters become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0usize;
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            Some(byte) => bytes.push(byte),
            None => {
                bytes.push(b'?');
                replaced += 1;
            }
        }
    }
    if replaced > 0 {
        log::warn!(
            "{} character(s) not representable in WinAnsiEncoding were replaced",
            replaced
        );
    }
    bytes
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            '\t' => Some(b' '),
            _ => None,
        },
    }
}
