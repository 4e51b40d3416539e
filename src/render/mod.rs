//! Rendering module for converting documents to output formats.

mod json;
pub mod pdf;
pub mod screen;
mod text;

pub use json::{layout_to_json, to_json, JsonFormat};
#[cfg(feature = "async")]
pub use pdf::export_pdf_async;
pub use pdf::{export_pdf, to_pdf_bytes, write_pdf, ExportSummary, PdfOptions};
pub use screen::{to_display_spans, DisplaySpan, Rgb, ScreenTheme};
pub use text::{pages_to_text, to_text};
