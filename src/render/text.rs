//! Plain text rendering.

use crate::layout::PageLayout;
use crate::model::Document;

/// Convert a document to plain text, one line per block.
///
/// Emphasis markers consumed by the inline formatter are not restored.
pub fn to_text(doc: &Document) -> String {
    doc.plain_text()
}

/// Text of each page, lines joined with `\n`, in layout order.
pub fn pages_to_text(pages: &[PageLayout]) -> Vec<String> {
    pages
        .iter()
        .map(|page| {
            page.fragments
                .iter()
                .map(|fragment| fragment.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{paginate_pages, LayoutOptions};
    use crate::parser::classify_and_format;

    #[test]
    fn test_to_text() {
        let doc = classify_and_format("# Title\nSome **bold** and *italic*\n- item");
        assert_eq!(to_text(&doc), "Title\nSome bold and italic\n• item");
    }

    #[test]
    fn test_pages_to_text() {
        let doc = classify_and_format("one\n\ntwo");
        let options = LayoutOptions::default().with_top_offset(80.0);
        let pages = paginate_pages(&doc, &options);
        assert_eq!(pages_to_text(&pages), vec!["one\n".to_string(), "two".to_string()]);
    }
}
