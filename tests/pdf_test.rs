//! Integration tests for PDF export.

use lopdf::content::Content;
use lopdf::{Document as PdfDocument, Object};
use textgen::layout::LayoutOptions;
use textgen::parser::classify_and_format;
use textgen::render::{export_pdf, to_pdf_bytes, PdfOptions};
use textgen::Textgen;

/// Strings shown with `Tj` on each page, in page order.
fn shown_text(bytes: &[u8]) -> Vec<Vec<Vec<u8>>> {
    let pdf = PdfDocument::load_mem(bytes).unwrap();
    pdf.get_pages()
        .values()
        .map(|page_id| {
            let page = pdf.get_dictionary(*page_id).unwrap();
            let contents = page.get(b"Contents").unwrap().as_reference().unwrap();
            let stream = pdf.get_object(contents).unwrap().as_stream().unwrap();
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            Content::decode(&data)
                .unwrap()
                .operations
                .into_iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(Object::String(bytes, _)) => Some(bytes.clone()),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    let doc = classify_and_format("# Title\nBody text");

    let summary = export_pdf(&doc, &path, &LayoutOptions::default(), &PdfOptions::default()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(summary.byte_len, bytes.len());
    assert_eq!(summary.page_count, 1);
    assert_eq!(summary.fragment_count, 2);
    assert_eq!(summary.path.as_deref(), Some(path.as_path()));
    assert_eq!(PdfDocument::load_mem(&bytes).unwrap().get_pages().len(), 1);
}

#[test]
fn test_page_count_matches_layout() {
    let raw = (0..100).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n");
    let doc = classify_and_format(&raw);
    let bytes = to_pdf_bytes(&doc, &LayoutOptions::default(), &PdfOptions::default()).unwrap();

    let pages = shown_text(&bytes);
    let counts: Vec<usize> = pages.iter().map(Vec::len).collect();
    assert_eq!(counts, vec![46, 46, 8]);
    assert_eq!(pages[1][0], b"Line 46".to_vec());
}

#[test]
fn test_blank_lines_take_space_but_draw_nothing() {
    let doc = classify_and_format("a\n\nb");
    let options = PdfOptions::default().with_compression(false);
    let bytes = to_pdf_bytes(&doc, &LayoutOptions::default(), &options).unwrap();
    assert_eq!(shown_text(&bytes), vec![vec![b"a".to_vec(), b"b".to_vec()]]);
}

#[test]
fn test_bullet_glyph_encoded_as_win_ansi() {
    let doc = classify_and_format("- item\n- 日本");
    let bytes = to_pdf_bytes(&doc, &LayoutOptions::default(), &PdfOptions::default()).unwrap();
    let pages = shown_text(&bytes);
    assert_eq!(pages[0][0], vec![0x95, b' ', b'i', b't', b'e', b'm']);
    assert_eq!(pages[0][1], vec![0x95, b' ', b'?', b'?']);
}

#[test]
fn test_empty_document_exports_blank_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.pdf");
    let summary = Textgen::new().format("").export_pdf(&path).unwrap();
    assert_eq!(summary.page_count, 1);
    assert_eq!(summary.fragment_count, 0);
    assert_eq!(shown_text(&std::fs::read(&path).unwrap()), vec![Vec::<Vec<u8>>::new()]);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");
    let doc = classify_and_format("text");
    let result = export_pdf(&doc, &path, &LayoutOptions::default(), &PdfOptions::default());
    assert!(matches!(result, Err(textgen::Error::Io(_))));
}

#[test]
fn test_a4_media_box() {
    let bytes = Textgen::new()
        .with_layout(LayoutOptions::a4())
        .format("text")
        .to_pdf_bytes()
        .unwrap();
    let pdf = PdfDocument::load_mem(&bytes).unwrap();
    let page_id = *pdf.get_pages().values().next().unwrap();
    let media_box = pdf
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    let height = match &media_box[3] {
        Object::Real(h) => *h,
        Object::Integer(h) => *h as f32,
        other => panic!("unexpected MediaBox entry {:?}", other),
    };
    assert_eq!(height, 842.0);
}

#[cfg(feature = "async")]
#[test]
fn test_export_async_writes_file() {
    use textgen::layout::paginate_pages;
    use textgen::render::export_pdf_async;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("async.pdf");
    let raw = (0..120).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n");
    let doc = classify_and_format(&raw);
    let layout = LayoutOptions::default();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let summary = runtime
        .block_on(export_pdf_async(&doc, &path, &layout, &PdfOptions::default()))
        .unwrap();

    assert!(path.exists());
    let expected = paginate_pages(&doc, &layout).len();
    assert_eq!(summary.page_count, expected);
    assert_eq!(summary.path.as_deref(), Some(path.as_path()));
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(summary.byte_len, bytes.len());
    assert_eq!(PdfDocument::load_mem(&bytes).unwrap().get_pages().len(), expected);
}
