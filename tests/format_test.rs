//! Integration tests for inline formatting and block classification.

use textgen::api::extract_text;
use textgen::model::{BlockKind, StyledRun};
use textgen::parser::{
    classify_and_format, classify_and_format_with_options, parse_inline, strip_emphasis,
    ParseOptions,
};

fn texts(runs: &[StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

#[test]
fn test_heading_line() {
    let doc = classify_and_format("# Title");
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].kind, BlockKind::Heading1);
    assert_eq!(doc.blocks[0].text(), "Title");
}

#[test]
fn test_bold_in_paragraph() {
    assert_eq!(
        parse_inline("Hello **world**!"),
        vec![
            StyledRun::plain("Hello "),
            StyledRun::bold("world"),
            StyledRun::plain("!"),
        ]
    );
}

#[test]
fn test_italic_then_bold() {
    assert_eq!(
        parse_inline("*italic* and **bold**"),
        vec![
            StyledRun::italic("italic"),
            StyledRun::plain(" and "),
            StyledRun::bold("bold"),
        ]
    );
}

#[test]
fn test_unclosed_bold_is_literal() {
    assert_eq!(
        parse_inline("unclosed **bold"),
        vec![StyledRun::plain("unclosed "), StyledRun::plain("**bold")]
    );
}

#[test]
fn test_balanced_bold_yields_one_bold_run() {
    for line in ["**a**", "x **bold text** y", "start **mid**", "**lead** tail"] {
        let runs = parse_inline(line);
        let bold: Vec<_> = runs.iter().filter(|r| r.bold).collect();
        assert_eq!(bold.len(), 1, "line {line:?}");
        assert!(runs.iter().all(|r| !r.italic), "line {line:?}");
    }
}

#[test]
fn test_no_characters_lost() {
    for (line, expected) in [
        ("a * b", "a * b"),
        ("trailing *", "trailing *"),
        ("**never closed", "**never closed"),
        ("one *two* three **four", "one two three **four"),
        ("x * y ** z", "x  y * z"),
        ("price: 5 * 3", "price: 5 * 3"),
    ] {
        assert_eq!(texts(&parse_inline(line)), expected, "line {line:?}");
        assert_eq!(strip_emphasis(line), expected, "line {line:?}");
    }
}

#[test]
fn test_paragraph_round_trip() {
    let line = "Some **bold** and *italic* words";
    let doc = classify_and_format(line);
    assert_eq!(doc.blocks[0].kind, BlockKind::Paragraph);
    assert_eq!(doc.blocks[0].text(), "Some bold and italic words");
}

#[test]
fn test_mixed_response() {
    let raw = "# Tide Pools\n\n## Life\nTide pools hold **many** species.\n* Anemones\n- Crabs\n1. Arrive early\n10. Leave nothing\n### Notes\n   \n#not a heading";
    let doc = classify_and_format(raw);
    let kinds: Vec<BlockKind> = doc.blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Heading1,
            BlockKind::Blank,
            BlockKind::Heading2,
            BlockKind::Paragraph,
            BlockKind::Bullet,
            BlockKind::Bullet,
            BlockKind::Numbered,
            BlockKind::Numbered,
            BlockKind::Heading3,
            BlockKind::Blank,
            BlockKind::Paragraph,
        ]
    );
    assert_eq!(doc.blocks[4].text(), "• Anemones");
    assert_eq!(doc.blocks[6].text(), "1. Arrive early");
    assert_eq!(doc.title().as_deref(), Some("Tide Pools"));
}

#[test]
fn test_list_items_keep_markers_literal() {
    let doc = classify_and_format("- **Bold** item\n2. *not* italic");
    assert_eq!(doc.blocks[0].runs, vec![StyledRun::plain("• **Bold** item")]);
    assert_eq!(doc.blocks[1].runs, vec![StyledRun::plain("2. *not* italic")]);
}

#[test]
fn test_emphasis_everywhere() {
    let options = ParseOptions::new().emphasis_everywhere();
    let doc = classify_and_format_with_options("## A **b**\n- c *d*", &options);
    assert!(doc.blocks[0].runs.iter().any(|r| r.bold && r.text == "b"));
    assert!(doc.blocks[1].runs.iter().any(|r| r.italic && r.text == "d"));
    assert_eq!(doc.blocks[1].text(), "• c d");
}

#[test]
fn test_classification_is_idempotent() {
    let raw = r##"{"candidates":[{"content":{"parts":[{"text":"# T\n* a\nb **c**"}]}}]}"##;
    let first = classify_and_format(&extract_text(raw).unwrap());
    let second = classify_and_format(&extract_text(raw).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_empty_response_becomes_placeholder_paragraph() {
    let text = extract_text(r#"{"candidates":[]}"#).unwrap();
    let doc = classify_and_format(&text);
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].kind, BlockKind::Paragraph);
    assert_eq!(doc.blocks[0].text(), "Empty response (no candidates).");
}

#[test]
fn test_crlf_input() {
    let doc = classify_and_format("# Title\r\nBody\r\n");
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(doc.blocks[0].text(), "Title");
    assert_eq!(doc.blocks[1].text(), "Body");
}

fn without_stars(text: &str) -> String {
    text.chars().filter(|&c| c != '*').collect()
}

quickcheck::quickcheck! {
    fn prop_inline_keeps_every_non_delimiter_char(line: String) -> bool {
        let shown = texts(&parse_inline(&line));
        without_stars(&shown) == without_stars(&line)
            && shown.chars().count() <= line.chars().count()
            && shown == strip_emphasis(&line)
    }

    fn prop_one_block_per_line(lines: Vec<String>) -> bool {
        let raw = lines
            .iter()
            .map(|l| l.replace(['\n', '\r'], " "))
            .collect::<Vec<_>>()
            .join("\n");
        classify_and_format(&raw).block_count() == raw.lines().count()
    }
}
