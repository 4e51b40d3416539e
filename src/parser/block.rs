//! Line classification into blocks.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::inline::parse_inline;
use super::options::{EmphasisScope, ParseOptions};
use crate::model::{Block, BlockKind, Document, StyledRun};

/// Heading prefixes, longest first: `"## x"` must not be read as a level-1 heading.
const HEADING_PREFIXES: [(&str, BlockKind); 3] = [
    ("### ", BlockKind::Heading3),
    ("## ", BlockKind::Heading2),
    ("# ", BlockKind::Heading1),
];

/// Source markers that introduce a bullet item.
const BULLET_MARKERS: [&str; 4] = ["* ", "· ", ". ", "- "];

fn numbered_item() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+\.").expect("numbered item pattern is valid"))
}

/// Classify and format a whole response with default options.
///
/// # Example
///
/// ```
/// use textgen::model::BlockKind;
/// use textgen::parser::classify_and_format;
///
/// let doc = classify_and_format("# Title\n\nSome **bold** text");
/// assert_eq!(doc.blocks[0].kind, BlockKind::Heading1);
/// assert_eq!(doc.blocks[0].text(), "Title");
/// assert_eq!(doc.blocks[1].kind, BlockKind::Blank);
/// assert_eq!(doc.blocks[2].runs.len(), 3);
/// ```
pub fn classify_and_format(raw: &str) -> Document {
    classify_and_format_with_options(raw, &ParseOptions::default())
}

/// Classify and format a whole response.
///
/// Lines are classified independently, in order; there is no lookahead and
/// no block continuation across lines.
pub fn classify_and_format_with_options(raw: &str, options: &ParseOptions) -> Document {
    let normalized;
    let text = if options.normalize_unicode {
        normalized = raw.nfc().collect::<String>();
        normalized.as_str()
    } else {
        raw
    };

    let blocks: Vec<Block> = text.lines().map(|line| classify_line(line, options)).collect();
    log::debug!("Classified {} lines", blocks.len());
    Document::from_blocks(blocks)
}

/// Classify a single line. First match wins.
pub fn classify_line(line: &str, options: &ParseOptions) -> Block {
    let everywhere = options.emphasis == EmphasisScope::AllBlocks;

    for (prefix, kind) in HEADING_PREFIXES {
        if let Some(content) = line.strip_prefix(prefix) {
            let runs = if everywhere {
                parse_inline(content)
            } else {
                vec![StyledRun::plain(content)]
            };
            return Block::new(kind, runs);
        }
    }

    for marker in BULLET_MARKERS {
        if let Some(content) = line.strip_prefix(marker) {
            let runs = if everywhere {
                let mut runs = vec![StyledRun::plain(format!("{} ", options.bullet_glyph))];
                runs.extend(parse_inline(content));
                runs
            } else {
                vec![StyledRun::plain(format!("{} {}", options.bullet_glyph, content))]
            };
            return Block::new(BlockKind::Bullet, runs);
        }
    }

    // Only ASCII space and control characters count as padding; NBSP and
    // ideographic spaces are content.
    let trimmed = line.trim_matches(|c: char| c <= ' ');

    if numbered_item().is_match(trimmed) {
        let runs = if everywhere {
            parse_inline(line)
        } else {
            vec![StyledRun::plain(line)]
        };
        return Block::new(BlockKind::Numbered, runs);
    }

    if trimmed.is_empty() {
        return Block::blank();
    }

    Block::paragraph(parse_inline(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> Block {
        classify_line(line, &ParseOptions::default())
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(classify("# Title"), Block::heading(1, "Title"));
        assert_eq!(classify("## Part"), Block::heading(2, "Part"));
        assert_eq!(classify("### Detail"), Block::heading(3, "Detail"));
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(classify("#hashtag").kind, BlockKind::Paragraph);
        assert_eq!(classify("####  deep").kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_heading_is_not_emphasis_parsed() {
        let block = classify("# A **bold** title");
        assert_eq!(block.runs, vec![StyledRun::plain("A **bold** title")]);
    }

    #[test]
    fn test_bullet_markers() {
        for line in ["* item", "· item", ". item", "- item"] {
            let block = classify(line);
            assert_eq!(block.kind, BlockKind::Bullet, "{line}");
            assert_eq!(block.text(), "• item");
        }
    }

    #[test]
    fn test_bullet_keeps_stars_literal() {
        let block = classify("* a **b**");
        assert_eq!(block.runs, vec![StyledRun::plain("• a **b**")]);
    }

    #[test]
    fn test_numbered_is_verbatim() {
        let block = classify("  12. Step **one**");
        assert_eq!(block.kind, BlockKind::Numbered);
        assert_eq!(block.text(), "  12. Step **one**");
    }

    #[test]
    fn test_number_without_dot_is_paragraph() {
        assert_eq!(classify("2024 was a year").kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_blank_lines() {
        assert!(classify("").is_blank());
        assert!(classify("   \t").is_blank());
        assert!(classify("").runs.is_empty());
    }

    #[test]
    fn test_unicode_spaces_are_content() {
        assert_eq!(classify("\u{a0}").kind, BlockKind::Paragraph);
        assert_eq!(classify("\u{a0}\u{a0}").text(), "\u{a0}\u{a0}");
        assert_eq!(classify("\u{3000}1. x").kind, BlockKind::Paragraph);
        assert_eq!(classify("  1. x").kind, BlockKind::Numbered);
    }

    #[test]
    fn test_paragraph_gets_inline_runs() {
        let block = classify("Hello **world**!");
        assert_eq!(block.kind, BlockKind::Paragraph);
        assert_eq!(block.runs.len(), 3);
        assert!(block.runs[1].bold);
    }

    #[test]
    fn test_emphasis_everywhere() {
        let options = ParseOptions::new().emphasis_everywhere();
        let block = classify_line("- a **b**", &options);
        assert_eq!(
            block.runs,
            vec![
                StyledRun::plain("• "),
                StyledRun::plain("a "),
                StyledRun::bold("b"),
            ]
        );

        let heading = classify_line("## *Why*", &options);
        assert_eq!(heading.runs, vec![StyledRun::italic("Why")]);
    }

    #[test]
    fn test_custom_bullet_glyph() {
        let options = ParseOptions::new().with_bullet_glyph('-');
        assert_eq!(classify_line("* x", &options).text(), "- x");
    }

    #[test]
    fn test_crlf_lines() {
        let doc = classify_and_format("# A\r\nbody\r\n");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks[0].text(), "A");
        assert_eq!(doc.blocks[1].text(), "body");
    }

    #[test]
    fn test_nfc_normalization() {
        let decomposed = "cafe\u{301}";
        let options = ParseOptions::new().with_unicode_normalization(true);
        let doc = classify_and_format_with_options(decomposed, &options);
        assert_eq!(doc.blocks[0].text(), "café");
        assert_eq!(doc.blocks[0].char_len(), 4);
    }
}
