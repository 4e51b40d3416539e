//! Block-level types.

use super::StyledRun;
use serde::{Deserialize, Serialize};

/// Presentational kind of one classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// `# ` heading
    Heading1,
    /// `## ` heading
    Heading2,
    /// `### ` heading
    Heading3,
    /// Bullet list item (`* `, `· `, `. `, `- `)
    Bullet,
    /// Numbered list item (`12. ...`)
    Numbered,
    /// Whitespace-only line
    Blank,
    /// Anything else; the only kind that gets inline emphasis by default
    Paragraph,
}

impl BlockKind {
    /// Heading level (1-3) or None.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            _ => None,
        }
    }

    /// Check if this is a heading kind.
    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }

    /// Whether overlong lines of this kind are chunked during pagination.
    pub fn is_chunked(self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph | BlockKind::Bullet | BlockKind::Numbered
        )
    }
}

/// One classified line of generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Presentational kind
    pub kind: BlockKind,

    /// Styled runs in source order (empty for blank lines)
    pub runs: Vec<StyledRun>,
}

impl Block {
    /// Create a block from its kind and runs.
    pub fn new(kind: BlockKind, runs: Vec<StyledRun>) -> Self {
        Self { kind, runs }
    }

    /// Create a blank block.
    pub fn blank() -> Self {
        Self::new(BlockKind::Blank, Vec::new())
    }

    /// Create a heading block holding a single unstyled run.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let kind = match level {
            0 | 1 => BlockKind::Heading1,
            2 => BlockKind::Heading2,
            _ => BlockKind::Heading3,
        };
        Self::new(kind, vec![StyledRun::plain(text)])
    }

    /// Create a paragraph block from pre-built runs.
    pub fn paragraph(runs: Vec<StyledRun>) -> Self {
        Self::new(BlockKind::Paragraph, runs)
    }

    /// Concatenated text of all runs, styles ignored.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Number of characters across all runs.
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(StyledRun::char_len).sum()
    }

    /// Check if this block is blank.
    pub fn is_blank(&self) -> bool {
        self.kind == BlockKind::Blank
    }
}
