//! Document-level types.

use super::{Block, BlockKind};
use serde::{Deserialize, Serialize};

/// The full parsed result of one generated response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Descriptive metadata, never filled in by the parser itself
    #[serde(default)]
    pub metadata: Metadata,

    /// Blocks in input line order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from already classified blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            metadata: Metadata::default(),
            blocks,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add a block to the document.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Explicit title, falling back to the first level-1 heading.
    pub fn title(&self) -> Option<String> {
        if let Some(ref title) = self.metadata.title {
            return Some(title.clone());
        }
        self.blocks
            .iter()
            .find(|b| b.kind == BlockKind::Heading1)
            .map(Block::text)
    }

    /// Count blocks of a given kind.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind == kind).count()
    }

    /// Plain text of the entire document, one line per block.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Prompt the text was generated from
    pub prompt: Option<String>,

    /// Requested content type label (e.g. "Article")
    pub content_type: Option<String>,
}
