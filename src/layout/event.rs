//! Positioned output of the paginator.

use serde::{Deserialize, Serialize};

use super::options::FontSpec;
use crate::model::BlockKind;

/// Baseline position of a fragment, in points from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// One line of text placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEvent {
    /// Zero-based page index
    pub page: usize,
    /// Index of the source block in the document
    pub block: usize,
    /// Kind of the source block
    pub kind: BlockKind,
    /// Fragment text (empty for blank lines)
    pub text: String,
    /// Font for the whole fragment
    pub font: FontSpec,
    /// Baseline position
    pub position: Position,
}

/// Events yielded by [`Paginator`](super::Paginator).
///
/// Every page is bracketed by `PageStart` and `PageEnd`, even when it holds
/// no fragments.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A new page begins.
    PageStart { index: usize },
    /// A fragment placed on the current page.
    Fragment(LayoutEvent),
    /// The current page is complete.
    PageEnd { index: usize },
}

impl PageEvent {
    /// Whether this event opens or closes a page.
    pub fn is_page_boundary(&self) -> bool {
        matches!(self, PageEvent::PageStart { .. } | PageEvent::PageEnd { .. })
    }

    /// The fragment carried by this event, if any.
    pub fn fragment(&self) -> Option<&LayoutEvent> {
        match self {
            PageEvent::Fragment(event) => Some(event),
            _ => None,
        }
    }

    /// Consume the event, returning its fragment if any.
    pub fn into_fragment(self) -> Option<LayoutEvent> {
        match self {
            PageEvent::Fragment(event) => Some(event),
            _ => None,
        }
    }
}

/// All fragments of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Zero-based page index
    pub index: usize,
    /// Fragments in emission order
    pub fragments: Vec<LayoutEvent>,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fragments: Vec::new(),
        }
    }

    /// Whether the page holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
