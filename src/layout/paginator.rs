//! Pagination state machine.
//!
//! [`Paginator`] walks the blocks of a [`Document`] and yields [`PageEvent`]s
//! one at a time, so PDF export can write a page and drop it before the next
//! one is laid out.
//!
//! # Example
//!
//! ```
//! use textgen::layout::{LayoutOptions, PageEvent, Paginator};
//! use textgen::classify_and_format;
//!
//! let doc = classify_and_format("# Title\nSome text");
//! let mut pages = 0;
//! for event in Paginator::new(&doc, LayoutOptions::default()) {
//!     if let PageEvent::PageEnd { .. } = event {
//!         pages += 1;
//!     }
//! }
//! assert_eq!(pages, 1);
//! ```

use std::collections::VecDeque;
use std::iter::Enumerate;
use std::slice::Iter;

use super::cursor::PageCursor;
use super::event::{LayoutEvent, PageEvent, PageLayout, Position};
use super::options::LayoutOptions;
use crate::model::{Block, BlockKind, Document};

/// Internal state for the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaginatorState {
    /// Before the first page
    Initial,
    /// A page is open and accepting fragments
    Emitting,
    /// The previous page was closed; the next one has not been announced
    Positioning,
    /// All pages emitted
    Done,
}

#[derive(Debug)]
struct PendingFragment {
    block: usize,
    kind: BlockKind,
    text: String,
}

/// Iterator that lays out document blocks onto pages.
pub struct Paginator<'a> {
    blocks: Enumerate<Iter<'a, Block>>,
    options: LayoutOptions,
    cursor: PageCursor,
    pending: VecDeque<PendingFragment>,
    state: PaginatorState,
}

impl<'a> Paginator<'a> {
    /// Create a paginator over the document's blocks.
    pub fn new(doc: &'a Document, options: LayoutOptions) -> Self {
        let cursor = PageCursor::new(options.top_offset);
        Self {
            blocks: doc.blocks.iter().enumerate(),
            options,
            cursor,
            pending: VecDeque::new(),
            state: PaginatorState::Initial,
        }
    }

    /// Layout options in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Index of the page currently being filled.
    pub fn current_page(&self) -> usize {
        self.cursor.index()
    }

    /// Check if pagination is complete.
    pub fn is_done(&self) -> bool {
        self.state == PaginatorState::Done
    }

    /// Queue the fragments of the next block. Returns false when no blocks remain.
    fn refill(&mut self) -> bool {
        let Some((index, block)) = self.blocks.next() else {
            return false;
        };
        for text in split_block(block, self.options.chunk_size) {
            self.pending.push_back(PendingFragment {
                block: index,
                kind: block.kind,
                text,
            });
        }
        true
    }

    fn place(&mut self, fragment: PendingFragment) -> LayoutEvent {
        let y = self.cursor.advance(self.options.leading);
        LayoutEvent {
            page: self.cursor.index(),
            block: fragment.block,
            kind: fragment.kind,
            text: fragment.text,
            font: self.options.font_for(fragment.kind),
            position: Position {
                x: self.options.margin,
                y,
            },
        }
    }
}

impl<'a> Iterator for Paginator<'a> {
    type Item = PageEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            PaginatorState::Initial => {
                self.state = PaginatorState::Emitting;
                Some(PageEvent::PageStart {
                    index: self.cursor.index(),
                })
            }

            PaginatorState::Positioning => {
                self.state = PaginatorState::Emitting;
                Some(PageEvent::PageStart {
                    index: self.cursor.index(),
                })
            }

            PaginatorState::Emitting => {
                if self.pending.is_empty() && !self.refill() {
                    self.state = PaginatorState::Done;
                    return Some(PageEvent::PageEnd {
                        index: self.cursor.index(),
                    });
                }

                if self.cursor.needs_break(self.options.bottom_limit()) {
                    let closed = self.cursor.index();
                    self.cursor.next_page(self.options.top_offset);
                    self.state = PaginatorState::Positioning;
                    log::debug!(
                        "Page {} full, continuing on page {}",
                        closed,
                        self.cursor.index()
                    );
                    return Some(PageEvent::PageEnd { index: closed });
                }

                let fragment = self.pending.pop_front()?;
                Some(PageEvent::Fragment(self.place(fragment)))
            }

            PaginatorState::Done => None,
        }
    }
}

/// Split a block into the lines it occupies on the page.
///
/// Blank blocks occupy one empty line. Headings are never split. Paragraphs
/// and list items longer than `chunk_size` characters are cut into fixed-width
/// pieces, regardless of word boundaries.
pub fn split_block(block: &Block, chunk_size: usize) -> Vec<String> {
    let text = block.text();
    let len = text.chars().count();
    if block.kind.is_chunked() && len > chunk_size {
        log::debug!("Splitting {}-character line into chunks of {}", len, chunk_size);
        chunk_chars(&text, chunk_size)
    } else {
        vec![text]
    }
}

fn chunk_chars(text: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Lay out a document and return its fragments in emission order.
pub fn paginate(doc: &Document, options: &LayoutOptions) -> Vec<LayoutEvent> {
    Paginator::new(doc, options.clone())
        .filter_map(PageEvent::into_fragment)
        .collect()
}

/// Lay out a document and group its fragments by page.
///
/// Always returns at least one page; an empty document yields one empty page.
pub fn paginate_pages(doc: &Document, options: &LayoutOptions) -> Vec<PageLayout> {
    let mut pages = Vec::new();
    let mut current: Option<PageLayout> = None;

    for event in Paginator::new(doc, options.clone()) {
        match event {
            PageEvent::PageStart { index } => current = Some(PageLayout::new(index)),
            PageEvent::Fragment(fragment) => {
                if let Some(page) = current.as_mut() {
                    page.fragments.push(fragment);
                }
            }
            PageEvent::PageEnd { .. } => pages.extend(current.take()),
        }
    }

    pages
}
