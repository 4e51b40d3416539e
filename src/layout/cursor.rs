//! Vertical cursor over the current page.

/// Tracks the current page, the next baseline and how many fragments the
/// page already holds.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    index: usize,
    cursor_y: f32,
    fragments: usize,
}

impl PageCursor {
    /// Cursor at the first baseline of page 0.
    pub fn new(top_offset: f32) -> Self {
        Self {
            index: 0,
            cursor_y: top_offset,
            fragments: 0,
        }
    }

    /// Current page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Baseline the next fragment would be written at.
    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// Fragments already placed on the current page.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Whether the next fragment must go to a new page.
    ///
    /// A page that holds nothing accepts one fragment whatever the cursor says,
    /// so tiny geometries still make progress.
    pub fn needs_break(&self, bottom_limit: f32) -> bool {
        self.fragments > 0 && self.cursor_y < bottom_limit
    }

    /// Move to the top of the next page.
    pub fn next_page(&mut self, top_offset: f32) {
        self.index += 1;
        self.cursor_y = top_offset;
        self.fragments = 0;
    }

    /// Claim the current baseline and move down by `leading`.
    pub fn advance(&mut self, leading: f32) -> f32 {
        let y = self.cursor_y;
        self.cursor_y -= leading;
        self.fragments += 1;
        y
    }
}
