use crate::data::model::Settings;
use crate::nav::grid::GRID_COLUMNS;
use std::ops::Range;

pub const FAVORITES_PER_PAGE: usize = 8;

/// Folders shown at once: one or two rows of the grid.
pub fn folders_per_page(settings: &Settings) -> usize {
    if settings.folder_rows == 1 {
        GRID_COLUMNS
    } else {
        GRID_COLUMNS * 2
    }
}

/// A fixed-size window over a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    per_page: usize,
    page: usize,
}

impl Pager {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            page: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Change the page size, keeping the first visible item on screen.
    pub fn set_per_page(&mut self, per_page: usize) {
        let first = self.page * self.per_page;
        self.per_page = per_page.max(1);
        self.page = first / self.per_page;
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.per_page).max(1)
    }

    pub fn needs_paging(&self, len: usize) -> bool {
        len > self.per_page
    }

    /// Indices visible on the current page, clamped to `len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = (self.page * self.per_page).min(len);
        let end = (start + self.per_page).min(len);
        start..end
    }

    pub fn page_of(&self, index: usize) -> usize {
        index / self.per_page
    }

    /// Returns true if the page changed.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page + 1 < self.page_count(len) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to the page holding `index`.
    pub fn show(&mut self, index: usize) {
        self.page = self.page_of(index);
    }

    /// Step back if items were removed from under the current page.
    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.min(self.page_count(len) - 1);
    }
}

/// A scrolling window of rows that keeps a cursor in view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scroll {
    offset: usize,
}

impl Scroll {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Shift the window just enough to show `cursor`, then return the rows
    /// to draw out of `len`, at most `height` of them.
    pub fn follow(&mut self, cursor: Option<usize>, height: usize, len: usize) -> Range<usize> {
        if let Some(cursor) = cursor {
            if cursor < self.offset {
                self.offset = cursor;
            } else if height > 0 && cursor >= self.offset + height {
                self.offset = cursor + 1 - height;
            }
        }
        self.offset = self.offset.min(len.saturating_sub(height));
        self.offset..(self.offset + height).min(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folders_per_page_follows_rows() {
        let mut settings = Settings::default();
        assert_eq!(folders_per_page(&settings), 8);
        settings.folder_rows = 1;
        assert_eq!(folders_per_page(&settings), 4);
    }

    #[test]
    fn test_ranges_and_navigation() {
        let mut pager = Pager::new(8);
        assert_eq!(pager.page_count(0), 1);
        assert_eq!(pager.page_count(17), 3);
        assert!(!pager.needs_paging(8));
        assert!(pager.needs_paging(9));

        assert_eq!(pager.range(17), 0..8);
        assert!(pager.next(17));
        assert!(pager.next(17));
        assert_eq!(pager.range(17), 16..17);
        assert!(!pager.next(17));
        assert!(pager.prev());
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_show_and_clamp() {
        let mut pager = Pager::new(4);
        pager.show(9);
        assert_eq!(pager.page(), 2);
        pager.clamp(5);
        assert_eq!(pager.page(), 1);
        pager.clamp(0);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_set_per_page_keeps_first_item() {
        let mut pager = Pager::new(4);
        pager.show(5);
        pager.set_per_page(8);
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.range(12), 0..8);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut scroll = Scroll::default();
        assert_eq!(scroll.follow(None, 5, 20), 0..5);
        assert_eq!(scroll.follow(Some(4), 5, 20), 0..5);
        assert_eq!(scroll.follow(Some(7), 5, 20), 3..8);
        // Moving back inside the window leaves it alone.
        assert_eq!(scroll.follow(Some(5), 5, 20), 3..8);
        assert_eq!(scroll.follow(Some(1), 5, 20), 1..6);
    }

    #[test]
    fn test_scroll_clamps_to_shorter_lists() {
        let mut scroll = Scroll::default();
        scroll.follow(Some(19), 5, 20);
        assert_eq!(scroll.offset(), 15);
        assert_eq!(scroll.follow(None, 5, 8), 3..8);
        assert_eq!(scroll.follow(None, 10, 8), 0..8);
        scroll.reset();
        assert_eq!(scroll.offset(), 0);
    }
}
