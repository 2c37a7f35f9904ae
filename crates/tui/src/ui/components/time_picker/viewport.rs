//! Scroll offsets for the two picker columns.
//!
//! Each column tracks its first visible row and the height measured in the
//! last frame. Reveals before the first layout are ignored, which is why the
//! open transition defers its reveal until after a frame has been drawn.

use std::ops::Range;

use clockpick_types::{Column, ScrollAlignment};

use crate::time_selector::EnsureVisible;

/// Vertical window over one column of cells.
#[derive(Debug, Clone, Copy)]
pub struct ColumnViewport {
    offset: u8,
    height: u8,
    len: u8,
}

impl ColumnViewport {
    pub const fn new(len: u8) -> Self {
        Self { offset: 0, height: 0, len }
    }

    /// Index of the first visible cell.
    pub const fn offset(&self) -> u8 {
        self.offset
    }

    pub const fn height(&self) -> u8 {
        self.height
    }

    pub fn max_offset(&self) -> u8 {
        self.len.saturating_sub(self.height)
    }

    /// Cells currently inside the window.
    pub fn visible_range(&self) -> Range<u8> {
        self.offset..self.offset.saturating_add(self.height).min(self.len)
    }

    /// Records the laid-out height and clamps the offset.
    pub fn set_height(&mut self, rows: u16) {
        self.height = u8::try_from(rows).unwrap_or(u8::MAX).min(self.len);
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scrolls by relative row count (`+` down, `-` up).
    pub fn scroll_lines(&mut self, delta: i16) {
        let next = (i16::from(self.offset) + delta).clamp(0, i16::from(self.max_offset()));
        self.offset = next as u8;
    }

    /// Cell under the row `rows_from_top` of the window.
    pub fn index_at_row(&self, rows_from_top: u16) -> Option<u8> {
        let rows = u8::try_from(rows_from_top).ok()?;
        if rows >= self.height {
            return None;
        }
        let index = self.offset.checked_add(rows)?;
        (index < self.len).then_some(index)
    }

    /// Adjusts the offset so `index` is visible.
    pub fn reveal(&mut self, index: u8, alignment: ScrollAlignment) {
        if self.height == 0 || index >= self.len {
            return;
        }
        let offset = match alignment {
            ScrollAlignment::Nearest if index < self.offset => index,
            ScrollAlignment::Nearest if index >= self.offset + self.height => index + 1 - self.height,
            ScrollAlignment::Nearest => self.offset,
            ScrollAlignment::Center => index.saturating_sub(self.height / 2),
        };
        self.offset = offset.min(self.max_offset());
    }
}

/// Viewports for both columns; the picker's [`EnsureVisible`] implementation.
#[derive(Debug, Clone, Copy)]
pub struct ColumnViewports {
    pub hours: ColumnViewport,
    pub minutes: ColumnViewport,
}

impl Default for ColumnViewports {
    fn default() -> Self {
        Self {
            hours: ColumnViewport::new(Column::Hours.cell_count()),
            minutes: ColumnViewport::new(Column::Minutes.cell_count()),
        }
    }
}

impl ColumnViewports {
    pub fn get(&self, column: Column) -> &ColumnViewport {
        match column {
            Column::Hours => &self.hours,
            Column::Minutes => &self.minutes,
        }
    }

    pub fn get_mut(&mut self, column: Column) -> &mut ColumnViewport {
        match column {
            Column::Hours => &mut self.hours,
            Column::Minutes => &mut self.minutes,
        }
    }
}

impl EnsureVisible for ColumnViewports {
    fn ensure_visible(&mut self, column: Column, index: u8, alignment: ScrollAlignment) {
        self.get_mut(column).reveal(index, alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: u16) -> ColumnViewport {
        let mut viewport = ColumnViewport::new(60);
        viewport.set_height(height);
        viewport
    }

    #[test]
    fn nearest_scrolls_the_minimum_distance() {
        let mut viewport = viewport(10);
        viewport.reveal(5, ScrollAlignment::Nearest);
        assert_eq!(viewport.offset(), 0);
        viewport.reveal(14, ScrollAlignment::Nearest);
        assert_eq!(viewport.offset(), 5);
        viewport.reveal(2, ScrollAlignment::Nearest);
        assert_eq!(viewport.offset(), 2);
    }

    #[test]
    fn center_clamps_to_bounds() {
        let mut viewport = viewport(10);
        viewport.reveal(30, ScrollAlignment::Center);
        assert_eq!(viewport.offset(), 25);
        viewport.reveal(58, ScrollAlignment::Center);
        assert_eq!(viewport.offset(), 50);
        viewport.reveal(1, ScrollAlignment::Center);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn reveal_waits_for_a_layout() {
        let mut viewport = ColumnViewport::new(24);
        viewport.reveal(20, ScrollAlignment::Center);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn row_hit_testing_respects_offset() {
        let mut viewport = viewport(8);
        viewport.scroll_lines(4);
        assert_eq!(viewport.index_at_row(0), Some(4));
        assert_eq!(viewport.index_at_row(7), Some(11));
        assert_eq!(viewport.index_at_row(8), None);
        assert_eq!(viewport.visible_range(), 4..12);
    }

    #[test]
    fn shrinking_the_window_clamps_the_offset() {
        let mut viewport = ColumnViewport::new(24);
        viewport.set_height(10);
        viewport.scroll_lines(100);
        assert_eq!(viewport.offset(), 14);
        viewport.set_height(30);
        assert_eq!(viewport.height(), 24);
        assert_eq!(viewport.offset(), 0);
    }
}
