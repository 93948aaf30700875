//! Viewport/scroll engine shared by list-like widgets.
//!
//! `ScrollState` tracks the selected item, the first visible item and the
//! horizontal offset for a list of `list_size` rows shown in a window with
//! `capacity` visible rows. Every movement reports a [`Motion`]: moving past
//! an end is not an error, it leaves the state untouched and asks for a bell.
//! `Thumb` is the scrollbar indicator derived from the same state.

use std::ops::Range;

/// Outcome of a movement request.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Moved,
    /// Already at the boundary; nothing changed.
    Bell,
}

impl Motion {
    #[inline]
    pub fn is_bell(self) -> bool {
        self == Motion::Bell
    }
}

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Selection and viewport for a scrolling list.
///
/// For a non-empty list the following always hold:
///
/// * `current_item < list_size`
/// * `current_top <= current_item < current_top + view_size`
/// * `current_top <= max_top_item = list_size - view_size`
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    list_size: usize,
    capacity: usize,
    view_size: usize,
    current_item: usize,
    current_top: usize,
    max_top_item: usize,
    step: f64,
    toggle_size: usize,
    left_char: usize,
    max_left_char: usize,
}

impl ScrollState {
    /// A list of `list_size` rows in a window showing `capacity` rows.
    ///
    /// A zero capacity is treated as one row.
    pub fn new(list_size: usize, capacity: usize) -> Self {
        let mut state = Self {
            list_size,
            capacity: capacity.max(1),
            view_size: 0,
            current_item: 0,
            current_top: 0,
            max_top_item: 0,
            step: 1.0,
            toggle_size: 1,
            left_char: 0,
            max_left_char: 0,
        };
        state.recompute();
        state
    }

    // -- accessors ----------------------------------------------------------

    pub fn list_size(&self) -> usize {
        self.list_size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rows actually occupied: `min(capacity, list_size)`.
    pub fn view_size(&self) -> usize {
        self.view_size
    }

    pub fn current_item(&self) -> usize {
        self.current_item
    }

    pub fn current_top(&self) -> usize {
        self.current_top
    }

    pub fn max_top_item(&self) -> usize {
        self.max_top_item
    }

    /// Scrollbar rows per list item.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn toggle_size(&self) -> usize {
        self.toggle_size
    }

    pub fn left_char(&self) -> usize {
        self.left_char
    }

    pub fn max_left_char(&self) -> usize {
        self.max_left_char
    }

    pub fn is_empty(&self) -> bool {
        self.list_size == 0
    }

    /// Row of the selection inside the view.
    pub fn current_high(&self) -> usize {
        self.current_item - self.current_top
    }

    /// Item indices currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        self.current_top..(self.current_top + self.view_size).min(self.list_size)
    }

    // -- resizing -----------------------------------------------------------

    /// Change the number of items, keeping the selection where possible.
    pub fn set_list_size(&mut self, list_size: usize) {
        self.list_size = list_size;
        self.recompute();
    }

    /// Change the number of visible rows.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.recompute();
    }

    /// Set the widest item and the visible width for horizontal scrolling.
    pub fn set_content_width(&mut self, content_width: usize, view_width: usize) {
        self.max_left_char = content_width.saturating_sub(view_width);
        self.left_char = self.left_char.min(self.max_left_char);
    }

    fn recompute(&mut self) {
        self.view_size = self.capacity.min(self.list_size);
        self.max_top_item = self.list_size - self.view_size;

        if self.list_size == 0 {
            self.step = 1.0;
            self.toggle_size = 1;
            self.current_item = 0;
            self.current_top = 0;
            return;
        }

        self.step = self.capacity as f64 / self.list_size as f64;
        self.toggle_size = if self.list_size > self.capacity {
            1
        } else {
            (self.step.ceil() as usize).max(1)
        };

        self.current_item = self.current_item.min(self.list_size - 1);
        self.current_top = self.current_top.min(self.max_top_item);
        self.reveal();
    }

    /// Shift `current_top` the least amount that shows `current_item`.
    fn reveal(&mut self) {
        if self.current_item < self.current_top {
            self.current_top = self.current_item;
        } else if self.current_item >= self.current_top + self.view_size {
            self.current_top = self.current_item + 1 - self.view_size;
        }
    }

    // -- vertical movement --------------------------------------------------

    pub fn scroll_up(&mut self) -> Motion {
        if self.list_size == 0 || self.current_item == 0 {
            return Motion::Bell;
        }
        self.current_item -= 1;
        self.reveal();
        Motion::Moved
    }

    pub fn scroll_down(&mut self) -> Motion {
        if self.list_size == 0 || self.current_item + 1 >= self.list_size {
            return Motion::Bell;
        }
        self.current_item += 1;
        self.reveal();
        Motion::Moved
    }

    fn page(&self) -> usize {
        self.view_size.saturating_sub(1).max(1)
    }

    /// Move the view up one page, keeping the selection's row.
    pub fn page_up(&mut self) -> Motion {
        if self.list_size == 0 || self.current_item == 0 {
            return Motion::Bell;
        }
        let page = self.page();
        if self.current_top >= page {
            self.current_top -= page;
            self.current_item -= page;
        } else {
            self.current_top = 0;
            self.current_item = 0;
        }
        Motion::Moved
    }

    /// Move the view down one page, keeping the selection's row.
    pub fn page_down(&mut self) -> Motion {
        if self.list_size == 0 || self.current_item + 1 >= self.list_size {
            return Motion::Bell;
        }
        let page = self.page();
        if self.current_top + page <= self.max_top_item {
            self.current_top += page;
            self.current_item += page;
        } else {
            self.current_top = self.max_top_item;
            self.current_item = self.list_size - 1;
        }
        Motion::Moved
    }

    pub fn scroll_begin(&mut self) -> Motion {
        if self.list_size == 0 {
            return Motion::Bell;
        }
        self.current_item = 0;
        self.current_top = 0;
        Motion::Moved
    }

    pub fn scroll_end(&mut self) -> Motion {
        if self.list_size == 0 {
            return Motion::Bell;
        }
        self.current_item = self.list_size - 1;
        self.current_top = self.max_top_item;
        Motion::Moved
    }

    /// Select `item`, clamping it into range.
    pub fn set_position(&mut self, item: usize) {
        if self.list_size == 0 {
            return;
        }
        self.current_item = item.min(self.list_size - 1);
        self.reveal();
    }

    // -- horizontal movement ------------------------------------------------

    pub fn scroll_left(&mut self) -> Motion {
        if self.left_char == 0 {
            return Motion::Bell;
        }
        self.left_char -= 1;
        Motion::Moved
    }

    pub fn scroll_right(&mut self) -> Motion {
        if self.left_char >= self.max_left_char {
            return Motion::Bell;
        }
        self.left_char += 1;
        Motion::Moved
    }

    // -- scrollbar ----------------------------------------------------------

    /// Thumb geometry for a scrollbar track `track` rows tall.
    pub fn thumb(&self, track: usize) -> Thumb {
        if track == 0 {
            return Thumb::default();
        }
        let raw = (self.current_item as f64 * self.step).floor() as usize;
        let position = raw.min(track - 1);
        Thumb {
            position,
            size: self.toggle_size.min(track - position),
        }
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

// ---------------------------------------------------------------------------
// Thumb
// ---------------------------------------------------------------------------

/// Scrollbar thumb: first track row and number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Thumb {
    pub position: usize,
    pub size: usize,
}

impl Thumb {
    /// Whether track row `row` is part of the thumb.
    pub fn covers(self, row: usize) -> bool {
        row >= self.position && row < self.position + self.size
    }
}

// ===========================================================================
// Tests
// ===========================================================================
