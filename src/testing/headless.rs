//! HeadlessSurface: an in-memory [`Surface`] with scripted keys.
//!
//! Windows live in a [`WindowStack`] exactly as they do on a terminal, but
//! nothing is written anywhere. Keys come from a queue filled by the test;
//! `read_key` on an empty queue fails with [`SurfaceError::InputClosed`] so a
//! blocking activation loop ends instead of hanging.

use std::collections::VecDeque;

use crate::event::{Key, KeyEvent};
use crate::geometry::{Offset, Region, Size};
use crate::markup::Cell;
use crate::render::surface::{Result, Surface, SurfaceError, WindowId};
use crate::render::window::{row_text, Frame, WindowStack};

// ---------------------------------------------------------------------------
// HeadlessSurface
// ---------------------------------------------------------------------------

/// A surface for tests.
///
/// # Examples
///
/// ```
/// use cellkit::geometry::{Region, Size};
/// use cellkit::markup::compile;
/// use cellkit::render::{draw_cells, Surface};
/// use cellkit::testing::HeadlessSurface;
///
/// let mut surface = HeadlessSurface::new(Size::new(20, 2));
/// let win = surface.create_window(Region::new(0, 0, 20, 1)).unwrap();
/// draw_cells(&mut surface, win, 0, 0, &compile("</B>hi").cells, 20).unwrap();
/// assert_eq!(surface.render_to_string(), "hi");
/// ```
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    stack: WindowStack,
    keys: VecDeque<KeyEvent>,
    bells: usize,
    refreshes: usize,
}

impl HeadlessSurface {
    pub fn new(size: Size) -> Self {
        Self {
            stack: WindowStack::new(size),
            keys: VecDeque::new(),
            bells: 0,
            refreshes: 0,
        }
    }

    // ── Input scripting ──────────────────────────────────────────────

    /// Queue keys for later `read_key` calls.
    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = KeyEvent>) {
        self.keys.extend(keys);
    }

    pub fn push_key(&mut self, key: impl Into<KeyEvent>) {
        self.keys.push_back(key.into());
    }

    /// Queue one plain key per character of `text`.
    pub fn type_text(&mut self, text: &str) {
        self.keys.extend(text.chars().map(KeyEvent::char));
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        self.push_keys(keys);
        self
    }

    /// Keys not consumed yet.
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Number of `beep` calls so far.
    pub fn bells(&self) -> usize {
        self.bells
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn window_count(&self) -> usize {
        self.stack.len()
    }

    pub fn stacking_order(&self) -> &[WindowId] {
        self.stack.stacking_order()
    }

    pub fn cursor(&self) -> Option<Offset> {
        self.stack.cursor()
    }

    /// Cell at a window-relative position, `None` when outside the window.
    pub fn cell(&self, win: WindowId, row: i32, col: i32) -> Option<Cell> {
        self.stack.get(win, row, col).ok().flatten()
    }

    /// Composed screen cells.
    pub fn frame(&self) -> Frame {
        self.stack.compose()
    }

    /// Composed screen as text: one line per row, trailing spaces and
    /// trailing blank rows removed.
    pub fn render_to_string(&self) -> String {
        let lines: Vec<String> = self
            .stack
            .compose()
            .iter()
            .map(|row| row_text(row).trim_end().to_owned())
            .collect();
        lines.join("\n").trim_end().to_owned()
    }

    /// Text of one window row, trailing spaces removed.
    pub fn window_row(&self, win: WindowId, row: i32) -> String {
        let Ok(region) = self.stack.region(win) else {
            return String::new();
        };
        let cells: Vec<Cell> = (0..region.width)
            .filter_map(|col| self.cell(win, row, col))
            .collect();
        row_text(&cells).trim_end().to_owned()
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> Size {
        self.stack.size()
    }

    fn create_window(&mut self, region: Region) -> Result<WindowId> {
        self.stack.create(region)
    }

    fn destroy_window(&mut self, win: WindowId) -> Result<()> {
        self.stack.destroy(win)
    }

    fn window_region(&self, win: WindowId) -> Result<Region> {
        self.stack.region(win)
    }

    fn move_window(&mut self, win: WindowId, origin: Offset) -> Result<()> {
        self.stack.move_to(win, origin)
    }

    fn raise_window(&mut self, win: WindowId) -> Result<()> {
        self.stack.raise(win)
    }

    fn lower_window(&mut self, win: WindowId) -> Result<()> {
        self.stack.lower(win)
    }

    fn put_cell(&mut self, win: WindowId, row: i32, col: i32, cell: Cell) -> Result<()> {
        self.stack.put(win, row, col, cell)
    }

    fn clear_window(&mut self, win: WindowId) -> Result<()> {
        self.stack.clear(win)
    }

    fn move_cursor(&mut self, win: WindowId, row: i32, col: i32) -> Result<()> {
        self.stack.move_cursor(win, row, col)
    }

    fn refresh(&mut self) -> Result<()> {
        self.refreshes += 1;
        Ok(())
    }

    fn read_key(&mut self, win: WindowId) -> Result<KeyEvent> {
        self.stack.region(win)?;
        self.keys.pop_front().ok_or(SurfaceError::InputClosed)
    }

    fn beep(&mut self) {
        self.bells += 1;
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Size::new(80, 24))
    }
}

/// Shorthand for a list of plain keys in tests.
pub fn keys(codes: impl IntoIterator<Item = Key>) -> Vec<KeyEvent> {
    codes.into_iter().map(KeyEvent::plain).collect()
}

// ===========================================================================
// Tests
// ===========================================================================
