//! In-memory window stack shared by the surface backends.
//!
//! `WindowStack` owns every window's cell grid and the stacking order.
//! `compose` flattens the stack into a single screen grid, bottom window
//! first, and `diff` compares two composed frames so a backend only emits
//! the cells that changed.

use slotmap::SlotMap;

use crate::geometry::{Offset, Region, Size};
use crate::markup::Cell;

use super::surface::{Result, SurfaceError, WindowId};

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Window {
    region: Region,
    /// Row-major, `region.width * region.height` cells.
    cells: Vec<Cell>,
}

impl Window {
    fn new(region: Region) -> Self {
        let len = (region.width * region.height) as usize;
        Self {
            region,
            cells: vec![Cell::blank(); len],
        }
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.region.height || col >= self.region.width {
            return None;
        }
        Some((row * self.region.width + col) as usize)
    }
}

// ---------------------------------------------------------------------------
// Frame / CellUpdate
// ---------------------------------------------------------------------------

/// A composed screen: `rows[y][x]`.
pub type Frame = Vec<Vec<Cell>>;

/// A single cell that changed between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

// ---------------------------------------------------------------------------
// WindowStack
// ---------------------------------------------------------------------------

/// Windows plus their stacking order on a surface of fixed size.
#[derive(Debug, Clone)]
pub struct WindowStack {
    size: Size,
    windows: SlotMap<WindowId, Window>,
    /// Bottom to top.
    order: Vec<WindowId>,
    cursor: Option<Offset>,
}

impl WindowStack {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            windows: SlotMap::with_key(),
            order: Vec::new(),
            cursor: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Change the surface size. Existing windows are kept as they are.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Window ids, bottom to top.
    pub fn stacking_order(&self) -> &[WindowId] {
        &self.order
    }

    /// Absolute cursor position, if any window placed it.
    pub fn cursor(&self) -> Option<Offset> {
        self.cursor
    }

    fn window(&self, win: WindowId) -> Result<&Window> {
        self.windows.get(win).ok_or(SurfaceError::UnknownWindow(win))
    }

    fn window_mut(&mut self, win: WindowId) -> Result<&mut Window> {
        self.windows
            .get_mut(win)
            .ok_or(SurfaceError::UnknownWindow(win))
    }

    fn check_fits(&self, region: Region) -> Result<()> {
        if region.is_empty() {
            return Err(SurfaceError::ZeroSized);
        }
        if !self.size.to_region().contains_region(region) {
            return Err(SurfaceError::out_of_bounds(region));
        }
        Ok(())
    }

    // -- window lifecycle ---------------------------------------------------

    pub fn create(&mut self, region: Region) -> Result<WindowId> {
        self.check_fits(region)?;
        let id = self.windows.insert(Window::new(region));
        self.order.push(id);
        Ok(id)
    }

    pub fn destroy(&mut self, win: WindowId) -> Result<()> {
        self.windows
            .remove(win)
            .ok_or(SurfaceError::UnknownWindow(win))?;
        self.order.retain(|id| *id != win);
        Ok(())
    }

    pub fn region(&self, win: WindowId) -> Result<Region> {
        Ok(self.window(win)?.region)
    }

    pub fn move_to(&mut self, win: WindowId, origin: Offset) -> Result<()> {
        let region = self.window(win)?.region;
        let moved = Region::new(origin.x, origin.y, region.width, region.height);
        self.check_fits(moved)?;
        self.window_mut(win)?.region = moved;
        Ok(())
    }

    pub fn raise(&mut self, win: WindowId) -> Result<()> {
        self.window(win)?;
        self.order.retain(|id| *id != win);
        self.order.push(win);
        Ok(())
    }

    pub fn lower(&mut self, win: WindowId) -> Result<()> {
        self.window(win)?;
        self.order.retain(|id| *id != win);
        self.order.insert(0, win);
        Ok(())
    }

    // -- contents -----------------------------------------------------------

    pub fn put(&mut self, win: WindowId, row: i32, col: i32, cell: Cell) -> Result<()> {
        let window = self.window_mut(win)?;
        if let Some(index) = window.index(row, col) {
            window.cells[index] = cell;
        }
        Ok(())
    }

    /// Cell at a window-relative position.
    pub fn get(&self, win: WindowId, row: i32, col: i32) -> Result<Option<Cell>> {
        let window = self.window(win)?;
        Ok(window.index(row, col).map(|i| window.cells[i]))
    }

    pub fn clear(&mut self, win: WindowId) -> Result<()> {
        self.window_mut(win)?.cells.fill(Cell::blank());
        Ok(())
    }

    pub fn move_cursor(&mut self, win: WindowId, row: i32, col: i32) -> Result<()> {
        let region = self.window(win)?.region;
        let row = row.clamp(0, region.height - 1);
        let col = col.clamp(0, region.width - 1);
        self.cursor = Some(Offset::new(region.x + col, region.y + row));
        Ok(())
    }

    // -- composition --------------------------------------------------------

    /// Paint every window, bottom to top, onto a blank screen.
    pub fn compose(&self) -> Frame {
        let width = self.size.width.max(0) as usize;
        let height = self.size.height.max(0) as usize;
        let mut frame = vec![vec![Cell::blank(); width]; height];
        let screen = self.size.to_region();

        for id in &self.order {
            let Some(window) = self.windows.get(*id) else {
                continue;
            };
            let clip = window.region.intersection(screen);
            for y in clip.y..clip.bottom() {
                for x in clip.x..clip.right() {
                    if let Some(i) = window.index(y - window.region.y, x - window.region.x) {
                        frame[y as usize][x as usize] = window.cells[i];
                    }
                }
            }
        }

        frame
    }

    /// Cells of `current` that differ from `previous`. A `previous` of a
    /// different shape counts as entirely stale.
    pub fn diff(current: &Frame, previous: &Frame) -> Vec<CellUpdate> {
        let same_shape = current.len() == previous.len()
            && current.iter().zip(previous).all(|(a, b)| a.len() == b.len());

        let mut updates = Vec::new();
        for (y, row) in current.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if !same_shape || previous[y][x] != *cell {
                    updates.push(CellUpdate {
                        x: x as u16,
                        y: y as u16,
                        cell: *cell,
                    });
                }
            }
        }
        updates
    }
}

/// The text of one composed row. The column after a wide glyph is covered by
/// it and skipped.
pub fn row_text(row: &[Cell]) -> String {
    let mut text = String::with_capacity(row.len());
    let mut skip = 0;
    for cell in row {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        text.push(cell.glyph.to_char());
        skip = cell.width().saturating_sub(1);
    }
    text
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttributeMask;

    fn stack() -> WindowStack {
        WindowStack::new(Size::new(10, 4))
    }

    fn frame_text(frame: &Frame) -> Vec<String> {
        frame.iter().map(|row| row_text(row).trim_end().to_owned()).collect()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    #[test]
    fn create_rejects_bad_regions() {
        let mut s = stack();
        assert!(matches!(s.create(Region::new(0, 0, 0, 3)), Err(SurfaceError::ZeroSized)));
        assert!(matches!(
            s.create(Region::new(8, 0, 5, 1)),
            Err(SurfaceError::OutOfBounds { cols: 5, x: 8, .. })
        ));
        assert!(s.is_empty());
    }

    #[test]
    fn destroy_unknown_window() {
        let mut s = stack();
        let id = s.create(Region::new(0, 0, 2, 2)).unwrap();
        s.destroy(id).unwrap();
        assert!(matches!(s.destroy(id), Err(SurfaceError::UnknownWindow(_))));
        assert!(s.stacking_order().is_empty());
    }

    #[test]
    fn move_keeps_contents() {
        let mut s = stack();
        let id = s.create(Region::new(0, 0, 2, 1)).unwrap();
        s.put(id, 0, 0, Cell::plain('x')).unwrap();
        s.move_to(id, Offset::new(5, 2)).unwrap();
        assert_eq!(s.region(id).unwrap(), Region::new(5, 2, 2, 1));
        assert_eq!(frame_text(&s.compose())[2], "     x");
        assert!(s.move_to(id, Offset::new(9, 0)).is_err());
    }

    // -----------------------------------------------------------------------
    // Contents
    // -----------------------------------------------------------------------

    #[test]
    fn put_outside_is_clipped() {
        let mut s = stack();
        let id = s.create(Region::new(1, 1, 3, 1)).unwrap();
        s.put(id, 0, 5, Cell::plain('z')).unwrap();
        s.put(id, -1, 0, Cell::plain('z')).unwrap();
        assert!(frame_text(&s.compose()).iter().all(|l| l.is_empty()));
        assert_eq!(s.get(id, 0, 5).unwrap(), None);
    }

    #[test]
    fn clear_blanks_window() {
        let mut s = stack();
        let id = s.create(Region::new(0, 0, 3, 1)).unwrap();
        s.put(id, 0, 1, Cell::new('q', AttributeMask::BOLD)).unwrap();
        s.clear(id).unwrap();
        assert_eq!(s.get(id, 0, 1).unwrap(), Some(Cell::blank()));
    }

    #[test]
    fn cursor_is_absolute_and_clamped() {
        let mut s = stack();
        let id = s.create(Region::new(2, 1, 3, 2)).unwrap();
        s.move_cursor(id, 1, 9).unwrap();
        assert_eq!(s.cursor(), Some(Offset::new(4, 2)));
    }

    // -----------------------------------------------------------------------
    // Stacking
    // -----------------------------------------------------------------------

    #[test]
    fn later_windows_paint_on_top() {
        let mut s = stack();
        let a = s.create(Region::new(0, 0, 3, 1)).unwrap();
        let b = s.create(Region::new(1, 0, 3, 1)).unwrap();
        for col in 0..3 {
            s.put(a, 0, col, Cell::plain('a')).unwrap();
            s.put(b, 0, col, Cell::plain('b')).unwrap();
        }
        assert_eq!(frame_text(&s.compose())[0], "abbb");

        s.raise(a).unwrap();
        assert_eq!(frame_text(&s.compose())[0], "aaab");

        s.lower(a).unwrap();
        assert_eq!(s.stacking_order(), &[a, b]);
        assert_eq!(frame_text(&s.compose())[0], "abbb");
    }

    // -----------------------------------------------------------------------
    // Diff
    // -----------------------------------------------------------------------

    #[test]
    fn diff_reports_changed_cells_only() {
        let mut s = stack();
        let id = s.create(Region::new(0, 0, 4, 1)).unwrap();
        let before = s.compose();
        s.put(id, 0, 2, Cell::plain('k')).unwrap();
        let updates = WindowStack::diff(&s.compose(), &before);
        assert_eq!(updates, vec![CellUpdate { x: 2, y: 0, cell: Cell::plain('k') }]);
    }

    #[test]
    fn diff_against_other_shape_is_full() {
        let s = stack();
        let updates = WindowStack::diff(&s.compose(), &Vec::new());
        assert_eq!(updates.len(), 40);
    }

    #[test]
    fn row_text_skips_wide_continuation() {
        let row = vec![Cell::plain('漢'), Cell::blank(), Cell::plain('a')];
        assert_eq!(row_text(&row), "漢a");
    }
}
