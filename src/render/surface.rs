//! The terminal surface contract.
//!
//! Widgets never talk to a terminal directly. They own windows on a
//! [`Surface`]: rectangular cell grids created, stacked, moved and destroyed
//! through this trait. Two implementations ship with the crate:
//! [`CrosstermSurface`](super::CrosstermSurface) for a real terminal and
//! [`HeadlessSurface`](crate::testing::HeadlessSurface) for tests.

use thiserror::Error;

use crate::event::KeyEvent;
use crate::geometry::{Offset, Region, Size};
use crate::markup::Cell;

slotmap::new_key_type! {
    /// Handle to a window owned by a surface.
    pub struct WindowId;
}

// ---------------------------------------------------------------------------
// SurfaceError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("window of {rows}x{cols} at ({y}, {x}) does not fit the surface")]
    OutOfBounds { rows: i32, cols: i32, y: i32, x: i32 },

    #[error("window has no rows or no columns")]
    ZeroSized,

    #[error("unknown window {0:?}")]
    UnknownWindow(WindowId),

    #[error("key input is closed")]
    InputClosed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SurfaceError {
    pub(crate) fn out_of_bounds(region: Region) -> Self {
        SurfaceError::OutOfBounds {
            rows: region.height,
            cols: region.width,
            y: region.y,
            x: region.x,
        }
    }
}

pub type Result<T> = std::result::Result<T, SurfaceError>;

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A character-cell surface hosting stacked windows.
///
/// Coordinates passed to `put_cell` and `move_cursor` are relative to the
/// window; writes outside it are clipped silently. Windows are painted in
/// stacking order on `refresh`, most recently created or raised on top.
pub trait Surface {
    /// Size of the whole surface.
    fn size(&self) -> Size;

    /// Create a blank window. Fails when `region` is empty or does not fit.
    fn create_window(&mut self, region: Region) -> Result<WindowId>;

    fn destroy_window(&mut self, win: WindowId) -> Result<()>;

    /// Current placement of a window in surface coordinates.
    fn window_region(&self, win: WindowId) -> Result<Region>;

    /// Move a window so its top-left corner lands on `origin`. Contents move
    /// with it; the move fails if the window would leave the surface.
    fn move_window(&mut self, win: WindowId, origin: Offset) -> Result<()>;

    /// Put a window on top of the stack.
    fn raise_window(&mut self, win: WindowId) -> Result<()>;

    /// Put a window at the bottom of the stack.
    fn lower_window(&mut self, win: WindowId) -> Result<()>;

    fn put_cell(&mut self, win: WindowId, row: i32, col: i32, cell: Cell) -> Result<()>;

    /// Fill a window with blanks.
    fn clear_window(&mut self, win: WindowId) -> Result<()>;

    fn move_cursor(&mut self, win: WindowId, row: i32, col: i32) -> Result<()>;

    /// Push pending changes to the display.
    fn refresh(&mut self) -> Result<()>;

    /// Block until the next key is available.
    fn read_key(&mut self, win: WindowId) -> Result<KeyEvent>;

    /// Ring the terminal bell.
    fn beep(&mut self);
}
