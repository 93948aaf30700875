//! Rendering: the surface contract, window stacking, drawing helpers and the
//! crossterm backend.

pub mod draw;
pub mod driver;
pub mod surface;
pub mod window;

pub use draw::{draw_aligned, draw_box, draw_cells, draw_shadow, fill_row};
pub use driver::CrosstermSurface;
pub use surface::{Surface, SurfaceError, WindowId};
pub use window::{CellUpdate, Frame, WindowStack};
