//! Capability traits: Drawable, Bindable, Scrollable, ScreenObject.
//!
//! A concrete widget implements the narrow traits it needs. [`Drawable`]
//! covers its windows, [`Bindable`] its built-in key handling, and
//! [`Scrollable`] hands list movement to a [`ScrollState`]. Wrapping a
//! `Bindable + Drawable` widget in [`Interactive`](super::Interactive) adds
//! the binding table and hook pipeline and makes it a [`ScreenObject`] that a
//! [`Screen`](crate::screen::Screen) can own.

use std::any::Any;

use crate::event::{Key, KeyEvent};
use crate::geometry::{Offset, Placement, Region};
use crate::render::surface::{Result, Surface, SurfaceError, WindowId};

use super::runtime::{InjectResult, InputContext, KeyOutcome};
use super::scroll::{Motion, ScrollState};
use super::state::WidgetState;

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

/// A widget that owns one or more windows on a surface.
pub trait Drawable {
    /// Paint the widget into its windows. Does not refresh the surface.
    fn draw(&self, surface: &mut dyn Surface) -> Result<()>;

    /// The window keys are read from and the cursor lives in.
    fn window(&self) -> WindowId;

    /// Every window the widget owns, bottom to top. Composite widgets
    /// override this.
    fn windows(&self) -> Vec<WindowId> {
        vec![self.window()]
    }

    /// Blank every window.
    fn erase(&self, surface: &mut dyn Surface) -> Result<()> {
        for win in self.windows() {
            surface.clear_window(win)?;
        }
        Ok(())
    }

    /// Area covered by all windows together.
    fn bounds(&self, surface: &dyn Surface) -> Result<Region> {
        let mut bounds = Region::EMPTY;
        for win in self.windows() {
            bounds = bounds.union(surface.window_region(win)?);
        }
        Ok(bounds)
    }

    /// Shift every window by `delta`. Either all windows move or none do.
    fn move_by(&mut self, surface: &mut dyn Surface, delta: Offset) -> Result<()> {
        let screen = surface.size().to_region();
        let mut moves = Vec::new();
        for win in self.windows() {
            let target = surface.window_region(win)?.translate(delta);
            if !screen.contains_region(target) {
                return Err(SurfaceError::out_of_bounds(target));
            }
            moves.push((win, target.origin()));
        }
        for (win, origin) in moves {
            surface.move_window(win, origin)?;
        }
        tracing::debug!(dx = delta.x, dy = delta.y, "moved widget");
        Ok(())
    }

    /// Reposition the widget on the surface.
    fn move_to(&mut self, surface: &mut dyn Surface, x: Placement, y: Placement) -> Result<()> {
        let bounds = self.bounds(surface)?;
        let target = surface.size().to_region().place(bounds.size(), x, y);
        self.move_by(surface, target.origin() - bounds.origin())
    }

    /// Release every window. All windows are attempted; the first failure
    /// is returned.
    fn destroy(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let mut first_err = None;
        for win in self.windows() {
            if let Err(err) = surface.destroy_window(win) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

// ---------------------------------------------------------------------------
// Bindable
// ---------------------------------------------------------------------------

/// A widget with built-in key handling.
pub trait Bindable {
    /// Value produced when the widget exits normally.
    type Output;

    /// Kind name used in logs, e.g. `"Entry"`.
    fn widget_type(&self) -> &'static str;

    fn state(&self) -> &WidgetState;

    fn state_mut(&mut self) -> &mut WidgetState;

    /// Whether screen traversal may give this widget focus.
    fn accepts_focus(&self) -> bool {
        true
    }

    /// Handle one already-normalized key.
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut InputContext<'_>) -> KeyOutcome<Self::Output>;
}

// ---------------------------------------------------------------------------
// Scrollable
// ---------------------------------------------------------------------------

/// A list-like widget whose cursor movement is a [`ScrollState`].
pub trait Scrollable {
    fn scroll_state(&self) -> &ScrollState;

    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    /// Apply a movement key. Returns `None` for keys that are not movement.
    fn scroll_key(&mut self, key: KeyEvent) -> Option<Motion> {
        let scroll = self.scroll_state_mut();
        let motion = match key.code {
            Key::Up => scroll.scroll_up(),
            Key::Down => scroll.scroll_down(),
            Key::PageUp => scroll.page_up(),
            Key::PageDown => scroll.page_down(),
            Key::Home => scroll.scroll_begin(),
            Key::End => scroll.scroll_end(),
            Key::Left => scroll.scroll_left(),
            Key::Right => scroll.scroll_right(),
            _ => return None,
        };
        Some(motion)
    }
}

// ---------------------------------------------------------------------------
// ScreenObject
// ---------------------------------------------------------------------------

/// Object-safe view of an interactive widget, as stored by a screen.
pub trait ScreenObject: Drawable {
    fn widget_type(&self) -> &'static str;

    fn state(&self) -> &WidgetState;

    fn state_mut(&mut self) -> &mut WidgetState;

    fn accepts_focus(&self) -> bool;

    /// Run one key through the full input pipeline. The widget's value, if
    /// any, stays with the widget.
    fn inject_key(&mut self, key: KeyEvent, paste_buffer: &mut String) -> InjectResult<()>;

    /// Downcast to `&dyn Any` for access to the concrete widget.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable access to the concrete widget.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
