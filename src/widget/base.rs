//! Window and frame bookkeeping shared by the built-in widgets.

use tracing::{debug, warn};

use crate::attr::AttributeMask;
use crate::geometry::{Placement, Region, Size};
use crate::markup::{compile_lines, max_width, MarkupResult};
use crate::render::surface::{Result, Surface, WindowId};
use crate::render::{draw_aligned, draw_box, draw_shadow};

use super::error::{ConstructError, ConstructResult};
use super::state::WidgetState;

/// A widget's main window, optional shadow window, title and border.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    pub state: WidgetState,
    win: WindowId,
    shadow_win: Option<WindowId>,
    title: Vec<MarkupResult>,
    pub box_attrs: AttributeMask,
}

impl WidgetBase {
    /// Create the windows for a widget whose main window is `size`.
    ///
    /// With `shadow`, a second window one cell down and right is created
    /// underneath, and placement accounts for the extra row and column.
    pub fn create(
        surface: &mut dyn Surface,
        size: Size,
        x: Placement,
        y: Placement,
        boxed: bool,
        shadow: bool,
    ) -> ConstructResult<Self> {
        let extra = i32::from(shadow);
        let outer = Size::new(size.width + extra, size.height + extra);
        let screen = surface.size();
        if outer.width > screen.width {
            return Err(ConstructError::TooSmall {
                needed: outer.width,
                available: screen.width,
            });
        }

        let placed = screen.to_region().place(outer, x, y);
        let main = Region::new(placed.x, placed.y, size.width, size.height);

        let shadow_win = if shadow {
            let region = main.translate(crate::geometry::Offset::new(1, 1));
            Some(surface.create_window(region).inspect_err(|err| {
                warn!(%err, ?region, "could not create shadow window");
            })?)
        } else {
            None
        };

        let win = match surface.create_window(main) {
            Ok(win) => win,
            Err(err) => {
                warn!(%err, region = ?main, "could not create widget window");
                if let Some(shadow) = shadow_win {
                    // Best effort; the creation error is the one worth reporting.
                    let _ = surface.destroy_window(shadow);
                }
                return Err(err.into());
            }
        };

        debug!(region = ?main, boxed, shadow, "created widget windows");
        Ok(Self {
            state: WidgetState::new(boxed, shadow),
            win,
            shadow_win,
            title: Vec::new(),
            box_attrs: AttributeMask::NORMAL,
        })
    }

    pub fn window(&self) -> WindowId {
        self.win
    }

    /// Shadow first so it stays underneath.
    pub fn windows(&self) -> Vec<WindowId> {
        self.shadow_win.into_iter().chain(Some(self.win)).collect()
    }

    pub fn border(&self) -> i32 {
        self.state.border()
    }

    // ── Title ────────────────────────────────────────────────────────

    /// Replace the title. Each `\n`-separated line is compiled as markup.
    pub fn set_title(&mut self, title: &str) {
        self.title = if title.is_empty() {
            Vec::new()
        } else {
            compile_lines(title)
        };
    }

    pub fn title(&self) -> &[MarkupResult] {
        &self.title
    }

    pub fn title_rows(&self) -> i32 {
        self.title.len() as i32
    }

    pub fn title_width(&self) -> usize {
        max_width(&self.title)
    }

    /// First row below the border and title.
    pub fn content_row(&self) -> i32 {
        self.border() + self.title_rows()
    }

    /// Columns available between the borders.
    pub fn inner_width(&self, surface: &dyn Surface) -> Result<usize> {
        let region = surface.window_region(self.win)?;
        Ok((region.width - 2 * self.border()).max(0) as usize)
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Shadow, blank window, border and title.
    pub fn draw_frame(&self, surface: &mut dyn Surface) -> Result<()> {
        if let Some(shadow) = self.shadow_win {
            draw_shadow(surface, shadow)?;
        }
        surface.clear_window(self.win)?;
        if self.state.boxed {
            draw_box(surface, self.win, self.box_attrs)?;
        }
        let inner = self.inner_width(surface)?;
        let border = self.border();
        for (i, line) in self.title.iter().enumerate() {
            draw_aligned(surface, self.win, border + i as i32, border, inner, line, 0)?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HeadlessSurface;
    use insta::assert_snapshot;

    #[test]
    fn shadow_window_sits_below() {
        let mut s = HeadlessSurface::new(Size::new(20, 10));
        let base = WidgetBase::create(&mut s, Size::new(4, 3), Placement::End, Placement::End, false, true).unwrap();
        assert_eq!(s.window_region(base.window()).unwrap(), Region::new(15, 6, 4, 3));
        assert_eq!(base.windows().len(), 2);
        assert_eq!(s.stacking_order().last(), Some(&base.window()));
    }

    #[test]
    fn too_wide_is_rejected() {
        let mut s = HeadlessSurface::new(Size::new(5, 5));
        let err = WidgetBase::create(&mut s, Size::new(6, 1), Placement::Start, Placement::Start, false, false)
            .unwrap_err();
        assert!(matches!(err, ConstructError::TooSmall { needed: 6, available: 5 }));
        assert_eq!(s.window_count(), 0);
    }

    #[test]
    fn too_tall_cleans_up_shadow() {
        let mut s = HeadlessSurface::new(Size::new(10, 3));
        let err = WidgetBase::create(&mut s, Size::new(3, 3), Placement::At(0), Placement::At(1), false, true);
        assert!(matches!(err, Err(ConstructError::Surface(_))));
        assert_eq!(s.window_count(), 0);
    }

    #[test]
    fn frame_with_title() {
        let mut s = HeadlessSurface::new(Size::new(10, 4));
        let mut base =
            WidgetBase::create(&mut s, Size::new(8, 4), Placement::Start, Placement::Start, true, false).unwrap();
        base.set_title("<C>Hi");
        assert_eq!(base.content_row(), 2);
        base.draw_frame(&mut s).unwrap();
        assert_snapshot!(s.render_to_string(), @r"
        ┌──────┐
        │  Hi  │
        │      │
        └──────┘
        ");
    }
}
