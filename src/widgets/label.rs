//! Label widget: one or more lines of markup in a window.
//!
//! A label takes no part in focus traversal. Activating one waits for a
//! single key and returns it.

use crate::event::KeyEvent;
use crate::geometry::{Placement, Size};
use crate::markup::{compile_lines, max_width, MarkupResult};
use crate::render::surface::{Result, Surface, WindowId};
use crate::render::draw_aligned;
use crate::widget::{
    Bindable, ConstructResult, Drawable, InputContext, KeyOutcome, WidgetBase, WidgetState,
};

// ---------------------------------------------------------------------------
// LabelConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelConfig {
    pub x: Placement,
    pub y: Placement,
    pub boxed: bool,
    pub shadow: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            x: Placement::Center,
            y: Placement::Center,
            boxed: true,
            shadow: false,
        }
    }
}

impl LabelConfig {
    pub fn with_position(mut self, x: Placement, y: Placement) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_boxed(mut self, boxed: bool) -> Self {
        self.boxed = boxed;
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Static markup text.
///
/// The window is sized to the message given at construction; a later
/// [`set_message`](Label::set_message) is clipped to it.
#[derive(Debug, Clone)]
pub struct Label {
    base: WidgetBase,
    lines: Vec<MarkupResult>,
}

impl Label {
    pub fn new(surface: &mut dyn Surface, message: &str, config: LabelConfig) -> ConstructResult<Self> {
        let lines = compile_lines(message);
        let border = 2 * i32::from(config.boxed);
        let size = Size::new(
            max_width(&lines) as i32 + border,
            lines.len() as i32 + border,
        );
        let base = WidgetBase::create(surface, size, config.x, config.y, config.boxed, config.shadow)?;
        tracing::debug!(lines = lines.len(), "created label");
        Ok(Self { base, lines })
    }

    pub fn set_message(&mut self, message: &str) {
        self.lines = compile_lines(message);
    }

    pub fn lines(&self) -> &[MarkupResult] {
        &self.lines
    }

    /// The message as plain text, one line per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(MarkupResult::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Drawable for Label {
    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        self.base.draw_frame(surface)?;
        let border = self.base.border();
        let width = self.base.inner_width(surface)?;
        for (row, line) in self.lines.iter().enumerate() {
            draw_aligned(surface, self.base.window(), border + row as i32, border, width, line, 0)?;
        }
        Ok(())
    }

    fn window(&self) -> WindowId {
        self.base.window()
    }

    fn windows(&self) -> Vec<WindowId> {
        self.base.windows()
    }
}

impl Bindable for Label {
    type Output = KeyEvent;

    fn widget_type(&self) -> &'static str {
        "Label"
    }

    fn state(&self) -> &WidgetState {
        &self.base.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.base.state
    }

    fn accepts_focus(&self) -> bool {
        false
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut InputContext<'_>) -> KeyOutcome<KeyEvent> {
        KeyOutcome::Accept(key)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttributeMask;
    use crate::event::Key;
    use crate::testing::HeadlessSurface;
    use crate::widget::{ExitType, Interactive};
    use insta::assert_snapshot;

    fn top_left() -> LabelConfig {
        LabelConfig::default().with_position(Placement::Start, Placement::Start)
    }

    #[test]
    fn boxed_label_renders() {
        let mut s = HeadlessSurface::new(Size::new(20, 5));
        let label = Label::new(&mut s, "Hello\n<C>ok", top_left()).unwrap();
        label.draw(&mut s).unwrap();
        assert_snapshot!(s.render_to_string(), @r"
        ┌─────┐
        │Hello│
        │ ok  │
        └─────┘
        ");
    }

    #[test]
    fn markup_attributes_reach_cells() {
        let mut s = HeadlessSurface::new(Size::new(10, 1));
        let label = Label::new(&mut s, "</B>hi", top_left().with_boxed(false)).unwrap();
        label.draw(&mut s).unwrap();
        let cell = s.cell(label.window(), 0, 0).unwrap();
        assert_eq!(cell.attrs, AttributeMask::BOLD);
        assert_eq!(label.text(), "hi");
    }

    #[test]
    fn centered_by_default() {
        let mut s = HeadlessSurface::new(Size::new(9, 3));
        let label = Label::new(&mut s, "abc", LabelConfig::default().with_boxed(false)).unwrap();
        assert_eq!(s.window_region(label.window()).unwrap(), crate::geometry::Region::new(3, 1, 3, 1));
    }

    #[test]
    fn activate_returns_first_key() {
        let mut s = HeadlessSurface::new(Size::new(10, 3));
        let label = Label::new(&mut s, "press", top_left()).unwrap();
        let mut w = Interactive::new(label);
        assert!(!w.widget().accepts_focus());
        let r = w.activate(&mut s, Some(&[KeyEvent::plain(Key::F(2))][..]));
        assert_eq!(r.exit_type, ExitType::Normal);
        assert_eq!(r.value, Some(KeyEvent::plain(Key::F(2))));
    }

    #[test]
    fn too_wide_message_fails() {
        let mut s = HeadlessSurface::new(Size::new(4, 3));
        assert!(Label::new(&mut s, "too long", top_left()).is_err());
    }
}
