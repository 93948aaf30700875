//! Dialog widget: a message with a row of buttons.

use crate::attr::AttributeMask;
use crate::event::{Key, KeyEvent};
use crate::geometry::{Placement, Size};
use crate::markup::{compile, compile_lines, max_width, Cell, LineGlyph, MarkupResult};
use crate::render::surface::{Result, Surface, WindowId};
use crate::render::{draw_aligned, draw_cells, fill_row};
use crate::widget::{
    Bindable, ConstructError, ConstructResult, Drawable, InputContext, KeyOutcome, WidgetBase, WidgetState,
};

/// Blank columns between buttons.
const BUTTON_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogConfig {
    pub x: Placement,
    pub y: Placement,
    pub boxed: bool,
    pub shadow: bool,
    /// Draw a line between the message and the buttons.
    pub separator: bool,
    /// Added to the selected button.
    pub highlight: AttributeMask,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            x: Placement::Center,
            y: Placement::Center,
            boxed: true,
            shadow: false,
            separator: true,
            highlight: AttributeMask::REVERSE,
        }
    }
}

impl DialogConfig {
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

    pub fn with_separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_highlight(mut self, attrs: AttributeMask) -> Self {
        self.highlight = attrs;
        self
    }
}

/// Message lines above a row of buttons. Exits with the chosen button's
/// index.
#[derive(Debug, Clone)]
pub struct Dialog {
    base: WidgetBase,
    message: Vec<MarkupResult>,
    buttons: Vec<MarkupResult>,
    current: usize,
    separator: bool,
    highlight: AttributeMask,
}

impl Dialog {
    pub fn new<S: AsRef<str>>(
        surface: &mut dyn Surface,
        message: &str,
        buttons: &[S],
        config: DialogConfig,
    ) -> ConstructResult<Self> {
        if buttons.is_empty() {
            tracing::warn!("dialog created without buttons");
            return Err(ConstructError::EmptyButtons);
        }
        let message = compile_lines(message);
        let buttons: Vec<MarkupResult> = buttons.iter().map(|b| compile(b.as_ref())).collect();

        let border = 2 * i32::from(config.boxed);
        let width = max_width(&message).max(buttons_width(&buttons)) as i32 + border;
        let height = message.len() as i32 + i32::from(config.separator) + 1 + border;
        let base = WidgetBase::create(surface, Size::new(width, height), config.x, config.y, config.boxed, config.shadow)?;
        tracing::debug!(buttons = buttons.len(), "created dialog");

        Ok(Self {
            base,
            message,
            buttons,
            current: 0,
            separator: config.separator,
            highlight: config.highlight,
        })
    }

    pub fn current_button(&self) -> usize {
        self.current
    }

    /// Select a button; out-of-range indices are ignored.
    pub fn set_current_button(&mut self, index: usize) {
        if index < self.buttons.len() {
            self.current = index;
        }
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    fn next_button(&mut self) {
        self.current = (self.current + 1) % self.buttons.len();
    }

    fn previous_button(&mut self) {
        self.current = self.current.checked_sub(1).unwrap_or(self.buttons.len() - 1);
    }

    fn button_row(&self) -> i32 {
        self.base.border() + self.message.len() as i32 + i32::from(self.separator)
    }
}

fn buttons_width(buttons: &[MarkupResult]) -> usize {
    let labels: usize = buttons.iter().map(|b| b.consumed_width).sum();
    labels + BUTTON_GAP * buttons.len().saturating_sub(1)
}

impl Drawable for Dialog {
    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        let win = self.base.window();
        self.base.draw_frame(surface)?;
        let border = self.base.border();
        let inner = self.base.inner_width(surface)?;

        for (row, line) in self.message.iter().enumerate() {
            draw_aligned(surface, win, border + row as i32, border, inner, line, 0)?;
        }

        if self.separator {
            let row = self.button_row() - 1;
            let line = Cell::new(LineGlyph::Horizontal, self.base.box_attrs);
            fill_row(surface, win, row, border, inner, line)?;
            if self.base.state.boxed {
                surface.put_cell(win, row, 0, Cell::new(LineGlyph::LeftTee, self.base.box_attrs))?;
                surface.put_cell(win, row, border + inner as i32, Cell::new(LineGlyph::RightTee, self.base.box_attrs))?;
            }
        }

        let row = self.button_row();
        let mut col = border + (inner.saturating_sub(buttons_width(&self.buttons)) / 2) as i32;
        let mut cursor_col = col;
        for (i, button) in self.buttons.iter().enumerate() {
            let cells: Vec<Cell> = if i == self.current {
                cursor_col = col;
                button
                    .cells
                    .iter()
                    .map(|c| Cell::new(c.glyph, c.attrs | self.highlight))
                    .collect()
            } else {
                button.cells.clone()
            };
            let used = draw_cells(surface, win, row, col, &cells, button.consumed_width)?;
            col += (used + BUTTON_GAP) as i32;
        }

        if self.base.state.has_focus {
            surface.move_cursor(win, row, cursor_col)?;
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

impl Bindable for Dialog {
    type Output = usize;

    fn widget_type(&self) -> &'static str {
        "Dialog"
    }

    fn state(&self) -> &WidgetState {
        &self.base.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.base.state
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut InputContext<'_>) -> KeyOutcome<usize> {
        match key.code {
            Key::Left | Key::BackTab => self.previous_button(),
            Key::Right | Key::Tab => self.next_button(),
            Key::Enter => return KeyOutcome::Accept(self.current),
            Key::Escape => return KeyOutcome::Escape,
            _ => {}
        }
        KeyOutcome::Continue
    }
}

// ===========================================================================
// Tests
// ===========================================================================
