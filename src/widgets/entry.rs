//! Entry widget: a single-line text field.
//!
//! Supports cursor movement, insertion and deletion, the shared paste
//! buffer, a maximum length and several display kinds. The field scrolls
//! horizontally when the value is wider than the field.

use unicode_width::UnicodeWidthChar;

use crate::attr::AttributeMask;
use crate::event::{Key, KeyEvent, COPY, CUT, ERASE, KILL, PASTE, TRANSPOSE};
use crate::geometry::{Placement, Size};
use crate::markup::{compile, compile_lines, max_width, Cell, MarkupResult};
use crate::render::surface::{Result, Surface, WindowId};
use crate::render::{draw_cells, fill_row};
use crate::widget::{
    Bindable, ConstructResult, Drawable, InputContext, KeyOutcome, WidgetBase, WidgetState,
};

// ---------------------------------------------------------------------------
// DisplayKind
// ---------------------------------------------------------------------------

/// Which characters the field accepts and how they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayKind {
    /// Any printable character.
    #[default]
    Mixed,
    /// Alphabetic characters only.
    Char,
    /// Digits only.
    Digit,
    /// Any printable character, shown as `*`.
    Hidden,
}

impl DisplayKind {
    pub fn accepts(self, ch: char) -> bool {
        match self {
            DisplayKind::Mixed | DisplayKind::Hidden => !ch.is_control(),
            DisplayKind::Char => ch.is_alphabetic(),
            DisplayKind::Digit => ch.is_ascii_digit(),
        }
    }

    fn shown(self, ch: char) -> char {
        match self {
            DisplayKind::Hidden => '*',
            _ => ch,
        }
    }
}

// ---------------------------------------------------------------------------
// EntryConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryConfig {
    /// Title markup, one line per `\n`.
    pub title: String,
    /// Markup drawn left of the field.
    pub label: String,
    pub field_width: usize,
    /// Longest value accepted, in characters.
    pub max_length: usize,
    pub display: DisplayKind,
    pub field_attrs: AttributeMask,
    /// Shown in the unused part of the field.
    pub filler: char,
    pub x: Placement,
    pub y: Placement,
    pub boxed: bool,
    pub shadow: bool,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            label: String::new(),
            field_width: 20,
            max_length: 256,
            display: DisplayKind::Mixed,
            field_attrs: AttributeMask::NORMAL,
            filler: '.',
            x: Placement::Center,
            y: Placement::Center,
            boxed: true,
            shadow: false,
        }
    }
}

impl EntryConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_field_width(mut self, width: usize) -> Self {
        self.field_width = width;
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    pub fn with_display(mut self, display: DisplayKind) -> Self {
        self.display = display;
        self
    }

    pub fn with_field_attrs(mut self, attrs: AttributeMask) -> Self {
        self.field_attrs = attrs;
        self
    }

    pub fn with_filler(mut self, filler: char) -> Self {
        self.filler = filler;
        self
    }

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
// Entry
// ---------------------------------------------------------------------------

/// A single-line text field.
///
/// The cursor is a byte offset into the value and always sits on a char
/// boundary.
#[derive(Debug, Clone)]
pub struct Entry {
    base: WidgetBase,
    label: MarkupResult,
    value: String,
    cursor: usize,
    /// First display column shown in the field.
    left_col: usize,
    field_width: usize,
    max_length: usize,
    display: DisplayKind,
    field_attrs: AttributeMask,
    filler: char,
}

impl Entry {
    pub fn new(surface: &mut dyn Surface, config: EntryConfig) -> ConstructResult<Self> {
        let label = compile(&config.label);
        let title_width = max_width(&compile_lines(&config.title));
        let title_rows = if config.title.is_empty() {
            0
        } else {
            config.title.split('\n').count() as i32
        };
        let field_width = config.field_width.max(1);
        let border = 2 * i32::from(config.boxed);
        let size = Size::new(
            (label.consumed_width + field_width).max(title_width) as i32 + border,
            1 + title_rows + border,
        );

        let mut base = WidgetBase::create(surface, size, config.x, config.y, config.boxed, config.shadow)?;
        base.set_title(&config.title);
        tracing::debug!(field_width, max_length = config.max_length, "created entry");

        Ok(Self {
            base,
            label,
            value: String::new(),
            cursor: 0,
            left_col: 0,
            field_width,
            max_length: config.max_length,
            display: config.display,
            field_attrs: config.field_attrs,
            filler: config.filler,
        })
    }

    // ── Value ────────────────────────────────────────────────────────

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, truncated to the maximum length, and move the
    /// cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(self.max_length).collect();
        self.cursor = self.value.len();
        self.left_col = 0;
        self.reveal_cursor();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.left_col = 0;
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    /// First display column shown in the field.
    pub fn left_col(&self) -> usize {
        self.left_col
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    // ── Editing ──────────────────────────────────────────────────────

    fn insert_char(&mut self, ch: char) -> bool {
        if !self.display.accepts(ch) || self.char_len() >= self.max_length {
            return false;
        }
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        true
    }

    fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_char_boundary();
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        let next = self.next_char_boundary();
        self.value.drain(self.cursor..next);
        true
    }

    fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = self.prev_char_boundary();
        true
    }

    fn move_right(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.cursor = self.next_char_boundary();
        true
    }

    /// Swap the character under the cursor with the one after it.
    fn transpose(&mut self) -> bool {
        let mut rest = self.value[self.cursor..].chars();
        let (Some(a), Some(b)) = (rest.next(), rest.next()) else {
            return false;
        };
        let end = self.cursor + a.len_utf8() + b.len_utf8();
        let swapped: String = [b, a].iter().collect();
        self.value.replace_range(self.cursor..end, &swapped);
        true
    }

    fn kill_to_end(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.truncate(self.cursor);
        true
    }

    fn prev_char_boundary(&self) -> usize {
        let mut pos = self.cursor.saturating_sub(1);
        while pos > 0 && !self.value.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_char_boundary(&self) -> usize {
        let mut pos = self.cursor + 1;
        while pos < self.value.len() && !self.value.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }

    /// Display columns of `text` as shown in the field.
    fn shown_width(&self, text: &str) -> usize {
        text.chars().map(|ch| self.display.shown(ch).width().unwrap_or(0)).sum()
    }

    /// Display column of the cursor within the whole value.
    fn cursor_col(&self) -> usize {
        self.shown_width(&self.value[..self.cursor])
    }

    /// Scroll the field so the cell under the cursor is fully visible.
    ///
    /// `left_col` always lands on the start of a character.
    fn reveal_cursor(&mut self) {
        let cursor_col = self.cursor_col();
        let under = self.value[self.cursor..]
            .chars()
            .next()
            .map_or(1, |ch| self.display.shown(ch).width().unwrap_or(0).max(1));
        if cursor_col < self.left_col {
            self.left_col = cursor_col;
        } else if cursor_col + under > self.left_col + self.field_width {
            let wanted = cursor_col + under - self.field_width;
            let mut col = 0;
            for ch in self.value.chars() {
                if col >= wanted {
                    break;
                }
                col += self.display.shown(ch).width().unwrap_or(0);
            }
            self.left_col = col.min(cursor_col);
        }
    }

    fn field_col(&self) -> i32 {
        self.base.border() + self.label.consumed_width as i32
    }
}

impl Drawable for Entry {
    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        let win = self.base.window();
        self.base.draw_frame(surface)?;

        let row = self.base.content_row();
        draw_cells(surface, win, row, self.base.border(), &self.label.cells, self.label.consumed_width)?;

        let col = self.field_col();
        fill_row(surface, win, row, col, self.field_width, Cell::new(self.filler, self.field_attrs))?;
        let mut start = 0;
        let shown: Vec<Cell> = self
            .value
            .chars()
            .map(|ch| Cell::new(self.display.shown(ch), self.field_attrs))
            .skip_while(|cell| {
                let skip = start < self.left_col;
                start += cell.width();
                skip
            })
            .collect();
        draw_cells(surface, win, row, col, &shown, self.field_width)?;

        if self.base.state.has_focus {
            let offset = self.cursor_col().saturating_sub(self.left_col) as i32;
            surface.move_cursor(win, row, col + offset)?;
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

impl Bindable for Entry {
    type Output = String;

    fn widget_type(&self) -> &'static str {
        "Entry"
    }

    fn state(&self) -> &WidgetState {
        &self.base.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.base.state
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut InputContext<'_>) -> KeyOutcome<String> {
        let ok = match key {
            k if k == CUT => {
                if self.value.is_empty() {
                    false
                } else {
                    *ctx.paste_buffer = std::mem::take(&mut self.value);
                    self.clear();
                    true
                }
            }
            k if k == COPY => {
                ctx.paste_buffer.clone_from(&self.value);
                !self.value.is_empty()
            }
            k if k == PASTE => {
                if ctx.paste_buffer.is_empty() {
                    false
                } else {
                    let text = ctx.paste_buffer.clone();
                    self.set_value(&text);
                    true
                }
            }
            k if k == ERASE => {
                self.clear();
                true
            }
            k if k == KILL => self.kill_to_end(),
            k if k == TRANSPOSE => self.transpose(),
            _ => match key.code {
                Key::Enter | Key::Tab => return KeyOutcome::Accept(self.value.clone()),
                Key::Escape => return KeyOutcome::Escape,
                Key::Left => self.move_left(),
                Key::Right => self.move_right(),
                Key::Home => {
                    self.cursor = 0;
                    true
                }
                Key::End => {
                    self.cursor = self.value.len();
                    true
                }
                Key::Backspace => self.delete_backward(),
                Key::Delete => self.delete_forward(),
                _ => match key.printable() {
                    Some(ch) => self.insert_char(ch),
                    None => false,
                },
            },
        };
        if !ok {
            ctx.bell();
        }
        self.reveal_cursor();
        KeyOutcome::Continue
    }
}

// ===========================================================================
// Tests
// ===========================================================================
