//! Scrolling list widget with a scrollbar.
//!
//! Items are markup lines. Selection and paging are delegated to a
//! [`ScrollState`]; the scrollbar lives in its own window laid over the
//! right edge of the list, so the widget owns two windows (three with a
//! shadow).

use crate::attr::AttributeMask;
use crate::event::{Key, KeyEvent};
use crate::geometry::{Placement, Region, Size};
use crate::markup::{compile, Cell, LineGlyph, MarkupResult};
use crate::render::surface::{Result, Surface, WindowId};
use crate::render::{draw_aligned, fill_row};
use crate::widget::{
    Bindable, ConstructError, ConstructResult, Drawable, InputContext, KeyOutcome, Motion, ScrollState, Scrollable,
    WidgetBase, WidgetState,
};

// ---------------------------------------------------------------------------
// ScrollListConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollListConfig {
    pub title: String,
    /// Outer size including border and title.
    pub size: Size,
    pub x: Placement,
    pub y: Placement,
    pub boxed: bool,
    pub shadow: bool,
    /// Prefix each item with its 1-based number.
    pub numbered: bool,
    pub scrollbar: bool,
    /// Added to the selected row.
    pub highlight: AttributeMask,
}

impl Default for ScrollListConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            size: Size::new(30, 10),
            x: Placement::Center,
            y: Placement::Center,
            boxed: true,
            shadow: false,
            numbered: false,
            scrollbar: true,
            highlight: AttributeMask::REVERSE,
        }
    }
}

impl ScrollListConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = Size::new(width, height);
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

    pub fn with_numbers(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    pub fn with_scrollbar(mut self, scrollbar: bool) -> Self {
        self.scrollbar = scrollbar;
        self
    }

    pub fn with_highlight(mut self, attrs: AttributeMask) -> Self {
        self.highlight = attrs;
        self
    }
}

// ---------------------------------------------------------------------------
// ScrollList
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScrollList {
    base: WidgetBase,
    items: Vec<MarkupResult>,
    scroll: ScrollState,
    /// One column wide, over the right edge of the list area.
    bar: Option<WindowId>,
    /// Columns available to item text.
    item_width: usize,
    numbered: bool,
    highlight: AttributeMask,
}

impl ScrollList {
    pub fn new<S: AsRef<str>>(
        surface: &mut dyn Surface,
        items: &[S],
        config: ScrollListConfig,
    ) -> ConstructResult<Self> {
        let border = i32::from(config.boxed);
        let title_rows = if config.title.is_empty() {
            0
        } else {
            config.title.split('\n').count() as i32
        };
        let needed = 2 * border + title_rows + 1;
        if config.size.height < needed {
            return Err(ConstructError::TooSmall {
                needed,
                available: config.size.height,
            });
        }
        let bar_width = i32::from(config.scrollbar);
        let item_width = config.size.width - 2 * border - bar_width;
        if item_width < 1 {
            return Err(ConstructError::TooSmall {
                needed: 2 * border + bar_width + 1,
                available: config.size.width,
            });
        }

        let mut base = WidgetBase::create(surface, config.size, config.x, config.y, config.boxed, config.shadow)?;
        base.set_title(&config.title);
        let capacity = (config.size.height - needed + 1) as usize;

        let bar = if config.scrollbar {
            let main = surface.window_region(base.window())?;
            let region = Region::new(
                main.right() - border - 1,
                main.y + base.content_row(),
                1,
                capacity as i32,
            );
            match surface.create_window(region) {
                Ok(bar) => Some(bar),
                Err(err) => {
                    for win in base.windows() {
                        let _ = surface.destroy_window(win);
                    }
                    return Err(err.into());
                }
            }
        } else {
            None
        };

        let mut list = Self {
            base,
            items: Vec::new(),
            scroll: ScrollState::new(0, capacity),
            bar,
            item_width: item_width as usize,
            numbered: config.numbered,
            highlight: config.highlight,
        };
        list.set_items(items);
        tracing::debug!(items = list.items.len(), capacity, "created scroll list");
        Ok(list)
    }

    // ── Items ────────────────────────────────────────────────────────

    pub fn set_items<S: AsRef<str>>(&mut self, items: &[S]) {
        self.items = items.iter().map(|item| compile(item.as_ref())).collect();
        self.scroll = ScrollState::new(self.items.len(), self.scroll.capacity());
        self.items_changed();
    }

    pub fn add_item(&mut self, item: &str) {
        self.items.push(compile(item));
        self.items_changed();
    }

    /// Insert before `index`, or append when `index` is past the end. The
    /// selection stays on the same item.
    pub fn insert_item(&mut self, index: usize, item: &str) {
        let index = index.min(self.items.len());
        let selected = self.current_item();
        self.items.insert(index, compile(item));
        self.items_changed();
        if let Some(current) = selected.filter(|&current| index <= current) {
            self.scroll.set_position(current + 1);
        }
    }

    /// Remove an item. Returns `false` when `index` is out of range. The
    /// selection stays on the same item unless that item is removed.
    pub fn delete_item(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        let current = self.scroll.current_item();
        self.items.remove(index);
        self.items_changed();
        if index < current {
            self.scroll.set_position(current - 1);
        }
        true
    }

    pub fn items(&self) -> &[MarkupResult] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected index, or `None` for an empty list.
    pub fn current_item(&self) -> Option<usize> {
        (!self.items.is_empty()).then(|| self.scroll.current_item())
    }

    /// Select an item; out-of-range indices clamp to the last item.
    pub fn set_current_item(&mut self, index: usize) {
        self.scroll.set_position(index);
    }

    /// First item whose plain text starts with `prefix`.
    pub fn search(&self, prefix: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.plain_text().starts_with(prefix))
    }

    fn items_changed(&mut self) {
        self.scroll.set_list_size(self.items.len());
        let widest = self.items.iter().map(|i| i.consumed_width).max().unwrap_or(0);
        self.scroll
            .set_content_width(widest + self.number_width(), self.item_width);
    }

    fn number_width(&self) -> usize {
        if self.numbered {
            self.items.len().to_string().len() + 2
        } else {
            0
        }
    }

    fn row_cells(&self, index: usize) -> Vec<Cell> {
        let item = &self.items[index];
        let mut cells = Vec::with_capacity(item.cells.len() + self.number_width());
        if self.numbered {
            let width = self.number_width() - 2;
            cells.extend(format!("{:>width$}. ", index + 1).chars().map(Cell::plain));
        }
        cells.extend_from_slice(&item.cells);
        if index == self.scroll.current_item() {
            for cell in &mut cells {
                cell.attrs |= self.highlight;
            }
        }
        cells
    }

    fn draw_scrollbar(&self, surface: &mut dyn Surface, bar: WindowId) -> Result<()> {
        let track = surface.window_region(bar)?.height as usize;
        let thumb = self.scroll.thumb(track);
        for row in 0..track {
            let cell = if !self.items.is_empty() && thumb.covers(row) {
                Cell::new(' ', AttributeMask::REVERSE)
            } else {
                Cell::new(LineGlyph::Checkerboard, AttributeMask::NORMAL)
            };
            surface.put_cell(bar, row as i32, 0, cell)?;
        }
        Ok(())
    }
}

impl Scrollable for ScrollList {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Drawable for ScrollList {
    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        let win = self.base.window();
        self.base.draw_frame(surface)?;

        let top = self.base.content_row();
        let col = self.base.border();
        for (row, index) in self.scroll.visible_range().enumerate() {
            let row = top + row as i32;
            let cells = self.row_cells(index);
            let line = MarkupResult {
                consumed_width: cells.iter().map(Cell::width).sum(),
                alignment: self.items[index].alignment,
                cells,
            };
            if index == self.scroll.current_item() {
                fill_row(surface, win, row, col, self.item_width, Cell::new(' ', self.highlight))?;
            }
            draw_aligned(surface, win, row, col, self.item_width, &line, self.scroll.left_char())?;
        }

        if let Some(bar) = self.bar {
            self.draw_scrollbar(surface, bar)?;
        }
        if self.base.state.has_focus && !self.items.is_empty() {
            surface.move_cursor(win, top + self.scroll.current_high() as i32, col)?;
        }
        Ok(())
    }

    fn window(&self) -> WindowId {
        self.base.window()
    }

    fn windows(&self) -> Vec<WindowId> {
        let mut windows = self.base.windows();
        windows.extend(self.bar);
        windows
    }
}

impl Bindable for ScrollList {
    type Output = usize;

    fn widget_type(&self) -> &'static str {
        "ScrollList"
    }

    fn state(&self) -> &WidgetState {
        &self.base.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.base.state
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut InputContext<'_>) -> KeyOutcome<usize> {
        match key.code {
            Key::Enter | Key::Tab => match self.current_item() {
                Some(index) => return KeyOutcome::Accept(index),
                None => ctx.bell(),
            },
            Key::Escape => return KeyOutcome::Escape,
            _ => {
                if let Some(Motion::Bell) = self.scroll_key(key) {
                    ctx.bell();
                }
            }
        }
        KeyOutcome::Continue
    }
}

// ===========================================================================
// Tests
// ===========================================================================
