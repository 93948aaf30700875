//! Crossterm terminal backend.
//!
//! `CrosstermSurface` keeps every window in a [`WindowStack`], composes the
//! stack on `refresh`, and writes only the cells that changed since the last
//! frame. Creating one switches the terminal to raw mode on the alternate
//! screen; dropping it restores the terminal.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, event, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::attr::{Attr, AttributeMask};
use crate::event::KeyEvent;
use crate::geometry::{Offset, Region, Size};
use crate::markup::Cell;

use super::surface::{Result, Surface, WindowId};
use super::window::{Frame, WindowStack};

// ---------------------------------------------------------------------------
// CrosstermSurface
// ---------------------------------------------------------------------------

/// Terminal surface using crossterm.
///
/// Writes go through a `BufWriter<Stdout>` and are flushed once per refresh.
pub struct CrosstermSurface {
    writer: BufWriter<Stdout>,
    stack: WindowStack,
    previous: Frame,
    active: bool,
}

impl CrosstermSurface {
    /// Enter the alternate screen and enable raw mode.
    pub fn new() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut writer = BufWriter::new(io::stdout());
        execute!(writer, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        tracing::debug!(cols, rows, "terminal surface opened");
        Ok(Self {
            writer,
            stack: WindowStack::new(Size::new(cols as i32, rows as i32)),
            previous: Vec::new(),
            active: true,
        })
    }

    /// Leave the alternate screen and disable raw mode. Called on drop.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.writer, ResetColor, cursor::Show, LeaveAlternateScreen)?;
        tracing::debug!("terminal surface closed");
        Ok(())
    }

    fn flush_frame(&mut self) -> io::Result<()> {
        let frame = self.stack.compose();
        for update in WindowStack::diff(&frame, &self.previous) {
            let (x, y) = (update.x as usize, update.y as usize);
            if x > 0 && frame[y][x - 1].width() > 1 {
                continue;
            }
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.apply_attributes(update.cell.attrs)?;
            queue!(self.writer, Print(update.cell.glyph.to_char()))?;
        }
        queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;

        match self.stack.cursor() {
            Some(Offset { x, y }) => {
                queue!(self.writer, cursor::MoveTo(x as u16, y as u16), cursor::Show)?
            }
            None => queue!(self.writer, cursor::Hide)?,
        }
        self.writer.flush()?;
        self.previous = frame;
        Ok(())
    }

    fn apply_attributes(&mut self, attrs: AttributeMask) -> io::Result<()> {
        queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;
        for attr in terminal_attributes(attrs) {
            queue!(self.writer, SetAttribute(attr))?;
        }
        if let Some((fg, bg)) = pair_colors(attrs.color_pair()) {
            queue!(self.writer, SetForegroundColor(fg), SetBackgroundColor(bg))?;
        }
        Ok(())
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}

impl Surface for CrosstermSurface {
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
        self.flush_frame()?;
        Ok(())
    }

    fn read_key(&mut self, win: WindowId) -> Result<KeyEvent> {
        self.stack.region(win)?;
        loop {
            let ev = event::read()?;
            if let event::Event::Resize(cols, rows) = ev {
                self.stack.resize(Size::new(cols as i32, rows as i32));
                self.previous.clear();
                self.flush_frame()?;
                continue;
            }
            if let Some(key) = KeyEvent::from_crossterm(ev) {
                return Ok(key);
            }
        }
    }

    fn beep(&mut self) {
        let rung = queue!(self.writer, Print('\u{7}')).and_then(|_| self.writer.flush());
        if let Err(err) = rung {
            tracing::warn!(%err, "bell failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute mapping
// ---------------------------------------------------------------------------

/// Crossterm attributes for a mask. Standout renders as bold reverse.
pub fn terminal_attributes(attrs: AttributeMask) -> Vec<Attribute> {
    let mut out: Vec<Attribute> = Vec::new();
    for attr in attrs.attrs() {
        let mapped: &[Attribute] = match attr {
            Attr::Bold => &[Attribute::Bold],
            Attr::Dim => &[Attribute::Dim],
            Attr::Blink => &[Attribute::SlowBlink],
            Attr::Reverse => &[Attribute::Reverse],
            Attr::Standout => &[Attribute::Bold, Attribute::Reverse],
            Attr::Underline => &[Attribute::Underlined],
        };
        for a in mapped {
            if !out.contains(a) {
                out.push(*a);
            }
        }
    }
    out
}

const PALETTE: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

/// Default color for pair `n` in `1..=64`: foreground `(n - 1) / 8`,
/// background `(n - 1) % 8` over the eight ANSI colors. Pair 0 and pairs
/// above 64 have no color.
pub fn pair_colors(pair: u8) -> Option<(Color, Color)> {
    if pair == 0 || pair > 64 {
        return None;
    }
    let index = (pair - 1) as usize;
    Some((PALETTE[index / 8], PALETTE[index % 8]))
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Attributes
    // -----------------------------------------------------------------------

    #[test]
    fn normal_has_no_attributes() {
        assert!(terminal_attributes(AttributeMask::NORMAL).is_empty());
    }

    #[test]
    fn attributes_follow_canonical_order() {
        let attrs = AttributeMask::UNDERLINE | AttributeMask::BOLD | AttributeMask::BLINK;
        assert_eq!(
            terminal_attributes(attrs),
            vec![Attribute::Bold, Attribute::SlowBlink, Attribute::Underlined]
        );
    }

    #[test]
    fn standout_with_bold_is_not_repeated() {
        let attrs = AttributeMask::BOLD | AttributeMask::REVERSE | AttributeMask::STANDOUT;
        assert_eq!(terminal_attributes(attrs), vec![Attribute::Bold, Attribute::Reverse]);
    }

    #[test]
    fn standout_is_bold_reverse() {
        assert_eq!(
            terminal_attributes(AttributeMask::STANDOUT),
            vec![Attribute::Bold, Attribute::Reverse]
        );
    }

    // -----------------------------------------------------------------------
    // Color pairs
    // -----------------------------------------------------------------------

    #[test]
    fn pair_zero_is_uncolored() {
        assert_eq!(pair_colors(0), None);
        assert_eq!(pair_colors(65), None);
    }

    #[test]
    fn pair_layout() {
        assert_eq!(pair_colors(1), Some((Color::Black, Color::Black)));
        assert_eq!(pair_colors(2), Some((Color::Black, Color::Red)));
        assert_eq!(pair_colors(9), Some((Color::Red, Color::Black)));
        assert_eq!(pair_colors(64), Some((Color::White, Color::White)));
    }
}
