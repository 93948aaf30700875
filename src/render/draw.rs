//! Drawing helpers on top of [`Surface`].

use crate::attr::AttributeMask;
use crate::markup::{Cell, LineGlyph, MarkupResult};

use super::surface::{Result, Surface, WindowId};

/// Write `cells` left to right starting at (`row`, `col`), stopping at
/// `max_width` columns. Zero-width cells are dropped and wide cells advance
/// by two columns. Returns the number of columns used.
pub fn draw_cells<S: Surface + ?Sized>(
    surface: &mut S,
    win: WindowId,
    row: i32,
    col: i32,
    cells: &[Cell],
    max_width: usize,
) -> Result<usize> {
    let mut used = 0;
    for cell in cells {
        let width = cell.width();
        if width == 0 {
            continue;
        }
        if used + width > max_width {
            break;
        }
        surface.put_cell(win, row, col + used as i32, *cell)?;
        used += width;
    }
    Ok(used)
}

/// Draw a compiled line inside a `box_width`-column field starting at `col`,
/// honoring its alignment and skipping the first `skip` columns of content.
pub fn draw_aligned<S: Surface + ?Sized>(
    surface: &mut S,
    win: WindowId,
    row: i32,
    col: i32,
    box_width: usize,
    line: &MarkupResult,
    skip: usize,
) -> Result<usize> {
    let offset = line.offset_in(box_width);
    let cells = skip_columns(&line.cells, skip);
    draw_cells(surface, win, row, col + offset as i32, cells, box_width.saturating_sub(offset))
}

/// The tail of `cells` after dropping `columns` display columns.
fn skip_columns(cells: &[Cell], columns: usize) -> &[Cell] {
    let mut seen = 0;
    for (i, cell) in cells.iter().enumerate() {
        if seen >= columns {
            return &cells[i..];
        }
        seen += cell.width();
    }
    &[]
}

/// Fill `count` columns of `row` with one cell.
pub fn fill_row<S: Surface + ?Sized>(
    surface: &mut S,
    win: WindowId,
    row: i32,
    col: i32,
    count: usize,
    cell: Cell,
) -> Result<()> {
    for i in 0..count {
        surface.put_cell(win, row, col + i as i32, cell)?;
    }
    Ok(())
}

/// Draw a single-line border around the edge of `win`.
pub fn draw_box<S: Surface + ?Sized>(surface: &mut S, win: WindowId, attrs: AttributeMask) -> Result<()> {
    let region = surface.window_region(win)?;
    let (w, h) = (region.width, region.height);
    if w < 2 || h < 2 {
        return Ok(());
    }
    let glyph = |g: LineGlyph| Cell::new(g, attrs);

    fill_row(surface, win, 0, 1, (w - 2) as usize, glyph(LineGlyph::Horizontal))?;
    fill_row(surface, win, h - 1, 1, (w - 2) as usize, glyph(LineGlyph::Horizontal))?;
    for row in 1..h - 1 {
        surface.put_cell(win, row, 0, glyph(LineGlyph::Vertical))?;
        surface.put_cell(win, row, w - 1, glyph(LineGlyph::Vertical))?;
    }
    surface.put_cell(win, 0, 0, glyph(LineGlyph::UpperLeft))?;
    surface.put_cell(win, 0, w - 1, glyph(LineGlyph::UpperRight))?;
    surface.put_cell(win, h - 1, 0, glyph(LineGlyph::LowerLeft))?;
    surface.put_cell(win, h - 1, w - 1, glyph(LineGlyph::LowerRight))?;
    Ok(())
}

/// Shade a shadow window. The widget's own window covers all of it except
/// the right column and the bottom row.
pub fn draw_shadow<S: Surface + ?Sized>(surface: &mut S, win: WindowId) -> Result<()> {
    let region = surface.window_region(win)?;
    let shade = Cell::new(LineGlyph::Checkerboard, AttributeMask::DIM);
    for row in 0..region.height {
        fill_row(surface, win, row, 0, region.width as usize, shade)?;
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Region, Size};
    use crate::markup::compile;
    use crate::testing::HeadlessSurface;
    use insta::assert_snapshot;

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(Size::new(12, 4))
    }

    #[test]
    fn draw_cells_stops_at_width() {
        let mut s = surface();
        let win = s.create_window(Region::new(0, 0, 12, 1)).unwrap();
        let used = draw_cells(&mut s, win, 0, 1, &compile("abcdef").cells, 4).unwrap();
        assert_eq!(used, 4);
        assert_eq!(s.render_to_string(), " abcd");
    }

    #[test]
    fn draw_cells_wide_and_zero_width() {
        let mut s = surface();
        let win = s.create_window(Region::new(0, 0, 12, 1)).unwrap();
        let used = draw_cells(&mut s, win, 0, 0, &compile("漢e\u{301}x").cells, 12).unwrap();
        assert_eq!(used, 4);
        assert_eq!(s.render_to_string(), "漢ex");
    }

    #[test]
    fn draw_aligned_centers() {
        let mut s = surface();
        let win = s.create_window(Region::new(0, 0, 12, 1)).unwrap();
        draw_aligned(&mut s, win, 0, 0, 10, &compile("<C>abcd"), 0).unwrap();
        assert_eq!(s.render_to_string(), "   abcd");
    }

    #[test]
    fn draw_aligned_skips_columns() {
        let mut s = surface();
        let win = s.create_window(Region::new(0, 0, 12, 1)).unwrap();
        draw_aligned(&mut s, win, 0, 0, 10, &compile("abcdef"), 2).unwrap();
        assert_eq!(s.render_to_string(), "cdef");
    }

    #[test]
    fn boxed_window() {
        let mut s = surface();
        let win = s.create_window(Region::new(0, 0, 6, 3)).unwrap();
        draw_box(&mut s, win, AttributeMask::NORMAL).unwrap();
        assert_snapshot!(s.render_to_string(), @r"
        ┌────┐
        │    │
        └────┘
        ");
    }

    #[test]
    fn box_too_small_is_skipped() {
        let mut s = surface();
        let win = s.create_window(Region::new(0, 0, 1, 3)).unwrap();
        draw_box(&mut s, win, AttributeMask::NORMAL).unwrap();
        assert_eq!(s.render_to_string(), "");
    }

    #[test]
    fn shadow_under_window() {
        let mut s = surface();
        let shadow = s.create_window(Region::new(1, 1, 3, 2)).unwrap();
        let main = s.create_window(Region::new(0, 0, 3, 2)).unwrap();
        draw_shadow(&mut s, shadow).unwrap();
        for col in 0..3 {
            s.put_cell(main, 0, col, Cell::plain('#')).unwrap();
            s.put_cell(main, 1, col, Cell::plain('#')).unwrap();
        }
        assert_snapshot!(s.render_to_string(), @r"
        ###
        ###▒
         ▒▒▒
        ");
    }
}
