//! Line-drawing glyphs and the [`Cell`] type.
//!
//! `<#XY>` markers name one of the [`LineGlyph`]s below by a two-letter code.
//! Backends that have a native line-drawing character set can map the glyph
//! directly; text backends use [`LineGlyph::fallback`].

use unicode_width::UnicodeWidthChar;

use crate::attr::AttributeMask;

// ---------------------------------------------------------------------------
// LineGlyph
// ---------------------------------------------------------------------------

/// A special box-drawing or symbol glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineGlyph {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    LeftTee,
    RightTee,
    TopTee,
    BottomTee,
    Horizontal,
    Vertical,
    Plus,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Diamond,
    Checkerboard,
    Degree,
    PlusMinus,
    Bullet,
    Scan1,
    Scan9,
}

/// (code, glyph, fallback) table. Codes are case-sensitive.
const GLYPHS: [(&str, LineGlyph, char); 22] = [
    ("UL", LineGlyph::UpperLeft, '┌'),
    ("UR", LineGlyph::UpperRight, '┐'),
    ("LL", LineGlyph::LowerLeft, '└'),
    ("LR", LineGlyph::LowerRight, '┘'),
    ("LT", LineGlyph::LeftTee, '├'),
    ("RT", LineGlyph::RightTee, '┤'),
    ("TT", LineGlyph::TopTee, '┬'),
    ("BT", LineGlyph::BottomTee, '┴'),
    ("HL", LineGlyph::Horizontal, '─'),
    ("VL", LineGlyph::Vertical, '│'),
    ("PL", LineGlyph::Plus, '┼'),
    ("LA", LineGlyph::LeftArrow, '←'),
    ("RA", LineGlyph::RightArrow, '→'),
    ("UA", LineGlyph::UpArrow, '↑'),
    ("DA", LineGlyph::DownArrow, '↓'),
    ("DI", LineGlyph::Diamond, '◆'),
    ("CB", LineGlyph::Checkerboard, '▒'),
    ("DG", LineGlyph::Degree, '°'),
    ("PM", LineGlyph::PlusMinus, '±'),
    ("BU", LineGlyph::Bullet, '·'),
    ("S1", LineGlyph::Scan1, '⎺'),
    ("S9", LineGlyph::Scan9, '⎽'),
];

impl LineGlyph {
    /// Look up a glyph by its two-letter markup code.
    pub fn from_code(code: &str) -> Option<LineGlyph> {
        GLYPHS
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, glyph, _)| *glyph)
    }

    /// The two-letter markup code.
    pub fn code(self) -> &'static str {
        self.entry().0
    }

    /// The Unicode character used by text backends.
    pub fn fallback(self) -> char {
        self.entry().2
    }

    /// Every glyph, in table order.
    pub fn all() -> impl Iterator<Item = LineGlyph> {
        GLYPHS.iter().map(|(_, glyph, _)| *glyph)
    }

    fn entry(self) -> &'static (&'static str, LineGlyph, char) {
        // The table covers every variant; the index follows declaration order.
        &GLYPHS[self as usize]
    }
}

// ---------------------------------------------------------------------------
// Glyph / Cell
// ---------------------------------------------------------------------------

/// What a cell displays: an ordinary character or a line-drawing glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Char(char),
    Line(LineGlyph),
}

impl Glyph {
    /// Display columns this glyph occupies (0 for combining/control characters).
    pub fn width(self) -> usize {
        match self {
            Glyph::Char(ch) => ch.width().unwrap_or(0),
            Glyph::Line(_) => 1,
        }
    }

    /// The character a text backend prints.
    pub fn to_char(self) -> char {
        match self {
            Glyph::Char(ch) => ch,
            Glyph::Line(line) => line.fallback(),
        }
    }
}

impl From<char> for Glyph {
    fn from(ch: char) -> Self {
        Glyph::Char(ch)
    }
}

impl From<LineGlyph> for Glyph {
    fn from(line: LineGlyph) -> Self {
        Glyph::Line(line)
    }
}

/// One character position: a glyph plus its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: Glyph,
    pub attrs: AttributeMask,
}

impl Cell {
    pub fn new(glyph: impl Into<Glyph>, attrs: AttributeMask) -> Self {
        Self {
            glyph: glyph.into(),
            attrs,
        }
    }

    /// A character with no attributes.
    pub fn plain(ch: char) -> Self {
        Self::new(ch, AttributeMask::NORMAL)
    }

    /// A space with no attributes.
    pub fn blank() -> Self {
        Self::plain(' ')
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.glyph.width()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_declaration_order() {
        for (index, (code, glyph, _)) in GLYPHS.iter().enumerate() {
            assert_eq!(*glyph as usize, index, "{code} out of order");
            assert_eq!(glyph.code(), *code);
        }
    }

    #[test]
    fn codes_round_trip() {
        for glyph in LineGlyph::all() {
            assert_eq!(LineGlyph::from_code(glyph.code()), Some(glyph));
        }
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(LineGlyph::from_code("ZZ"), None);
        assert_eq!(LineGlyph::from_code("ul"), None);
        assert_eq!(LineGlyph::from_code("U"), None);
    }

    #[test]
    fn corner_fallbacks() {
        assert_eq!(LineGlyph::UpperLeft.fallback(), '┌');
        assert_eq!(LineGlyph::LowerRight.fallback(), '┘');
        assert_eq!(LineGlyph::Horizontal.fallback(), '─');
    }

    #[test]
    fn glyph_widths() {
        assert_eq!(Glyph::Char('a').width(), 1);
        assert_eq!(Glyph::Char('漢').width(), 2);
        assert_eq!(Glyph::Char('\u{301}').width(), 0);
        assert_eq!(Glyph::Line(LineGlyph::Diamond).width(), 1);
    }

    #[test]
    fn cell_constructors() {
        assert_eq!(Cell::blank(), Cell::plain(' '));
        let c = Cell::new(LineGlyph::Bullet, AttributeMask::BOLD);
        assert_eq!(c.glyph.to_char(), '·');
        assert_eq!(c.attrs, AttributeMask::BOLD);
    }
}
