//! Markup compiler: markup string -> attributed cells.
//!
//! The compiler keeps a running [`AttributeMask`] while it walks the token
//! stream. Literal characters are emitted with the current mask, `</..>` adds
//! to it, `<!..>` removes from it, `<#XY(n)>` emits a line glyph `n` times and
//! a tab pads with spaces to the next multiple of [`TAB_STOP`] columns.
//! Nothing in the grammar can fail: malformed markers come through as text
//! and unknown glyph codes are skipped.

use crate::attr::{parse_color_pair, token_to_bit, AttributeMask};

use super::glyph::{Cell, Glyph, LineGlyph};
use super::lexer::{self, marker_body, Token};

/// Tab stops fall on multiples of this many columns.
pub const TAB_STOP: usize = 8;

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Alignment directive taken from a leading `<C>`, `<R>` or `<L>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Starting column for `content_width` columns inside `box_width`.
    ///
    /// Never negative: content wider than the box starts at column 0.
    pub fn offset(self, box_width: usize, content_width: usize) -> usize {
        let free = box_width.saturating_sub(content_width);
        match self {
            Alignment::None | Alignment::Left => 0,
            Alignment::Right => free,
            Alignment::Center => free / 2,
        }
    }
}

// ---------------------------------------------------------------------------
// MarkupResult
// ---------------------------------------------------------------------------

/// Output of [`compile`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupResult {
    pub cells: Vec<Cell>,
    /// Display columns taken by `cells`; markers contribute nothing.
    pub consumed_width: usize,
    pub alignment: Alignment,
}

impl MarkupResult {
    /// The text with attributes stripped; line glyphs use their fallback.
    pub fn plain_text(&self) -> String {
        self.cells.iter().map(|c| c.glyph.to_char()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Starting column when this line is justified inside `box_width`.
    pub fn offset_in(&self, box_width: usize) -> usize {
        self.alignment.offset(box_width, self.consumed_width)
    }
}

// ---------------------------------------------------------------------------
// compile
// ---------------------------------------------------------------------------

/// Compile one line of markup.
pub fn compile(markup: &str) -> MarkupResult {
    let mut out = Emitter::default();

    for (index, (token, text)) in lexer::lex(markup).into_iter().enumerate() {
        match token {
            Token::AlignCenter | Token::AlignRight | Token::AlignLeft if index == 0 => {
                out.alignment = match token {
                    Token::AlignCenter => Alignment::Center,
                    Token::AlignRight => Alignment::Right,
                    _ => Alignment::Left,
                };
            }
            Token::SetAttrs => out.set_attrs(marker_body(text)),
            Token::ClearAttrs => out.clear_attrs(marker_body(text)),
            Token::Special => out.special(marker_body(text)),
            Token::EscapedMarker => out.push(Glyph::Char('<')),
            Token::Tab => out.tab(),
            // Alignment markers past the first token are ordinary text.
            Token::AlignCenter | Token::AlignRight | Token::AlignLeft | Token::Literal => {
                for ch in text.chars() {
                    out.push(Glyph::Char(ch));
                }
            }
        }
    }

    MarkupResult {
        cells: out.cells,
        consumed_width: out.width,
        alignment: out.alignment,
    }
}

/// Compile every `\n`-separated line of `text`.
pub fn compile_lines(text: &str) -> Vec<MarkupResult> {
    text.split('\n').map(compile).collect()
}

/// Widest `consumed_width` among `lines`.
pub fn max_width(lines: &[MarkupResult]) -> usize {
    lines.iter().map(|l| l.consumed_width).max().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Emitter {
    cells: Vec<Cell>,
    width: usize,
    attrs: AttributeMask,
    alignment: Alignment,
}

impl Emitter {
    fn push(&mut self, glyph: Glyph) {
        let cell = Cell::new(glyph, self.attrs);
        self.width += cell.width();
        self.cells.push(cell);
    }

    fn tab(&mut self) {
        loop {
            self.push(Glyph::Char(' '));
            if self.width % TAB_STOP == 0 {
                break;
            }
        }
    }

    fn set_attrs(&mut self, body: &str) {
        for item in AttrItems::new(body) {
            match item {
                AttrItem::Bits(mask) => self.attrs |= mask,
                AttrItem::Pair(pair) => self.attrs = self.attrs.with_color_pair(pair),
            }
        }
    }

    fn clear_attrs(&mut self, body: &str) {
        for item in AttrItems::new(body) {
            match item {
                AttrItem::Bits(mask) => self.attrs = self.attrs - mask,
                AttrItem::Pair(pair) => self.attrs = self.attrs - AttributeMask::color(pair),
            }
        }
    }

    /// `body` is `XY` or `XY(n)` as guaranteed by the lexer.
    fn special(&mut self, body: &str) {
        let (code, rest) = body.split_at(body.len().min(2));
        let count = rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .and_then(|digits| digits.parse::<usize>().ok())
            .unwrap_or(1);

        let Some(glyph) = LineGlyph::from_code(code) else {
            return;
        };
        for _ in 0..count {
            self.push(Glyph::Line(glyph));
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute token iteration
// ---------------------------------------------------------------------------

enum AttrItem {
    Bits(AttributeMask),
    Pair(u8),
}

/// Walks a marker body such as `BU12R`: letters become attribute bits,
/// runs of digits are read two at a time as color pairs, anything else is
/// ignored.
struct AttrItems<'a> {
    rest: &'a str,
}

impl<'a> AttrItems<'a> {
    fn new(body: &'a str) -> Self {
        Self { rest: body }
    }
}

impl Iterator for AttrItems<'_> {
    type Item = AttrItem;

    fn next(&mut self) -> Option<AttrItem> {
        loop {
            let ch = self.rest.chars().next()?;
            if ch.is_ascii_digit() {
                let len = self
                    .rest
                    .bytes()
                    .take(2)
                    .take_while(u8::is_ascii_digit)
                    .count();
                let (digits, rest) = self.rest.split_at(len);
                self.rest = rest;
                if let Some(pair) = parse_color_pair(digits) {
                    return Some(AttrItem::Pair(pair));
                }
                continue;
            }
            self.rest = &self.rest[ch.len_utf8()..];
            if let Some(mask) = token_to_bit(ch) {
                return Some(AttrItem::Bits(mask));
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
