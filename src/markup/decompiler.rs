//! Cells back to markup.
//!
//! [`decompile`] is the inverse of [`compile`](super::compile) for text,
//! attributes and glyphs: compiling its output yields the same cells. It is
//! lossy in the other direction. Alignment markers are not stored in cells and
//! tabs have already been expanded to spaces, so neither is reproduced.

use crate::attr::{Attr, AttributeMask};

use super::glyph::{Cell, Glyph};

/// Markers that turn `old` into `new`.
///
/// Bits are visited in canonical order (`B D K R S U`) and each change gets
/// its own marker. A color change first clears the old pair, then sets the
/// new one.
pub fn transition(old: AttributeMask, new: AttributeMask) -> String {
    let mut out = String::new();

    for attr in Attr::ALL {
        match (old.is_set(attr), new.is_set(attr)) {
            (false, true) => marker(&mut out, '/', attr.letter()),
            (true, false) => marker(&mut out, '!', attr.letter()),
            _ => {}
        }
    }

    let (from, to) = (old.color_pair(), new.color_pair());
    if from != to {
        if from != 0 {
            out.push_str(&format!("<!{from}>"));
        }
        if to != 0 {
            out.push_str(&format!("</{to}>"));
        }
    }

    out
}

fn marker(out: &mut String, sigil: char, letter: char) {
    out.push('<');
    out.push(sigil);
    out.push(letter);
    out.push('>');
}

/// Reconstruct markup for a run of cells.
///
/// A literal `<` is written as `\<` and line glyphs as `<#XY>`. The result
/// ends in whatever attribute state the last cell had; no closing markers are
/// appended.
pub fn decompile(cells: &[Cell]) -> String {
    let mut out = String::with_capacity(cells.len());
    let mut current = AttributeMask::NORMAL;

    for cell in cells {
        if cell.attrs != current {
            out.push_str(&transition(current, cell.attrs));
            current = cell.attrs;
        }
        match cell.glyph {
            Glyph::Char('<') => out.push_str("\\<"),
            Glyph::Char(ch) => out.push(ch),
            Glyph::Line(line) => {
                out.push_str("<#");
                out.push_str(line.code());
                out.push('>');
            }
        }
    }

    out
}

// ===========================================================================
// Tests
// ===========================================================================
