//! Inline text markup.
//!
//! ```text
//! <C></B>Title<!B> <#HL(5)>
//! ```
//!
//! compiles to a centered line whose first five cells are bold, followed by a
//! space and five horizontal-line glyphs. See [`compile`] for the grammar and
//! [`decompile`] for the reverse direction.

pub mod compiler;
pub mod decompiler;
pub mod glyph;
pub mod lexer;

pub use compiler::{compile, compile_lines, max_width, Alignment, MarkupResult, TAB_STOP};
pub use decompiler::{decompile, transition};
pub use glyph::{Cell, Glyph, LineGlyph};
