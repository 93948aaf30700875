//! logos-based markup lexer.
//!
//! Token priority in logos is determined by longest match first, so a complete
//! marker such as `</B>` always beats the single-character [`Token::Literal`]
//! that would otherwise consume its `<`. Input the lexer cannot classify (for
//! example an unterminated `</B`) is reported as [`Token::Literal`] covering
//! the unmatched span, which the compiler copies through as plain text.

use logos::Logos;

/// Markup token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // ── Alignment (only meaningful as the first token) ───────────────

    /// `<C>`
    #[token("<C>")]
    AlignCenter,

    /// `<R>`
    #[token("<R>")]
    AlignRight,

    /// `<L>`
    #[token("<L>")]
    AlignLeft,

    // ── Attribute markers ────────────────────────────────────────────

    /// `</BU12>`: attribute letters and color pairs to set.
    #[regex(r"</[A-Za-z0-9]+>")]
    SetAttrs,

    /// `<!BU12>`: attribute letters and color pairs to clear.
    #[regex(r"<![A-Za-z0-9]+>")]
    ClearAttrs,

    /// `<#HL>` or `<#HL(40)>`: a line-drawing glyph with an optional count.
    #[regex(r"<#[A-Za-z0-9]{2}(\([0-9]{1,3}\))?>")]
    Special,

    // ── Plain text ───────────────────────────────────────────────────

    /// `\<`: a literal `<`.
    #[token("\\<")]
    EscapedMarker,

    /// A horizontal tab.
    #[token("\t")]
    Tab,

    /// A single character copied through verbatim.
    #[regex(r"[^\t]")]
    Literal,
}

/// Split `input` into `(Token, slice)` pairs covering every byte of it.
pub fn lex(input: &str) -> Vec<(Token, &str)> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| (result.unwrap_or(Token::Literal), &input[span]))
        .collect()
}

/// The text between a marker's sigil and its closing `>`.
///
/// `</BU>` yields `BU`; `<#HL(3)>` yields `HL(3)`.
pub fn marker_body(slice: &str) -> &str {
    slice
        .get(2..slice.len().saturating_sub(1))
        .unwrap_or_default()
}
