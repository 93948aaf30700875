//! Attribute algebra: text attributes plus an optional color pair.
//!
//! An [`AttributeMask`] is what every compiled [`Cell`](crate::markup::Cell)
//! carries. It is a bit-set over [`Attr`] and a color-pair number, where pair
//! `0` means "no color". Markup spells attributes with single letters
//! (`B`, `D`, `K`, `R`, `S`, `U`) and color pairs with one or two digits.

use std::fmt;
use std::ops::{BitOr, BitOrAssign, Sub};

/// Largest color pair a markup token can name.
pub const MAX_COLOR_PAIR: u8 = 99;

// ---------------------------------------------------------------------------
// Attr
// ---------------------------------------------------------------------------

/// A single text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    Bold,
    Dim,
    Blink,
    Reverse,
    Standout,
    Underline,
}

impl Attr {
    /// Every attribute in canonical token order.
    pub const ALL: [Attr; 6] = [
        Attr::Bold,
        Attr::Dim,
        Attr::Blink,
        Attr::Reverse,
        Attr::Standout,
        Attr::Underline,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Attr::Bold => 1 << 0,
            Attr::Dim => 1 << 1,
            Attr::Blink => 1 << 2,
            Attr::Reverse => 1 << 3,
            Attr::Standout => 1 << 4,
            Attr::Underline => 1 << 5,
        }
    }

    /// The markup letter for this attribute.
    pub const fn letter(self) -> char {
        match self {
            Attr::Bold => 'B',
            Attr::Dim => 'D',
            Attr::Blink => 'K',
            Attr::Reverse => 'R',
            Attr::Standout => 'S',
            Attr::Underline => 'U',
        }
    }

    /// Look up an attribute by its markup letter. Letters are case-sensitive.
    pub const fn from_letter(letter: char) -> Option<Attr> {
        match letter {
            'B' => Some(Attr::Bold),
            'D' => Some(Attr::Dim),
            'K' => Some(Attr::Blink),
            'R' => Some(Attr::Reverse),
            'S' => Some(Attr::Standout),
            'U' => Some(Attr::Underline),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// AttributeMask
// ---------------------------------------------------------------------------

/// Attribute bits plus a color pair (`0` = none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeMask {
    bits: u8,
    pair: u8,
}

impl AttributeMask {
    pub const NORMAL: AttributeMask = AttributeMask { bits: 0, pair: 0 };
    pub const BOLD: AttributeMask = AttributeMask::from_attr(Attr::Bold);
    pub const DIM: AttributeMask = AttributeMask::from_attr(Attr::Dim);
    pub const BLINK: AttributeMask = AttributeMask::from_attr(Attr::Blink);
    pub const REVERSE: AttributeMask = AttributeMask::from_attr(Attr::Reverse);
    pub const STANDOUT: AttributeMask = AttributeMask::from_attr(Attr::Standout);
    pub const UNDERLINE: AttributeMask = AttributeMask::from_attr(Attr::Underline);

    /// A mask with just `attr` set.
    pub const fn from_attr(attr: Attr) -> Self {
        Self { bits: attr.bit(), pair: 0 }
    }

    /// A mask carrying only a color pair. Pairs above [`MAX_COLOR_PAIR`] saturate.
    pub const fn color(pair: u8) -> Self {
        let pair = if pair > MAX_COLOR_PAIR { MAX_COLOR_PAIR } else { pair };
        Self { bits: 0, pair }
    }

    /// The color pair, `0` when none is set.
    #[inline]
    pub const fn color_pair(self) -> u8 {
        self.pair
    }

    /// Whether `attr` is set.
    #[inline]
    pub const fn is_set(self, attr: Attr) -> bool {
        self.bits & attr.bit() != 0
    }

    /// No attributes and no color.
    #[inline]
    pub const fn is_normal(self) -> bool {
        self.bits == 0 && self.pair == 0
    }

    /// Bitwise union. The color-pair field is OR-ed too (saturating at
    /// [`MAX_COLOR_PAIR`]) so the operation stays associative and commutative.
    pub const fn union(self, other: AttributeMask) -> Self {
        let pair = self.pair | other.pair;
        Self {
            bits: self.bits | other.bits,
            pair: if pair > MAX_COLOR_PAIR { MAX_COLOR_PAIR } else { pair },
        }
    }

    /// Remove `other`'s bits. The color pair is cleared only when `other`
    /// names exactly the active pair.
    pub const fn difference(self, other: AttributeMask) -> Self {
        let pair = if other.pair != 0 && other.pair == self.pair { 0 } else { self.pair };
        Self {
            bits: self.bits & !other.bits,
            pair,
        }
    }

    /// Same bits, color pair replaced.
    pub const fn with_color_pair(self, pair: u8) -> Self {
        let pair = if pair > MAX_COLOR_PAIR { MAX_COLOR_PAIR } else { pair };
        Self { bits: self.bits, pair }
    }

    /// Set attributes, in canonical order.
    pub fn attrs(self) -> impl Iterator<Item = Attr> {
        Attr::ALL.into_iter().filter(move |a| self.is_set(*a))
    }
}

impl BitOr for AttributeMask {
    type Output = AttributeMask;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for AttributeMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl Sub for AttributeMask {
    type Output = AttributeMask;
    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl From<Attr> for AttributeMask {
    fn from(attr: Attr) -> Self {
        AttributeMask::from_attr(attr)
    }
}

/// Canonical token spelling, e.g. `BU12`. Empty for [`AttributeMask::NORMAL`].
impl fmt::Display for AttributeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in self.attrs() {
            write!(f, "{}", attr.letter())?;
        }
        if self.pair != 0 {
            write!(f, "{}", self.pair)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Token helpers
// ---------------------------------------------------------------------------

/// Map a markup letter to its attribute mask.
///
/// Unknown letters yield `None`; callers ignore them rather than fail.
pub fn token_to_bit(letter: char) -> Option<AttributeMask> {
    Attr::from_letter(letter).map(AttributeMask::from_attr)
}

/// Parse a color-pair number written with one or two decimal digits.
pub fn parse_color_pair(digits: &str) -> Option<u8> {
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Letters ──────────────────────────────────────────────────────

    #[test]
    fn every_letter_maps_to_its_attr() {
        for attr in Attr::ALL {
            assert_eq!(Attr::from_letter(attr.letter()), Some(attr));
            assert_eq!(token_to_bit(attr.letter()), Some(AttributeMask::from_attr(attr)));
        }
    }

    #[test]
    fn unknown_and_lowercase_letters_are_not_attributes() {
        assert_eq!(token_to_bit('X'), None);
        assert_eq!(token_to_bit('b'), None);
        assert_eq!(token_to_bit('7'), None);
    }

    // ── Color pairs ──────────────────────────────────────────────────

    #[test]
    fn parse_one_and_two_digit_pairs() {
        assert_eq!(parse_color_pair("5"), Some(5));
        assert_eq!(parse_color_pair("07"), Some(7));
        assert_eq!(parse_color_pair("99"), Some(99));
    }

    #[test]
    fn parse_rejects_bad_pairs() {
        assert_eq!(parse_color_pair(""), None);
        assert_eq!(parse_color_pair("100"), None);
        assert_eq!(parse_color_pair("1a"), None);
        assert_eq!(parse_color_pair("-1"), None);
    }

    #[test]
    fn color_saturates() {
        assert_eq!(AttributeMask::color(250).color_pair(), MAX_COLOR_PAIR);
        assert_eq!(AttributeMask::NORMAL.with_color_pair(120).color_pair(), MAX_COLOR_PAIR);
    }

    // ── Algebra ──────────────────────────────────────────────────────

    #[test]
    fn union_sets_bits() {
        let m = AttributeMask::BOLD | AttributeMask::UNDERLINE;
        assert!(m.is_set(Attr::Bold));
        assert!(m.is_set(Attr::Underline));
        assert!(!m.is_set(Attr::Dim));
    }

    #[test]
    fn union_is_commutative_and_associative() {
        let a = AttributeMask::BOLD | AttributeMask::color(3);
        let b = AttributeMask::DIM | AttributeMask::color(12);
        let c = AttributeMask::REVERSE | AttributeMask::color(96);
        assert_eq!(a | b, b | a);
        assert_eq!((a | b) | c, a | (b | c));
    }

    #[test]
    fn difference_clears_bits() {
        let m = AttributeMask::BOLD | AttributeMask::REVERSE;
        let d = m - AttributeMask::BOLD;
        assert!(!d.is_set(Attr::Bold));
        assert!(d.is_set(Attr::Reverse));
    }

    #[test]
    fn difference_clears_only_matching_pair() {
        let m = AttributeMask::BOLD.with_color_pair(4);
        assert_eq!((m - AttributeMask::color(4)).color_pair(), 0);
        assert_eq!((m - AttributeMask::color(5)).color_pair(), 4);
    }

    #[test]
    fn normal_is_default() {
        assert_eq!(AttributeMask::default(), AttributeMask::NORMAL);
        assert!(AttributeMask::NORMAL.is_normal());
        assert!(!AttributeMask::color(1).is_normal());
    }

    #[test]
    fn or_assign_accumulates() {
        let mut m = AttributeMask::NORMAL;
        m |= AttributeMask::BLINK;
        m |= AttributeMask::STANDOUT;
        assert_eq!(m.attrs().collect::<Vec<_>>(), vec![Attr::Blink, Attr::Standout]);
    }

    // ── Display ──────────────────────────────────────────────────────

    #[test]
    fn display_uses_canonical_order() {
        let m = AttributeMask::UNDERLINE | AttributeMask::BOLD | AttributeMask::color(12);
        assert_eq!(m.to_string(), "BU12");
        assert_eq!(AttributeMask::NORMAL.to_string(), "");
    }
}
