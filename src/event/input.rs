//! Key input types wrapping crossterm for decoupling.
//!
//! Defines [`Key`], [`Modifiers`] and [`KeyEvent`], the key-code space that
//! binding tables and built-in widget handlers work in. Crossterm events are
//! converted via [`KeyEvent::from_crossterm`] so the rest of the toolkit never
//! depends on crossterm directly.

use std::ops::{BitAnd, BitOr};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub const fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    pub const fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// An unmodified character.
    pub const fn char(ch: char) -> Self {
        Self::plain(Key::Char(ch))
    }

    /// Ctrl plus a lowercase letter.
    pub const fn ctrl(ch: char) -> Self {
        Self::new(Key::Char(ch), Modifiers::CTRL)
    }

    /// The printable character carried by this event, if any.
    pub fn printable(self) -> Option<char> {
        match self.code {
            Key::Char(ch) if !ch.is_control() && !self.modifiers.contains(Modifiers::CTRL) => {
                Some(ch)
            }
            _ => None,
        }
    }

    /// Apply the default control-key mapping.
    ///
    /// Widgets run their built-in handling on the normalized key, so Ctrl-A
    /// behaves like Home everywhere unless a binding says otherwise.
    pub fn normalize(self) -> KeyEvent {
        let mapped = match (self.code, self.modifiers.contains(Modifiers::CTRL)) {
            (Key::Char('\r') | Key::Char('\n'), _) => Key::Enter,
            (Key::Char('\t'), _) => Key::Tab,
            (Key::Char('a'), true) => Key::Home,
            (Key::Char('e'), true) => Key::End,
            (Key::Char('b'), true) => Key::Left,
            (Key::Char('f'), true) => Key::Right,
            (Key::Char('n'), true) => Key::Tab,
            (Key::Char('p'), true) => Key::BackTab,
            (Key::Char('d'), true) => Key::Delete,
            (Key::Char('h'), true) => Key::Backspace,
            _ => return self,
        };
        KeyEvent::plain(mapped)
    }

    /// Convert a crossterm event. Releases, mouse, resize and paste events
    /// yield `None`.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<KeyEvent> {
        match event {
            crossterm::event::Event::Key(ke)
                if ke.kind != crossterm::event::KeyEventKind::Release =>
            {
                KeyEvent::try_from(ke).ok()
            }
            _ => None,
        }
    }
}

impl From<Key> for KeyEvent {
    fn from(code: Key) -> Self {
        KeyEvent::plain(code)
    }
}

// ---------------------------------------------------------------------------
// Named editing keys
// ---------------------------------------------------------------------------

/// Cut the field into the paste buffer.
pub const CUT: KeyEvent = KeyEvent::ctrl('x');
/// Copy the field into the paste buffer.
pub const COPY: KeyEvent = KeyEvent::ctrl('y');
/// Insert the paste buffer.
pub const PASTE: KeyEvent = KeyEvent::ctrl('v');
/// Clear the field.
pub const ERASE: KeyEvent = KeyEvent::ctrl('u');
/// Delete from the cursor to the end of the field.
pub const KILL: KeyEvent = KeyEvent::ctrl('k');
/// Swap the two characters before the cursor.
pub const TRANSPOSE: KeyEvent = KeyEvent::ctrl('t');
/// Redraw the screen.
pub const REFRESH: KeyEvent = KeyEvent::ctrl('l');

// ---------------------------------------------------------------------------
// crossterm conversion
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

/// Key codes outside the toolkit's key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedKey;

/// Shift is already folded into the character for `Char` keys and into
/// `BackTab`, so it is dropped there to keep bindings stable.
impl TryFrom<crossterm::event::KeyEvent> for KeyEvent {
    type Error = UnsupportedKey;

    fn try_from(ct: crossterm::event::KeyEvent) -> Result<Self, Self::Error> {
        use crossterm::event::KeyCode;

        let code = match ct.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => return Err(UnsupportedKey),
        };
        let mut modifiers = convert_modifiers(ct.modifiers);
        if matches!(code, Key::Char(_) | Key::BackTab) {
            modifiers = modifiers.without(Modifiers::SHIFT);
        }
        Ok(KeyEvent { code, modifiers })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ct_key(
        code: crossterm::event::KeyCode,
        mods: crossterm::event::KeyModifiers,
    ) -> crossterm::event::KeyEvent {
        crossterm::event::KeyEvent::new(code, mods)
    }

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifiers_none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert_eq!(mods & Modifiers::CTRL, Modifiers::CTRL);
    }

    // ── KeyEvent ─────────────────────────────────────────────────────

    #[test]
    fn constructors() {
        assert_eq!(KeyEvent::char('a'), KeyEvent::new(Key::Char('a'), Modifiers::NONE));
        assert_eq!(KeyEvent::ctrl('x'), CUT);
        assert_eq!(KeyEvent::from(Key::Enter), KeyEvent::plain(Key::Enter));
    }

    #[test]
    fn printable() {
        assert_eq!(KeyEvent::char('q').printable(), Some('q'));
        assert_eq!(KeyEvent::ctrl('q').printable(), None);
        assert_eq!(KeyEvent::char('\u{7}').printable(), None);
        assert_eq!(KeyEvent::plain(Key::Left).printable(), None);
    }

    // ── normalize ────────────────────────────────────────────────────

    #[test]
    fn normalize_control_keys() {
        for (input, expected) in [
            (KeyEvent::char('\r'), Key::Enter),
            (KeyEvent::char('\n'), Key::Enter),
            (KeyEvent::char('\t'), Key::Tab),
            (KeyEvent::ctrl('a'), Key::Home),
            (KeyEvent::ctrl('e'), Key::End),
            (KeyEvent::ctrl('b'), Key::Left),
            (KeyEvent::ctrl('f'), Key::Right),
            (KeyEvent::ctrl('n'), Key::Tab),
            (KeyEvent::ctrl('p'), Key::BackTab),
            (KeyEvent::ctrl('d'), Key::Delete),
            (KeyEvent::ctrl('h'), Key::Backspace),
        ] {
            assert_eq!(input.normalize(), KeyEvent::plain(expected), "{input:?}");
        }
    }

    #[test]
    fn normalize_leaves_other_keys() {
        assert_eq!(KeyEvent::char('a').normalize(), KeyEvent::char('a'));
        assert_eq!(PASTE.normalize(), PASTE);
        assert_eq!(KeyEvent::plain(Key::Up).normalize(), KeyEvent::plain(Key::Up));
    }

    // ── crossterm ────────────────────────────────────────────────────

    #[test]
    fn from_crossterm_char() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let ke = KeyEvent::try_from(ct_key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(ke, Ok(KeyEvent::char('x')));
    }

    #[test]
    fn from_crossterm_shift_is_folded() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let upper = KeyEvent::try_from(ct_key(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(upper, Ok(KeyEvent::char('A')));
        let back = KeyEvent::try_from(ct_key(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(back, Ok(KeyEvent::plain(Key::BackTab)));
    }

    #[test]
    fn from_crossterm_ctrl() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let ke = KeyEvent::try_from(ct_key(KeyCode::Char('v'), KeyModifiers::CONTROL));
        assert_eq!(ke, Ok(PASTE));
    }

    #[test]
    fn from_crossterm_navigation() {
        use crossterm::event::{KeyCode, KeyModifiers};
        for (ct_code, expected) in [
            (KeyCode::Home, Key::Home),
            (KeyCode::End, Key::End),
            (KeyCode::PageUp, Key::PageUp),
            (KeyCode::PageDown, Key::PageDown),
            (KeyCode::Delete, Key::Delete),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Esc, Key::Escape),
            (KeyCode::F(5), Key::F(5)),
        ] {
            let ke = KeyEvent::try_from(ct_key(ct_code, KeyModifiers::NONE));
            assert_eq!(ke, Ok(KeyEvent::plain(expected)));
        }
    }

    #[test]
    fn from_crossterm_unsupported() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let ke = KeyEvent::try_from(ct_key(KeyCode::CapsLock, KeyModifiers::NONE));
        assert_eq!(ke, Err(UnsupportedKey));
    }

    #[test]
    fn from_crossterm_event_filters() {
        use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
        let press = Event::Key(ct_key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(KeyEvent::from_crossterm(press), Some(KeyEvent::plain(Key::Enter)));

        let mut release = ct_key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(KeyEvent::from_crossterm(Event::Key(release)), None);

        assert_eq!(KeyEvent::from_crossterm(Event::Resize(80, 24)), None);
        assert_eq!(KeyEvent::from_crossterm(Event::FocusLost), None);
    }
}
