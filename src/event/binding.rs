//! Per-widget key binding table.
//!
//! [`BindingTable`] maps a [`KeyEvent`] to a [`Binding`]: an [`Action`] plus
//! optional user data. Keys without a binding fall through to the widget's
//! built-in handling.

use std::collections::HashMap;

use super::input::KeyEvent;

/// Opaque value handed back to a binding handler or hook.
pub type UserData = Option<i64>;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Index into a widget's handler table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub usize);

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Treat the key as if `KeyEvent` had been read instead.
    PassThrough(KeyEvent),
    /// Call a registered handler; built-in handling is skipped.
    Invoke(HandlerId),
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub action: Action,
    pub data: UserData,
}

impl Binding {
    pub fn pass_through(key: KeyEvent) -> Self {
        Self {
            action: Action::PassThrough(key),
            data: None,
        }
    }

    pub fn invoke(handler: HandlerId) -> Self {
        Self {
            action: Action::Invoke(handler),
            data: None,
        }
    }

    /// Attach user data passed to the handler on every call.
    pub fn with_data(mut self, data: i64) -> Self {
        self.data = Some(data);
        self
    }
}

// ---------------------------------------------------------------------------
// BindingTable
// ---------------------------------------------------------------------------

/// Key bindings for one widget.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: HashMap<KeyEvent, Binding>,
}

impl BindingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding, replacing any existing one for `key`.
    pub fn bind(&mut self, key: KeyEvent, binding: Binding) {
        self.bindings.insert(key, binding);
    }

    /// Remove a binding, returning it if it existed.
    pub fn unbind(&mut self, key: KeyEvent) -> Option<Binding> {
        self.bindings.remove(&key)
    }

    /// Look up the binding for a key. Keys are matched exactly, modifiers
    /// included, and before any control-key normalization.
    pub fn resolve(&self, key: &KeyEvent) -> Option<&Binding> {
        self.bindings.get(key)
    }

    pub fn is_bound(&self, key: &KeyEvent) -> bool {
        self.bindings.contains_key(key)
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::{Key, Modifiers};

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_table_is_empty() {
        let table = BindingTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    // ── Bind / Unbind ────────────────────────────────────────────────

    #[test]
    fn bind_and_resolve() {
        let mut table = BindingTable::new();
        table.bind(KeyEvent::char('q'), Binding::invoke(HandlerId(0)));

        let binding = table.resolve(&KeyEvent::char('q'));
        assert_eq!(binding.map(|b| b.action), Some(Action::Invoke(HandlerId(0))));
        assert!(table.is_bound(&KeyEvent::char('q')));
    }

    #[test]
    fn resolve_no_match() {
        let table = BindingTable::new();
        assert!(table.resolve(&KeyEvent::char('q')).is_none());
    }

    #[test]
    fn resolve_respects_modifiers() {
        let mut table = BindingTable::new();
        table.bind(KeyEvent::ctrl('q'), Binding::invoke(HandlerId(1)));

        assert!(table.resolve(&KeyEvent::char('q')).is_none());
        assert!(table.resolve(&KeyEvent::new(Key::Char('q'), Modifiers::CTRL)).is_some());
    }

    #[test]
    fn resolve_matches_before_normalization() {
        // Ctrl-A normalizes to Home, but a binding on Ctrl-A still wins.
        let mut table = BindingTable::new();
        table.bind(KeyEvent::ctrl('a'), Binding::invoke(HandlerId(2)));
        assert!(table.resolve(&KeyEvent::ctrl('a')).is_some());
        assert!(table.resolve(&KeyEvent::plain(Key::Home)).is_none());
    }

    #[test]
    fn unbind_removes_binding() {
        let mut table = BindingTable::new();
        table.bind(KeyEvent::char('q'), Binding::pass_through(KeyEvent::plain(Key::Enter)));
        assert_eq!(table.len(), 1);

        let removed = table.unbind(KeyEvent::char('q'));
        assert!(removed.is_some());
        assert!(table.is_empty());
        assert!(table.unbind(KeyEvent::char('q')).is_none());
    }

    #[test]
    fn bind_overwrites_existing() {
        let mut table = BindingTable::new();
        table.bind(KeyEvent::char('q'), Binding::invoke(HandlerId(0)).with_data(1));
        table.bind(KeyEvent::char('q'), Binding::invoke(HandlerId(0)).with_data(2));
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve(&KeyEvent::char('q')).and_then(|b| b.data), Some(2));
    }

    #[test]
    fn clear_drops_everything() {
        let mut table = BindingTable::new();
        table.bind(KeyEvent::char('a'), Binding::invoke(HandlerId(0)));
        table.bind(KeyEvent::char('b'), Binding::invoke(HandlerId(1)));
        table.clear();
        assert!(table.is_empty());
    }

    // ── Binding ──────────────────────────────────────────────────────

    #[test]
    fn pass_through_carries_target() {
        let b = Binding::pass_through(KeyEvent::plain(Key::Tab));
        assert_eq!(b.action, Action::PassThrough(KeyEvent::plain(Key::Tab)));
        assert_eq!(b.data, None);
    }
}
