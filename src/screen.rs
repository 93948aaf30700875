//! Screens: widget registry, focus traversal and paint order.
//!
//! [`ScreenRegistry`] is the bookkeeping: stable ids, traversal order, z-order
//! and the single focused entry. [`Screen`] owns a registry of boxed
//! [`ScreenObject`]s together with the paste buffer shared by its widgets, and
//! drives keyboard traversal across them.

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace, warn};

use crate::event::{Key, KeyEvent, REFRESH};
use crate::render::surface::{Result, Surface};
use crate::widget::{ExitType, ScreenObject};

new_key_type! {
    /// Identifies a registered widget. Stays valid until the widget is
    /// removed.
    pub struct ObjectId;
}

// ---------------------------------------------------------------------------
// ScreenRegistry
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Entry<T> {
    item: T,
    visible: bool,
    focusable: bool,
}

impl<T> Entry<T> {
    fn traversable(&self) -> bool {
        self.visible && self.focusable
    }
}

/// Ordered collection of widgets with one focus.
///
/// Traversal order is registration order. Paint order is kept separately and
/// changed by [`raise`](Self::raise) and [`lower`](Self::lower).
#[derive(Debug)]
pub struct ScreenRegistry<T> {
    entries: SlotMap<ObjectId, Entry<T>>,
    traversal: Vec<ObjectId>,
    /// Bottom to top.
    z_order: Vec<ObjectId>,
    focus: Option<ObjectId>,
    wrap: bool,
}

impl<T> ScreenRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            traversal: Vec::new(),
            z_order: Vec::new(),
            focus: None,
            wrap: true,
        }
    }

    /// Whether `focus_next` past the last entry returns to the first.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    // ── Membership ───────────────────────────────────────────────────

    /// Add an entry at the end of traversal order and on top of paint order.
    pub fn register(&mut self, item: T, focusable: bool) -> ObjectId {
        let id = self.entries.insert(Entry {
            item,
            visible: true,
            focusable,
        });
        self.traversal.push(id);
        self.z_order.push(id);
        debug!(?id, focusable, count = self.entries.len(), "registered widget");
        id
    }

    /// Remove an entry. If it had focus, focus moves to the next traversable
    /// entry after it, wrapping around, or to none.
    pub fn unregister(&mut self, id: ObjectId) -> Option<T> {
        if !self.entries.contains_key(id) {
            return None;
        }
        if self.focus == Some(id) {
            self.transfer_focus(id);
        }
        self.traversal.retain(|&other| other != id);
        self.z_order.retain(|&other| other != id);
        let entry = self.entries.remove(id)?;
        debug!(?id, focus = ?self.focus, "unregistered widget");
        Some(entry.item)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.entries.get(id).map(|e| &e.item)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.entries.get_mut(id).map(|e| &mut e.item)
    }

    /// Entries in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.traversal
            .iter()
            .filter_map(|&id| self.entries.get(id).map(|e| (id, &e.item)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut T)> {
        self.entries.iter_mut().map(|(id, e)| (id, &mut e.item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn traversal_order(&self) -> &[ObjectId] {
        &self.traversal
    }

    // ── Visibility ───────────────────────────────────────────────────

    pub fn is_visible(&self, id: ObjectId) -> bool {
        self.entries.get(id).is_some_and(|e| e.visible)
    }

    /// Show or hide an entry. Hiding the focused entry moves focus on as
    /// [`unregister`](Self::unregister) does.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        entry.visible = visible;
        if !visible && self.focus == Some(id) {
            self.transfer_focus(id);
        }
        true
    }

    pub fn set_focusable(&mut self, id: ObjectId, focusable: bool) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        entry.focusable = focusable;
        if !focusable && self.focus == Some(id) {
            self.transfer_focus(id);
        }
        true
    }

    pub fn is_traversable(&self, id: ObjectId) -> bool {
        self.entries.get(id).is_some_and(Entry::traversable)
    }

    // ── Focus ────────────────────────────────────────────────────────

    pub fn focused(&self) -> Option<ObjectId> {
        self.focus
    }

    /// Focus a traversable entry. Returns `false` otherwise.
    pub fn focus(&mut self, id: ObjectId) -> bool {
        if !self.is_traversable(id) {
            return false;
        }
        self.focus = Some(id);
        trace!(?id, "focus set");
        true
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// Move focus forward. With nothing focused, the first traversable entry
    /// gets it. Without wrapping, focus stays on the last entry.
    pub fn focus_next(&mut self) -> Option<ObjectId> {
        let order: Vec<ObjectId> = self.traversal.clone();
        self.step_focus(&order)
    }

    /// Move focus backward. With nothing focused, the last traversable entry
    /// gets it.
    pub fn focus_previous(&mut self) -> Option<ObjectId> {
        let order: Vec<ObjectId> = self.traversal.iter().rev().copied().collect();
        self.step_focus(&order)
    }

    /// Whether no traversable entry follows `id`.
    pub fn is_last_traversable(&self, id: ObjectId) -> bool {
        let Some(pos) = self.traversal.iter().position(|&other| other == id) else {
            return false;
        };
        !self.traversal[pos + 1..].iter().any(|&other| self.is_traversable(other))
    }

    fn step_focus(&mut self, order: &[ObjectId]) -> Option<ObjectId> {
        let start = self
            .focus
            .and_then(|id| order.iter().position(|&other| other == id))
            .map_or(0, |pos| pos + 1)
            .min(order.len());

        let (before, after) = order.split_at(start);
        let found = if self.wrap {
            after.iter().chain(before).find(|&&id| self.is_traversable(id))
        } else {
            after.iter().find(|&&id| self.is_traversable(id))
        };

        if let Some(&id) = found {
            self.focus = Some(id);
            trace!(?id, "focus moved");
        }
        self.focus
    }

    fn transfer_focus(&mut self, from: ObjectId) {
        let Some(pos) = self.traversal.iter().position(|&other| other == from) else {
            self.focus = None;
            return;
        };
        let (before, rest) = self.traversal.split_at(pos);
        let next = rest[1..]
            .iter()
            .chain(before.iter())
            .copied()
            .find(|&id| self.is_traversable(id));
        debug!(from = ?from, to = ?next, "focus transferred");
        self.focus = next;
    }

    // ── Paint order ──────────────────────────────────────────────────

    /// Bottom to top.
    pub fn paint_order(&self) -> &[ObjectId] {
        &self.z_order
    }

    pub fn raise(&mut self, id: ObjectId) -> bool {
        let Some(pos) = self.z_order.iter().position(|&other| other == id) else {
            return false;
        };
        self.z_order.remove(pos);
        self.z_order.push(id);
        debug!(?id, "raised widget");
        true
    }

    pub fn lower(&mut self, id: ObjectId) -> bool {
        let Some(pos) = self.z_order.iter().position(|&other| other == id) else {
            return false;
        };
        self.z_order.remove(pos);
        self.z_order.insert(0, id);
        debug!(?id, "lowered widget");
        true
    }
}

impl<T> Default for ScreenRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// ScreenConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Forward rejected keys to [`Surface::beep`].
    pub bell: bool,
    /// Tab past the last widget returns to the first.
    pub wrap_focus: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            bell: true,
            wrap_focus: true,
        }
    }
}

impl ScreenConfig {
    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    pub fn with_wrap_focus(mut self, wrap: bool) -> Self {
        self.wrap_focus = wrap;
        self
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// The widgets of one container and the paste buffer they share.
pub struct Screen {
    registry: ScreenRegistry<Box<dyn ScreenObject>>,
    paste_buffer: String,
    config: ScreenConfig,
}

impl Screen {
    pub fn new() -> Self {
        Self::with_config(ScreenConfig::default())
    }

    pub fn with_config(config: ScreenConfig) -> Self {
        Self {
            registry: ScreenRegistry::new().with_wrap(config.wrap_focus),
            paste_buffer: String::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn registry(&self) -> &ScreenRegistry<Box<dyn ScreenObject>> {
        &self.registry
    }

    pub fn paste_buffer(&self) -> &str {
        &self.paste_buffer
    }

    pub fn set_paste_buffer(&mut self, text: impl Into<String>) {
        self.paste_buffer = text.into();
    }

    // ── Membership ───────────────────────────────────────────────────

    pub fn add<W: ScreenObject + 'static>(&mut self, widget: W) -> ObjectId {
        let focusable = widget.accepts_focus();
        let visible = widget.state().is_visible;
        let id = self.registry.register(Box::new(widget), focusable);
        self.registry.set_visible(id, visible);
        id
    }

    /// Destroy a widget's windows and unregister it. A widget whose windows
    /// fail to destroy stays registered.
    pub fn remove(&mut self, surface: &mut dyn Surface, id: ObjectId) -> Result<bool> {
        let Some(widget) = self.registry.get_mut(id) else {
            return Ok(false);
        };
        if let Err(err) = widget.destroy(surface) {
            warn!(?id, %err, "failed to destroy widget windows");
            return Err(err);
        }
        self.registry.unregister(id);
        self.sync_focus_flags();
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> Option<&dyn ScreenObject> {
        self.registry.get(id).map(|w| w.as_ref())
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut (dyn ScreenObject + 'static)> {
        self.registry.get_mut(id).map(|w| w.as_mut())
    }

    /// Borrow a widget as its concrete type.
    pub fn get<W: ScreenObject + 'static>(&self, id: ObjectId) -> Option<&W> {
        self.registry.get(id)?.as_any().downcast_ref::<W>()
    }

    pub fn get_mut<W: ScreenObject + 'static>(&mut self, id: ObjectId) -> Option<&mut W> {
        self.registry.get_mut(id)?.as_any_mut().downcast_mut::<W>()
    }

    // ── Focus and visibility ─────────────────────────────────────────

    pub fn focused(&self) -> Option<ObjectId> {
        self.registry.focused()
    }

    pub fn focus(&mut self, id: ObjectId) -> bool {
        let ok = self.registry.focus(id);
        self.sync_focus_flags();
        ok
    }

    /// Show or hide a widget. A hidden widget's windows are blanked and it
    /// is skipped by drawing and traversal.
    pub fn set_visible(&mut self, surface: &mut dyn Surface, id: ObjectId, visible: bool) -> Result<bool> {
        if !self.registry.set_visible(id, visible) {
            return Ok(false);
        }
        if let Some(widget) = self.registry.get_mut(id) {
            widget.state_mut().is_visible = visible;
            if !visible {
                widget.erase(surface)?;
            }
        }
        self.sync_focus_flags();
        Ok(true)
    }

    fn sync_focus_flags(&mut self) {
        let focus = self.registry.focused();
        for (id, widget) in self.registry.iter_mut() {
            widget.state_mut().has_focus = Some(id) == focus;
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Draw every visible widget, bottom to top.
    pub fn draw_all(&self, surface: &mut dyn Surface) -> Result<()> {
        for &id in self.registry.paint_order() {
            if !self.registry.is_visible(id) {
                continue;
            }
            if let Some(widget) = self.registry.get(id) {
                widget.draw(surface)?;
            }
        }
        Ok(())
    }

    pub fn erase_all(&self, surface: &mut dyn Surface) -> Result<()> {
        for (_, widget) in self.registry.iter() {
            widget.erase(surface)?;
        }
        Ok(())
    }

    /// Draw everything and push it to the terminal.
    pub fn refresh(&self, surface: &mut dyn Surface) -> Result<()> {
        self.draw_all(surface)?;
        surface.refresh()
    }

    /// Put every window of a widget on top, keeping their relative order.
    pub fn raise(&mut self, surface: &mut dyn Surface, id: ObjectId) -> Result<bool> {
        let Some(widget) = self.registry.get(id) else {
            return Ok(false);
        };
        for win in widget.windows() {
            surface.raise_window(win)?;
        }
        Ok(self.registry.raise(id))
    }

    /// Put every window of a widget at the bottom, keeping their relative
    /// order.
    pub fn lower(&mut self, surface: &mut dyn Surface, id: ObjectId) -> Result<bool> {
        let Some(widget) = self.registry.get(id) else {
            return Ok(false);
        };
        for win in widget.windows().into_iter().rev() {
            surface.lower_window(win)?;
        }
        Ok(self.registry.lower(id))
    }

    // ── Traversal ────────────────────────────────────────────────────

    /// Feed keys to the focused widget until the user leaves the screen.
    ///
    /// Tab and BackTab move focus, Escape ends with
    /// [`ExitType::EscapeHit`], Ctrl-L redraws, and everything else goes to
    /// the focused widget. A widget exiting normally passes focus on; when
    /// the last traversable widget does, traversal ends with
    /// [`ExitType::Normal`]. Returns [`ExitType::NeverActivated`] when no
    /// widget can take focus.
    pub fn traverse(&mut self, surface: &mut dyn Surface) -> ExitType {
        if self.registry.focused().is_none() && self.registry.focus_next().is_none() {
            debug!("no focusable widget; traversal skipped");
            return ExitType::NeverActivated;
        }
        self.sync_focus_flags();
        debug!(widgets = self.registry.len(), "traversal started");

        let exit = self.traverse_loop(surface);
        debug!(exit = %exit, "traversal finished");
        exit
    }

    fn traverse_loop(&mut self, surface: &mut dyn Surface) -> ExitType {
        if let Err(err) = self.refresh(surface) {
            warn!(%err, "could not draw screen");
            return ExitType::Error;
        }

        loop {
            let Some(id) = self.registry.focused() else {
                return ExitType::NeverActivated;
            };
            let Some(win) = self.registry.get(id).map(|w| w.window()) else {
                return ExitType::Error;
            };
            let key = match surface.read_key(win) {
                Ok(key) => key,
                Err(err) => {
                    warn!(%err, "could not read key");
                    return ExitType::Error;
                }
            };

            if let Some(exit) = self.dispatch(surface, id, key) {
                if let Err(err) = self.refresh(surface) {
                    warn!(%err, "could not draw screen");
                    return ExitType::Error;
                }
                return exit;
            }

            if let Err(err) = self.refresh(surface) {
                warn!(%err, "could not draw screen");
                return ExitType::Error;
            }
        }
    }

    /// Handle one key. `Some` ends traversal.
    fn dispatch(&mut self, surface: &mut dyn Surface, id: ObjectId, key: KeyEvent) -> Option<ExitType> {
        match key.normalize().code {
            Key::Tab => {
                self.registry.focus_next();
                self.sync_focus_flags();
                return None;
            }
            Key::BackTab => {
                self.registry.focus_previous();
                self.sync_focus_flags();
                return None;
            }
            Key::Escape => return Some(ExitType::EscapeHit),
            _ if key == REFRESH => return None,
            _ => {}
        }

        let widget = self.registry.get_mut(id)?;
        let result = widget.inject_key(key, &mut self.paste_buffer);
        if result.bell && self.config.bell {
            surface.beep();
        }

        match result.exit_type {
            ExitType::Normal => {
                if self.registry.is_last_traversable(id) {
                    return Some(ExitType::Normal);
                }
                self.registry.focus_next();
                self.sync_focus_flags();
                None
            }
            ExitType::EscapeHit => Some(ExitType::EscapeHit),
            ExitType::Error => Some(ExitType::Error),
            ExitType::EarlyExit | ExitType::NeverActivated => None,
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("widgets", &self.registry.len())
            .field("focus", &self.registry.focused())
            .field("config", &self.config)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
