//! Input pipeline: bindings, hooks and the activation loop.
//!
//! [`Interactive`] wraps a widget with its [`BindingTable`], a
//! [`HandlerTable`] of bound callbacks, and optional pre- and post-process
//! hooks. Every key goes through [`Interactive::inject`]:
//!
//! 1. the exit type is reset to [`ExitType::EarlyExit`];
//! 2. the pre-process hook runs and may swallow the key;
//! 3. a bound key runs its action, and an invoked handler replaces built-in
//!    handling entirely;
//! 4. otherwise the widget's built-in handling runs on the normalized key;
//! 5. the post-process hook runs unless the exit type is terminal.
//!
//! [`Interactive::activate`] repeats this over keys read from a surface, or
//! over a scripted list, until the exit type is terminal.

use std::any::Any;

use tracing::{debug, trace, warn};

use crate::event::{Action, Binding, BindingTable, HandlerId, KeyEvent, UserData};
use crate::render::surface::{Surface, SurfaceError, WindowId};

use super::state::{ExitType, WidgetState};
use super::traits::{Bindable, Drawable, ScreenObject};

// ---------------------------------------------------------------------------
// InputContext / KeyOutcome
// ---------------------------------------------------------------------------

/// What built-in key handling may touch besides the widget itself.
#[derive(Debug)]
pub struct InputContext<'a> {
    /// Text shared by cut, copy and paste.
    pub paste_buffer: &'a mut String,
    bell: bool,
}

impl<'a> InputContext<'a> {
    pub fn new(paste_buffer: &'a mut String) -> Self {
        Self {
            paste_buffer,
            bell: false,
        }
    }

    /// Report a rejected key.
    pub fn bell(&mut self) {
        self.bell = true;
    }

    pub fn rang(&self) -> bool {
        self.bell
    }
}

/// Result of a widget's built-in handling of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<T> {
    /// Keep going.
    Continue,
    /// Exit normally with a value.
    Accept(T),
    /// Exit because the user cancelled.
    Escape,
}

// ---------------------------------------------------------------------------
// InjectResult
// ---------------------------------------------------------------------------

/// Outcome of one injected key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectResult<T> {
    pub exit_type: ExitType,
    /// Set only when `exit_type` is [`ExitType::Normal`].
    pub value: Option<T>,
    /// The key was rejected and the bell should ring.
    pub bell: bool,
}

impl<T> InjectResult<T> {
    pub fn new(exit_type: ExitType) -> Self {
        Self {
            exit_type,
            value: None,
            bell: false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.exit_type.is_terminal()
    }

    /// Drop the value, keeping exit type and bell.
    pub fn discard_value(self) -> InjectResult<()> {
        InjectResult {
            exit_type: self.exit_type,
            value: self.value.map(|_| ()),
            bell: self.bell,
        }
    }
}

// ---------------------------------------------------------------------------
// HandlerTable
// ---------------------------------------------------------------------------

/// Callback invoked by an [`Action::Invoke`] binding. Returning `false`
/// cancels the activation.
pub type Handler<W> = Box<dyn FnMut(&mut W, UserData, KeyEvent) -> bool>;

/// Runs before a key is dispatched; returning `false` swallows the key.
pub type PreProcess<W> = Box<dyn FnMut(&mut W, UserData, KeyEvent) -> bool>;

/// Runs after a non-terminal key; informational only.
pub type PostProcess<W> = Box<dyn FnMut(&mut W, UserData, KeyEvent)>;

/// Handlers addressed by [`HandlerId`].
pub struct HandlerTable<W> {
    handlers: Vec<Handler<W>>,
}

impl<W> HandlerTable<W> {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    pub fn register(&mut self, handler: impl FnMut(&mut W, UserData, KeyEvent) -> bool + 'static) -> HandlerId {
        self.handlers.push(Box::new(handler));
        HandlerId(self.handlers.len() - 1)
    }

    /// Call a handler. `None` if `id` was never registered here.
    pub fn call(&mut self, id: HandlerId, widget: &mut W, data: UserData, key: KeyEvent) -> Option<bool> {
        let handler = self.handlers.get_mut(id.0)?;
        Some(handler(widget, data, key))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<W> Default for HandlerTable<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> std::fmt::Debug for HandlerTable<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HandlerTable({} handlers)", self.handlers.len())
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

/// A widget plus its bindings, handlers and hooks.
pub struct Interactive<W: Bindable> {
    widget: W,
    bindings: BindingTable,
    handlers: HandlerTable<W>,
    pre_process: Option<(PreProcess<W>, UserData)>,
    post_process: Option<(PostProcess<W>, UserData)>,
    /// Used when the widget is driven outside a screen.
    paste_buffer: String,
}

impl<W: Bindable> Interactive<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            bindings: BindingTable::new(),
            handlers: HandlerTable::new(),
            pre_process: None,
            post_process: None,
            paste_buffer: String::new(),
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn into_inner(self) -> W {
        self.widget
    }

    pub fn exit_type(&self) -> ExitType {
        self.widget.state().exit_type
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerTable<W> {
        &mut self.handlers
    }

    pub fn paste_buffer(&self) -> &str {
        &self.paste_buffer
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Make `key` behave as if `target` had been read.
    pub fn bind_key(&mut self, key: KeyEvent, target: KeyEvent) {
        self.bindings.bind(key, Binding::pass_through(target));
    }

    /// Register `handler` and bind it to `key`.
    pub fn bind_handler(
        &mut self,
        key: KeyEvent,
        data: UserData,
        handler: impl FnMut(&mut W, UserData, KeyEvent) -> bool + 'static,
    ) -> HandlerId {
        let id = self.handlers.register(handler);
        self.bindings.bind(
            key,
            Binding {
                action: Action::Invoke(id),
                data,
            },
        );
        id
    }

    pub fn unbind(&mut self, key: KeyEvent) -> Option<Binding> {
        self.bindings.unbind(key)
    }

    pub fn set_pre_process(
        &mut self,
        data: UserData,
        hook: impl FnMut(&mut W, UserData, KeyEvent) -> bool + 'static,
    ) {
        self.pre_process = Some((Box::new(hook), data));
    }

    pub fn set_post_process(&mut self, data: UserData, hook: impl FnMut(&mut W, UserData, KeyEvent) + 'static) {
        self.post_process = Some((Box::new(hook), data));
    }

    pub fn clear_hooks(&mut self) {
        self.pre_process = None;
        self.post_process = None;
    }

    // ── Injection ────────────────────────────────────────────────────

    /// Run one key through the pipeline using this widget's own paste buffer.
    pub fn inject(&mut self, key: KeyEvent) -> InjectResult<W::Output> {
        let mut paste = std::mem::take(&mut self.paste_buffer);
        let result = self.inject_with(key, &mut paste);
        self.paste_buffer = paste;
        result
    }

    /// Run one key through the pipeline with a caller-owned paste buffer.
    pub fn inject_with(&mut self, key: KeyEvent, paste_buffer: &mut String) -> InjectResult<W::Output> {
        self.set_exit(ExitType::EarlyExit);

        if let Some((hook, data)) = self.pre_process.as_mut() {
            if !hook(&mut self.widget, *data, key) {
                trace!(widget = self.widget.widget_type(), ?key, "pre-process hook swallowed key");
                return InjectResult::new(ExitType::EarlyExit);
            }
        }

        let mut effective = key;
        let mut result = None;

        if let Some(binding) = self.bindings.resolve(&key).copied() {
            match binding.action {
                Action::PassThrough(target) => {
                    trace!(?key, ?target, "binding remapped key");
                    effective = target;
                }
                Action::Invoke(id) => match self.handlers.call(id, &mut self.widget, binding.data, key) {
                    Some(keep_going) => {
                        trace!(?key, handler = id.0, keep_going, "binding handler ran");
                        let exit = if keep_going {
                            ExitType::EarlyExit
                        } else {
                            ExitType::EscapeHit
                        };
                        result = Some(InjectResult::new(exit));
                    }
                    None => {
                        warn!(?key, handler = id.0, "binding refers to unknown handler; treating key as unbound");
                    }
                },
            }
        }

        let result = match result {
            Some(result) => result,
            None => self.builtin(effective.normalize(), paste_buffer),
        };
        self.set_exit(result.exit_type);

        if !result.is_terminal() {
            if let Some((hook, data)) = self.post_process.as_mut() {
                hook(&mut self.widget, *data, key);
            }
        }

        trace!(
            widget = self.widget.widget_type(),
            ?key,
            exit = %result.exit_type,
            bell = result.bell,
            "injected key"
        );
        result
    }

    fn builtin(&mut self, key: KeyEvent, paste_buffer: &mut String) -> InjectResult<W::Output> {
        let mut ctx = InputContext::new(paste_buffer);
        let outcome = self.widget.handle_key(key, &mut ctx);
        let bell = ctx.rang();
        let (exit_type, value) = match outcome {
            KeyOutcome::Continue => (ExitType::EarlyExit, None),
            KeyOutcome::Accept(value) => (ExitType::Normal, Some(value)),
            KeyOutcome::Escape => (ExitType::EscapeHit, None),
        };
        InjectResult { exit_type, value, bell }
    }

    fn set_exit(&mut self, exit_type: ExitType) {
        self.widget.state_mut().exit_type = exit_type;
    }
}

impl<W: Bindable + Drawable> Interactive<W> {
    /// Draw the widget, then feed it keys until it exits.
    ///
    /// With `actions`, the keys are replayed in order; running out of them
    /// without a terminal exit yields [`ExitType::EarlyExit`]. Without, keys
    /// are read from `surface` and bells are forwarded to it. A surface
    /// failure ends the loop with [`ExitType::Error`].
    pub fn activate(&mut self, surface: &mut dyn Surface, actions: Option<&[KeyEvent]>) -> InjectResult<W::Output> {
        let mut paste = std::mem::take(&mut self.paste_buffer);
        let result = self.activate_with(surface, actions, &mut paste, true);
        self.paste_buffer = paste;
        result
    }

    pub(crate) fn activate_with(
        &mut self,
        surface: &mut dyn Surface,
        actions: Option<&[KeyEvent]>,
        paste_buffer: &mut String,
        ring: bool,
    ) -> InjectResult<W::Output> {
        debug!(widget = self.widget.widget_type(), scripted = actions.is_some(), "activating");
        if let Err(err) = self.redraw(surface) {
            return self.fail(err);
        }

        let result = match actions {
            Some(keys) => self.replay(surface, keys, paste_buffer, ring),
            None => self.read_loop(surface, paste_buffer, ring),
        };
        debug!(widget = self.widget.widget_type(), exit = %result.exit_type, "activation finished");
        result
    }

    fn replay(
        &mut self,
        surface: &mut dyn Surface,
        keys: &[KeyEvent],
        paste_buffer: &mut String,
        ring: bool,
    ) -> InjectResult<W::Output> {
        for key in keys {
            let result = self.step(surface, *key, paste_buffer, ring);
            if result.is_terminal() {
                return result;
            }
        }
        self.set_exit(ExitType::EarlyExit);
        InjectResult::new(ExitType::EarlyExit)
    }

    fn read_loop(&mut self, surface: &mut dyn Surface, paste_buffer: &mut String, ring: bool) -> InjectResult<W::Output> {
        loop {
            let key = match surface.read_key(self.widget.window()) {
                Ok(key) => key,
                Err(err) => return self.fail(err),
            };
            let result = self.step(surface, key, paste_buffer, ring);
            if result.is_terminal() {
                return result;
            }
        }
    }

    fn step(
        &mut self,
        surface: &mut dyn Surface,
        key: KeyEvent,
        paste_buffer: &mut String,
        ring: bool,
    ) -> InjectResult<W::Output> {
        let result = self.inject_with(key, paste_buffer);
        if result.bell && ring {
            surface.beep();
        }
        match self.redraw(surface) {
            Ok(()) => result,
            Err(err) => self.fail(err),
        }
    }

    fn redraw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        self.widget.draw(surface)?;
        surface.refresh()
    }

    fn fail(&mut self, err: SurfaceError) -> InjectResult<W::Output> {
        warn!(widget = self.widget.widget_type(), %err, "activation stopped");
        self.set_exit(ExitType::Error);
        InjectResult::new(ExitType::Error)
    }
}

impl<W: Bindable + std::fmt::Debug> std::fmt::Debug for Interactive<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interactive")
            .field("widget", &self.widget)
            .field("bindings", &self.bindings.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Trait plumbing
// ---------------------------------------------------------------------------

impl<W: Bindable + Drawable> Drawable for Interactive<W> {
    fn draw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        self.widget.draw(surface)
    }

    fn window(&self) -> WindowId {
        self.widget.window()
    }

    fn windows(&self) -> Vec<WindowId> {
        self.widget.windows()
    }

    fn move_by(&mut self, surface: &mut dyn Surface, delta: crate::geometry::Offset) -> Result<(), SurfaceError> {
        self.widget.move_by(surface, delta)
    }

    fn destroy(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        self.widget.destroy(surface)
    }
}

impl<W> ScreenObject for Interactive<W>
where
    W: Bindable + Drawable + 'static,
{
    fn widget_type(&self) -> &'static str {
        self.widget.widget_type()
    }

    fn state(&self) -> &WidgetState {
        self.widget.state()
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        self.widget.state_mut()
    }

    fn accepts_focus(&self) -> bool {
        self.widget.accepts_focus()
    }

    fn inject_key(&mut self, key: KeyEvent, paste_buffer: &mut String) -> InjectResult<()> {
        self.inject_with(key, paste_buffer).discard_value()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::event::{Key, PASTE};
    use crate::geometry::{Region, Size};
    use crate::markup::Cell;
    use crate::render::draw_cells;
    use crate::testing::{keys, HeadlessSurface};

    // -----------------------------------------------------------------------
    // Test widget
    // -----------------------------------------------------------------------

    /// Collects printable keys; Enter accepts, Escape cancels, Backspace on
    /// an empty buffer bells.
    #[derive(Debug)]
    struct Recorder {
        state: WidgetState,
        text: String,
        seen: Vec<KeyEvent>,
        win: Option<WindowId>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                state: WidgetState::default(),
                text: String::new(),
                seen: Vec::new(),
                win: None,
            }
        }

        fn on(surface: &mut dyn Surface) -> Self {
            let mut r = Self::new();
            r.win = Some(surface.create_window(Region::new(0, 0, 10, 1)).unwrap());
            r
        }
    }

    impl Bindable for Recorder {
        type Output = String;

        fn widget_type(&self) -> &'static str {
            "Recorder"
        }

        fn state(&self) -> &WidgetState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut WidgetState {
            &mut self.state
        }

        fn handle_key(&mut self, key: KeyEvent, ctx: &mut InputContext<'_>) -> KeyOutcome<String> {
            self.seen.push(key);
            match key.code {
                Key::Enter => KeyOutcome::Accept(self.text.clone()),
                Key::Escape => KeyOutcome::Escape,
                Key::Backspace => {
                    if self.text.pop().is_none() {
                        ctx.bell();
                    }
                    KeyOutcome::Continue
                }
                _ if key == PASTE => {
                    self.text.push_str(ctx.paste_buffer);
                    KeyOutcome::Continue
                }
                _ => {
                    if let Some(ch) = key.printable() {
                        self.text.push(ch);
                    }
                    KeyOutcome::Continue
                }
            }
        }
    }

    impl Drawable for Recorder {
        fn draw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
            let win = self.window();
            surface.clear_window(win)?;
            let cells: Vec<Cell> = self.text.chars().map(Cell::plain).collect();
            draw_cells(surface, win, 0, 0, &cells, 10)?;
            Ok(())
        }

        fn window(&self) -> WindowId {
            self.win.unwrap_or_default()
        }
    }

    // -----------------------------------------------------------------------
    // Built-in dispatch
    // -----------------------------------------------------------------------

    #[test]
    fn fresh_widget_never_activated() {
        let w = Interactive::new(Recorder::new());
        assert_eq!(w.exit_type(), ExitType::NeverActivated);
    }

    #[test]
    fn plain_key_is_early_exit() {
        let mut w = Interactive::new(Recorder::new());
        let r = w.inject(KeyEvent::char('a'));
        assert_eq!(r, InjectResult::new(ExitType::EarlyExit));
        assert_eq!(w.widget().text, "a");
        assert_eq!(w.exit_type(), ExitType::EarlyExit);
    }

    #[test]
    fn enter_accepts_with_value() {
        let mut w = Interactive::new(Recorder::new());
        let _ = w.inject(KeyEvent::char('h'));
        let r = w.inject(KeyEvent::plain(Key::Enter));
        assert_eq!(r.exit_type, ExitType::Normal);
        assert_eq!(r.value.as_deref(), Some("h"));
    }

    #[test]
    fn escape_cancels() {
        let mut w = Interactive::new(Recorder::new());
        let r = w.inject(KeyEvent::plain(Key::Escape));
        assert_eq!(r.exit_type, ExitType::EscapeHit);
        assert_eq!(r.value, None);
    }

    #[test]
    fn bell_is_reported() {
        let mut w = Interactive::new(Recorder::new());
        assert!(w.inject(KeyEvent::plain(Key::Backspace)).bell);
    }

    #[test]
    fn builtin_sees_normalized_key() {
        let mut w = Interactive::new(Recorder::new());
        let _ = w.inject(KeyEvent::char('\r'));
        assert_eq!(w.widget().seen, vec![KeyEvent::plain(Key::Enter)]);
        assert_eq!(w.exit_type(), ExitType::Normal);
    }

    // -----------------------------------------------------------------------
    // Bindings
    // -----------------------------------------------------------------------

    #[test]
    fn bound_handler_replaces_builtin() {
        let mut w = Interactive::new(Recorder::new());
        w.bind_handler(KeyEvent::plain(Key::Enter), None, |r, _, _| {
            r.text.push('!');
            true
        });
        let r = w.inject(KeyEvent::plain(Key::Enter));
        assert_eq!(r.exit_type, ExitType::EarlyExit);
        assert_eq!(w.widget().text, "!");
        assert!(w.widget().seen.is_empty());
    }

    #[test]
    fn handler_returning_false_cancels() {
        let mut w = Interactive::new(Recorder::new());
        w.bind_handler(KeyEvent::char('q'), None, |_, _, _| false);
        assert_eq!(w.inject(KeyEvent::char('q')).exit_type, ExitType::EscapeHit);
    }

    #[test]
    fn handler_receives_user_data() {
        let mut w = Interactive::new(Recorder::new());
        let got = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&got);
        w.bind_handler(KeyEvent::char('x'), Some(42), move |_, data, key| {
            *sink.borrow_mut() = Some((data, key));
            true
        });
        let _ = w.inject(KeyEvent::char('x'));
        assert_eq!(*got.borrow(), Some((Some(42), KeyEvent::char('x'))));
    }

    #[test]
    fn pass_through_remaps_key() {
        let mut w = Interactive::new(Recorder::new());
        w.bind_key(KeyEvent::char('y'), KeyEvent::plain(Key::Enter));
        let r = w.inject(KeyEvent::char('y'));
        assert_eq!(r.exit_type, ExitType::Normal);
        assert_eq!(w.widget().seen, vec![KeyEvent::plain(Key::Enter)]);
    }

    #[test]
    fn unknown_handler_falls_through() {
        let mut w = Interactive::new(Recorder::new());
        w.bindings_mut().bind(KeyEvent::char('z'), Binding::invoke(HandlerId(7)));
        let _ = w.inject(KeyEvent::char('z'));
        assert_eq!(w.widget().text, "z");
    }

    #[test]
    fn unbind_restores_builtin() {
        let mut w = Interactive::new(Recorder::new());
        w.bind_handler(KeyEvent::char('a'), None, |_, _, _| true);
        assert!(w.unbind(KeyEvent::char('a')).is_some());
        let _ = w.inject(KeyEvent::char('a'));
        assert_eq!(w.widget().text, "a");
    }

    // -----------------------------------------------------------------------
    // Hooks
    // -----------------------------------------------------------------------

    #[test]
    fn pre_process_can_swallow() {
        let mut w = Interactive::new(Recorder::new());
        w.set_pre_process(None, |_, _, key| key != KeyEvent::char('n'));
        let r = w.inject(KeyEvent::char('n'));
        assert_eq!(r.exit_type, ExitType::EarlyExit);
        assert!(w.widget().seen.is_empty());
        let _ = w.inject(KeyEvent::char('m'));
        assert_eq!(w.widget().text, "m");
    }

    #[test]
    fn pre_process_runs_before_bindings() {
        let mut w = Interactive::new(Recorder::new());
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        w.bind_handler(KeyEvent::char('k'), None, move |_, _, _| {
            *counter.borrow_mut() += 1;
            true
        });
        w.set_pre_process(None, |_, _, _| false);
        let _ = w.inject(KeyEvent::char('k'));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn post_process_skipped_on_terminal_exit() {
        let mut w = Interactive::new(Recorder::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        w.set_post_process(Some(5), move |_, data, key| sink.borrow_mut().push((data, key)));
        let _ = w.inject(KeyEvent::char('a'));
        let _ = w.inject(KeyEvent::plain(Key::Escape));
        assert_eq!(*log.borrow(), vec![(Some(5), KeyEvent::char('a'))]);
    }

    #[test]
    fn paste_buffer_is_shared_with_builtin() {
        let mut w = Interactive::new(Recorder::new());
        let mut buffer = String::from("xyz");
        let _ = w.inject_with(PASTE, &mut buffer);
        assert_eq!(w.widget().text, "xyz");
    }

    // -----------------------------------------------------------------------
    // Activation
    // -----------------------------------------------------------------------

    #[test]
    fn activate_with_actions_until_normal() {
        let mut s = HeadlessSurface::new(Size::new(20, 3));
        let mut w = Interactive::new(Recorder::on(&mut s));
        let actions = [KeyEvent::char('o'), KeyEvent::char('k'), KeyEvent::plain(Key::Enter), KeyEvent::char('z')];
        let r = w.activate(&mut s, Some(&actions[..]));
        assert_eq!(r.exit_type, ExitType::Normal);
        assert_eq!(r.value.as_deref(), Some("ok"));
        assert_eq!(s.render_to_string(), "ok");
    }

    #[test]
    fn activate_runs_out_of_actions() {
        let mut s = HeadlessSurface::new(Size::new(20, 3));
        let mut w = Interactive::new(Recorder::on(&mut s));
        let r = w.activate(&mut s, Some(&[KeyEvent::char('a')][..]));
        assert_eq!(r.exit_type, ExitType::EarlyExit);
        assert_eq!(w.exit_type(), ExitType::EarlyExit);
    }

    #[test]
    fn activate_reads_surface_and_rings_bell() {
        let mut s = HeadlessSurface::new(Size::new(20, 3))
            .with_keys(keys([Key::Backspace, Key::Escape]));
        let mut w = Interactive::new(Recorder::on(&mut s));
        let r = w.activate(&mut s, None);
        assert_eq!(r.exit_type, ExitType::EscapeHit);
        assert_eq!(s.bells(), 1);
        assert_eq!(s.pending_keys(), 0);
    }

    #[test]
    fn closed_input_is_error() {
        let mut s = HeadlessSurface::new(Size::new(20, 3));
        s.type_text("ab");
        let mut w = Interactive::new(Recorder::on(&mut s));
        let r = w.activate(&mut s, None);
        assert_eq!(r.exit_type, ExitType::Error);
        assert_eq!(w.widget().text, "ab");
    }

    #[test]
    fn screen_object_downcast() {
        let w = Interactive::new(Recorder::new());
        let obj: &dyn ScreenObject = &w;
        assert_eq!(obj.widget_type(), "Recorder");
        assert!(obj.as_any().downcast_ref::<Interactive<Recorder>>().is_some());
    }
}
