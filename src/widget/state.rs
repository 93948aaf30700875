//! Per-widget state shared by every interactive widget.

use std::fmt;

// ---------------------------------------------------------------------------
// ExitType
// ---------------------------------------------------------------------------

/// How the widget's last input cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExitType {
    /// No key has been injected yet.
    #[default]
    NeverActivated,
    /// The widget accepted its value (Enter, Tab, a button press).
    Normal,
    /// The user cancelled.
    EscapeHit,
    /// The key was handled but the widget is still active; read another.
    EarlyExit,
    /// Input could not be read or drawing failed.
    Error,
}

impl ExitType {
    /// Whether an activation loop stops on this exit type.
    pub fn is_terminal(self) -> bool {
        matches!(self, ExitType::Normal | ExitType::EscapeHit | ExitType::Error)
    }
}

impl fmt::Display for ExitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExitType::NeverActivated => "never-activated",
            ExitType::Normal => "normal",
            ExitType::EscapeHit => "escape-hit",
            ExitType::EarlyExit => "early-exit",
            ExitType::Error => "error",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// WidgetState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub exit_type: ExitType,
    pub has_focus: bool,
    pub is_visible: bool,
    /// Draw a border around the widget.
    pub boxed: bool,
    /// Draw a drop shadow below and to the right.
    pub shadow: bool,
}

impl WidgetState {
    pub fn new(boxed: bool, shadow: bool) -> Self {
        Self {
            boxed,
            shadow,
            ..Self::default()
        }
    }

    /// Border width on each side: 1 when boxed.
    pub fn border(&self) -> i32 {
        i32::from(self.boxed)
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            exit_type: ExitType::NeverActivated,
            has_focus: false,
            is_visible: true,
            boxed: false,
            shadow: false,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_exit_types() {
        assert!(ExitType::Normal.is_terminal());
        assert!(ExitType::EscapeHit.is_terminal());
        assert!(ExitType::Error.is_terminal());
        assert!(!ExitType::EarlyExit.is_terminal());
        assert!(!ExitType::NeverActivated.is_terminal());
    }

    #[test]
    fn new_state_is_visible_and_unactivated() {
        let state = WidgetState::new(true, false);
        assert_eq!(state.exit_type, ExitType::NeverActivated);
        assert!(state.is_visible);
        assert!(!state.has_focus);
        assert_eq!(state.border(), 1);
        assert_eq!(WidgetState::default().border(), 0);
    }

    #[test]
    fn display_names() {
        assert_eq!(ExitType::EscapeHit.to_string(), "escape-hit");
    }
}
