#![forbid(unsafe_code)]

//! Input signal types.
//!
//! The engine never listens to a platform directly. Hosts translate their
//! native drag and keyboard events into these types and call the matching
//! handler; handlers answer with a [`Disposition`] telling the host whether
//! to suppress the platform default and stop propagation.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the platform does not report it
//! - `Modifiers` use bitflags for easy combination
//! - Only the four native drag signals that reach a droppable region are
//!   modelled; drag start/drag/drag end are draggable-side handler calls

use bitflags::bitflags;

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with no modifiers and `Press` kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes relevant to keyboard moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Enter/Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// A regular character key.
    Char(char),
}

impl KeyCode {
    /// Parse a platform key name (`"ArrowUp"`, `"Escape"`, `"a"`, ...).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Enter" => Some(Self::Enter),
            "Escape" | "Esc" => Some(Self::Escape),
            "Tab" => Some(Self::Tab),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Native drag signal received by a droppable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeDragKind {
    /// Pointer crossed into the region or one of its descendants.
    Enter,
    /// Pointer crossed out of the region or one of its descendants.
    Leave,
    /// Pointer moved while over the region.
    Over,
    /// Payload was released over the region.
    Drop,
}

/// What the host should do with the native event after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disposition {
    /// Suppress the platform default behaviour.
    pub prevent_default: bool,
    /// Stop the event from reaching ancestor listeners.
    pub stop_propagation: bool,
}

impl Disposition {
    /// Let the event continue untouched.
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Consumed: suppress default and stop propagation.
    pub const HANDLED: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };

    /// Stop propagation but keep the platform default.
    pub const CONTAINED: Self = Self {
        prevent_default: false,
        stop_propagation: true,
    };

    /// Suppress the default and stop propagation (used to veto a drag start).
    pub const REJECTED: Self = Self::HANDLED;

    /// Returns true if the handler consumed the event.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        self.prevent_default && self.stop_propagation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_builders() {
        let ev = KeyEvent::new(KeyCode::ArrowDown)
            .with_modifiers(Modifiers::CTRL | Modifiers::SHIFT)
            .with_kind(KeyEventKind::Repeat);
        assert!(ev.ctrl());
        assert!(ev.shift());
        assert_eq!(ev.kind, KeyEventKind::Repeat);
    }

    #[test]
    fn key_code_parse() {
        assert_eq!(KeyCode::parse("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(KeyCode::parse("Esc"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::parse("j"), Some(KeyCode::Char('j')));
        assert_eq!(KeyCode::parse("PageDown"), None);
        assert_eq!(KeyCode::parse(""), None);
    }

    #[test]
    fn disposition_constants() {
        assert!(Disposition::HANDLED.is_handled());
        assert!(!Disposition::PASS.is_handled());
        assert!(!Disposition::CONTAINED.prevent_default);
        assert_eq!(Disposition::default(), Disposition::PASS);
    }
}
