#![forbid(unsafe_code)]

//! Enter/leave debouncing for droppable regions.
//!
//! Platforms fire a native enter on the child before the matching leave on
//! the parent when the pointer crosses from a region into one of its
//! descendants, so a naive handler sees enter, enter, leave and flickers.
//! [`Dragster`] tracks two nesting flags and collapses that burst into one
//! logical enter and, later, one logical leave.
//!
//! # State Machine
//!
//! ```text
//!            enter                enter
//!  Outside ─────────▶ Inside ─────────────▶ Nested
//!     ▲   ◀─────────    │    ◀─────────────
//!     │     leave       │        leave
//!     └──── drop ───────┴──── drop ─────────┘
//! ```
//!
//! Only the `Outside → Inside` edge emits [`LogicalDragEvent::Enter`] and only
//! the `Inside → Outside` leave edge emits [`LogicalDragEvent::Leave`].
//!
//! # Invariants
//!
//! 1. Logical enters and leaves alternate, starting with an enter.
//! 2. After a drop both flags are clear; a stale leave then emits nothing.
//! 3. Over is forwarded only when the advertised tags intersect `accepts`.
//!
//! # Failure Modes
//!
//! - Leave without enter: ignored, no logical event.
//! - Three or more nested enters: the extra enters are absorbed by the
//!   `Nested` state; the matching leaves may emit the logical leave early.
//!   The next enter re-opens the region.

use crate::event::{Disposition, NativeDragKind};
use crate::tags::TypeSet;

/// Debounced drag signal for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalDragEvent {
    /// Pointer is now inside the region.
    Enter,
    /// Pointer has left the region.
    Leave,
    /// Compatible payload moved over the region.
    Over,
    /// Payload released over the region.
    Drop {
        /// Whether the advertised tags are accepted here.
        accepted: bool,
    },
}

/// Nesting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragsterPhase {
    /// Not inside.
    #[default]
    Outside,
    /// Inside once.
    Inside,
    /// Inside a descendant before the parent's leave arrived.
    Nested,
}

/// Result of feeding a native signal to a [`Dragster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragsterOutcome {
    /// Logical event to act on, if any.
    pub logical: Option<LogicalDragEvent>,
    /// What to do with the native event.
    pub disposition: Disposition,
}

impl DragsterOutcome {
    const fn handled(logical: Option<LogicalDragEvent>) -> Self {
        Self {
            logical,
            disposition: Disposition::HANDLED,
        }
    }
}

/// Per-region enter/leave debouncer.
#[derive(Debug, Clone, Default)]
pub struct Dragster {
    accepts: TypeSet,
    entered_once: bool,
    entered_twice: bool,
}

impl Dragster {
    /// Debouncer for a region accepting `accepts`.
    #[must_use]
    pub fn new(accepts: TypeSet) -> Self {
        Self {
            accepts,
            entered_once: false,
            entered_twice: false,
        }
    }

    /// Accepted tags.
    #[must_use]
    pub fn accepts(&self) -> &TypeSet {
        &self.accepts
    }

    /// Current nesting phase.
    #[must_use]
    pub fn phase(&self) -> DragsterPhase {
        match (self.entered_once, self.entered_twice) {
            (_, true) => DragsterPhase::Nested,
            (true, false) => DragsterPhase::Inside,
            (false, false) => DragsterPhase::Outside,
        }
    }

    /// Whether a payload advertising `advertised` may land here.
    #[must_use]
    pub fn is_compatible(&self, advertised: &TypeSet) -> bool {
        self.accepts.is_compatible(advertised)
    }

    /// Feed one native signal.
    pub fn handle(&mut self, kind: NativeDragKind, advertised: &TypeSet) -> DragsterOutcome {
        match kind {
            NativeDragKind::Enter => {
                if self.entered_once {
                    self.entered_twice = true;
                    crate::trace!(phase = ?self.phase(), "nested enter absorbed");
                    DragsterOutcome::handled(None)
                } else {
                    self.entered_once = true;
                    DragsterOutcome::handled(Some(LogicalDragEvent::Enter))
                }
            }
            NativeDragKind::Leave => {
                let cleared = if self.entered_twice {
                    self.entered_twice = false;
                    true
                } else if self.entered_once {
                    self.entered_once = false;
                    true
                } else {
                    false
                };
                let left = cleared && !self.entered_once && !self.entered_twice;
                DragsterOutcome::handled(left.then_some(LogicalDragEvent::Leave))
            }
            NativeDragKind::Over => {
                if self.is_compatible(advertised) {
                    DragsterOutcome::handled(Some(LogicalDragEvent::Over))
                } else {
                    DragsterOutcome {
                        logical: None,
                        disposition: Disposition::PASS,
                    }
                }
            }
            NativeDragKind::Drop => {
                self.reset();
                let accepted = self.is_compatible(advertised);
                DragsterOutcome::handled(Some(LogicalDragEvent::Drop { accepted }))
            }
        }
    }

    /// Clear both nesting flags.
    pub fn reset(&mut self) {
        self.entered_once = false;
        self.entered_twice = false;
    }
}
