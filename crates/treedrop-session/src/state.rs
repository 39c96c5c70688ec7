#![forbid(unsafe_code)]

//! Drag session state.
//!
//! One [`DragSessionState`] exists per mounted root. It records the payload
//! in flight, where it came from, where the placeholder currently sits, the
//! last pointer position, and the acceptance arbiter.
//!
//! # Invariants
//!
//! 1. `origin.is_some() == dragging`.
//! 2. `active_payload_id.is_some() == dragging`.
//! 3. `!dragging` implies `placeholder.is_none()`.
//!
//! [`DragSessionState::check_invariants`] verifies all three.

use std::fmt;
use std::time::Duration;

use treedrop_core::{InsertionSlot, Location, Point};

use crate::arbiter::AcceptanceArbiter;

/// A broken session invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Origin set while not dragging, or missing while dragging.
    Origin,
    /// Payload id set while not dragging, or missing while dragging.
    Payload,
    /// Placeholder set while not dragging.
    Placeholder,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin must be set iff dragging"),
            Self::Payload => write!(f, "active payload must be set iff dragging"),
            Self::Placeholder => write!(f, "placeholder must be clear when not dragging"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Per-root drag session state.
#[derive(Debug, Clone, Default)]
pub struct DragSessionState {
    dragging: bool,
    active_payload_id: Option<String>,
    origin: Option<Location>,
    placeholder: Option<InsertionSlot>,
    pointer: Point,
    arbiter: AcceptanceArbiter,
}

impl DragSessionState {
    /// Fresh idle state with the given acceptance settle window.
    #[must_use]
    pub fn new(acceptance_settle: Duration) -> Self {
        Self {
            arbiter: AcceptanceArbiter::new(acceptance_settle),
            ..Self::default()
        }
    }

    /// Whether a pointer drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Id of the payload being dragged.
    #[must_use]
    pub fn active_payload_id(&self) -> Option<&str> {
        self.active_payload_id.as_deref()
    }

    /// Where the payload was picked up.
    #[must_use]
    pub fn origin(&self) -> Option<&Location> {
        self.origin.as_ref()
    }

    /// Current placeholder position.
    #[must_use]
    pub fn placeholder(&self) -> Option<&InsertionSlot> {
        self.placeholder.as_ref()
    }

    /// Last known pointer position.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Current acceptance epoch.
    #[must_use]
    pub fn acceptance_epoch(&self) -> u64 {
        self.arbiter.epoch()
    }

    /// Whether any droppable currently accepts the payload.
    #[must_use]
    pub fn is_any_container_accepting(&self) -> bool {
        self.arbiter.is_accepting()
    }

    /// The acceptance arbiter.
    #[must_use]
    pub fn arbiter(&self) -> &AcceptanceArbiter {
        &self.arbiter
    }

    /// Mutable access to the acceptance arbiter.
    pub fn arbiter_mut(&mut self) -> &mut AcceptanceArbiter {
        &mut self.arbiter
    }

    /// Enter the dragging state. The origin is fixed until [`Self::end`].
    pub fn begin(&mut self, payload_id: impl Into<String>, origin: Location) {
        self.dragging = true;
        self.active_payload_id = Some(payload_id.into());
        self.origin = Some(origin);
        self.placeholder = None;
    }

    /// Leave the dragging state and clear everything gesture-scoped.
    pub fn end(&mut self) {
        self.dragging = false;
        self.active_payload_id = None;
        self.origin = None;
        self.placeholder = None;
        self.arbiter.reset();
    }

    /// Publish a placeholder position.
    ///
    /// Returns true if the `(droppable_id, index)` pair changed. An unchanged
    /// position keeps the existing slot. Ignored while not dragging.
    pub fn publish_placeholder(&mut self, slot: InsertionSlot) -> bool {
        if !self.dragging {
            return false;
        }
        if self
            .placeholder
            .as_ref()
            .is_some_and(|current| current.same_position(&slot))
        {
            return false;
        }
        self.placeholder = Some(slot);
        true
    }

    /// Clear the placeholder if it belongs to `droppable_id`.
    pub fn clear_placeholder_in(&mut self, droppable_id: &str) -> bool {
        if self
            .placeholder
            .as_ref()
            .is_some_and(|slot| slot.droppable_id == droppable_id)
        {
            self.placeholder = None;
            true
        } else {
            false
        }
    }

    /// Record the pointer position.
    pub fn track_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Verify the session invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.origin.is_some() != self.dragging {
            return Err(InvariantViolation::Origin);
        }
        if self.active_payload_id.is_some() != self.dragging {
            return Err(InvariantViolation::Payload);
        }
        if !self.dragging && self.placeholder.is_some() {
            return Err(InvariantViolation::Placeholder);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treedrop_core::SlotAnchor;

    fn slot(id: &str, index: usize) -> InsertionSlot {
        InsertionSlot::end(id, index)
    }

    #[test]
    fn idle_state_holds_invariants() {
        let s = DragSessionState::default();
        assert!(s.check_invariants().is_ok());
        assert!(!s.is_dragging());
        assert_eq!(s.placeholder(), None);
    }

    #[test]
    fn begin_and_end_cycle() {
        let mut s = DragSessionState::default();
        s.begin("card", Location::new("a", 0));
        assert!(s.check_invariants().is_ok());
        assert_eq!(s.active_payload_id(), Some("card"));
        assert!(s.publish_placeholder(slot("a", 2)));
        s.end();
        assert!(s.check_invariants().is_ok());
        assert_eq!(s.placeholder(), None);
        assert_eq!(s.origin(), None);
    }

    #[test]
    fn publish_only_reports_position_changes() {
        let mut s = DragSessionState::default();
        s.begin("card", Location::new("a", 0));
        assert!(s.publish_placeholder(slot("a", 1)));
        let moved_anchor = InsertionSlot {
            droppable_id: "a".into(),
            index: 1,
            anchor: SlotAnchor::Before("x".into()),
        };
        assert!(!s.publish_placeholder(moved_anchor));
        assert_eq!(s.placeholder().map(|p| &p.anchor), Some(&SlotAnchor::End));
        assert!(s.publish_placeholder(slot("b", 1)));
    }

    #[test]
    fn publish_ignored_when_idle() {
        let mut s = DragSessionState::default();
        assert!(!s.publish_placeholder(slot("a", 0)));
        assert!(s.check_invariants().is_ok());
    }

    #[test]
    fn clear_is_scoped_to_container() {
        let mut s = DragSessionState::default();
        s.begin("card", Location::new("a", 0));
        s.publish_placeholder(slot("b", 0));
        assert!(!s.clear_placeholder_in("a"));
        assert!(s.placeholder().is_some());
        assert!(s.clear_placeholder_in("b"));
        assert!(s.placeholder().is_none());
    }

    #[test]
    fn end_releases_acceptance_but_keeps_epoch() {
        let mut s = DragSessionState::default();
        s.begin("card", Location::new("a", 0));
        s.arbiter_mut().claim();
        s.end();
        assert!(!s.is_any_container_accepting());
        assert_eq!(s.acceptance_epoch(), 1);
    }
}
