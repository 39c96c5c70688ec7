#![forbid(unsafe_code)]

//! Keyboard moves.
//!
//! A focused draggable can be moved one step with a key combination instead
//! of a pointer drag. A [`KeyBindingMap`] translates the key into a
//! [`KeyAction`]; [`plan_move`] turns the action into a destination
//! [`Location`], or `None` when the move would leave the list.
//!
//! The session then synthesizes a drop on the destination so pointer and
//! keyboard moves share one commit path.
//!
//! # Modifiers
//!
//! Ctrl and Shift must match the map exactly: with the default map
//! `Ctrl+ArrowDown` moves, `Ctrl+Shift+ArrowDown` and plain `ArrowDown` do
//! not.

use std::collections::BTreeMap;

use treedrop_core::{Direction, DropResult, KeyCode, KeyEvent, Location, TypeSet};

/// A one-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move one position toward the start of the list.
    IndexDecrease,
    /// Move one position toward the end of the list.
    IndexIncrease,
    /// Move to the previous accepting droppable.
    DroppableDecrease,
    /// Move to the next accepting droppable.
    DroppableIncrease,
}

impl KeyAction {
    /// The action on the other axis.
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        match self {
            Self::IndexDecrease => Self::DroppableDecrease,
            Self::IndexIncrease => Self::DroppableIncrease,
            Self::DroppableDecrease => Self::IndexDecrease,
            Self::DroppableIncrease => Self::IndexIncrease,
        }
    }
}

/// Default bindings for vertical lists.
#[must_use]
pub fn vertical_key_mapping() -> BTreeMap<KeyCode, KeyAction> {
    BTreeMap::from([
        (KeyCode::ArrowUp, KeyAction::IndexDecrease),
        (KeyCode::ArrowDown, KeyAction::IndexIncrease),
        (KeyCode::ArrowLeft, KeyAction::DroppableDecrease),
        (KeyCode::ArrowRight, KeyAction::DroppableIncrease),
    ])
}

/// Default bindings for horizontal lists.
#[must_use]
pub fn horizontal_key_mapping() -> BTreeMap<KeyCode, KeyAction> {
    swap_axes(&vertical_key_mapping())
}

fn swap_axes(map: &BTreeMap<KeyCode, KeyAction>) -> BTreeMap<KeyCode, KeyAction> {
    map.iter().map(|(k, a)| (*k, a.perpendicular())).collect()
}

/// Key to action mapping plus the required modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindingMap {
    vertical: BTreeMap<KeyCode, KeyAction>,
    horizontal: BTreeMap<KeyCode, KeyAction>,
    /// Ctrl must be held (and must not be held when false).
    pub ctrl: bool,
    /// Shift must be held (and must not be held when false).
    pub shift: bool,
}

impl Default for KeyBindingMap {
    fn default() -> Self {
        Self {
            vertical: vertical_key_mapping(),
            horizontal: horizontal_key_mapping(),
            ctrl: true,
            shift: false,
        }
    }
}

impl KeyBindingMap {
    /// A map from bindings written for vertical lists. Horizontal lists use
    /// the same keys with each action moved to the other axis.
    #[must_use]
    pub fn new(bindings: BTreeMap<KeyCode, KeyAction>) -> Self {
        Self {
            horizontal: swap_axes(&bindings),
            vertical: bindings,
            ctrl: true,
            shift: false,
        }
    }

    /// A map with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// Require Ctrl (builder form).
    #[must_use]
    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    /// Require Shift (builder form).
    #[must_use]
    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    /// Bind `key` to `action` for vertical lists (and its perpendicular for
    /// horizontal ones).
    #[must_use]
    pub fn bind(mut self, key: KeyCode, action: KeyAction) -> Self {
        self.vertical.insert(key, action);
        self.horizontal.insert(key, action.perpendicular());
        self
    }

    /// Whether no keys are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty()
    }

    /// Bindings used for lists laid out in `direction`.
    #[must_use]
    pub fn bindings(&self, direction: Direction) -> &BTreeMap<KeyCode, KeyAction> {
        match direction {
            Direction::Vertical => &self.vertical,
            Direction::Horizontal => &self.horizontal,
        }
    }

    /// Action for `event` in a list laid out in `direction`.
    #[must_use]
    pub fn action_for(&self, event: &KeyEvent, direction: Direction) -> Option<KeyAction> {
        if event.ctrl() != self.ctrl || event.shift() != self.shift {
            return None;
        }
        self.bindings(direction).get(&event.code).copied()
    }
}

/// Result of a key-down on a draggable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a bound combination, or keyboard moves are off.
    Ignored,
    /// Key still held from a previous move.
    Repeat,
    /// Bound, but the move would leave the list.
    NoOp,
    /// The move was committed.
    Moved(DropResult),
}

/// A droppable as seen by the move planner.
#[derive(Debug, Clone, Copy)]
pub struct ContainerView<'a> {
    /// Droppable id.
    pub droppable_id: &'a str,
    /// Accepted tags.
    pub accepts: &'a TypeSet,
    /// Visible member count.
    pub len: usize,
}

/// Compute the destination of `action` for an item at `from`.
///
/// `containers` lists droppables in registration order and must include the
/// origin. Index moves stay in the origin; droppable moves walk to the
/// nearest droppable in that direction that accepts `types`, keeping the
/// index where possible. Returns `None` for a move out of bounds.
#[must_use]
pub fn plan_move(
    action: KeyAction,
    from: &Location,
    types: &TypeSet,
    containers: &[ContainerView<'_>],
) -> Option<Location> {
    let position = containers
        .iter()
        .position(|c| c.droppable_id == from.droppable_id)?;
    let origin = &containers[position];

    match action {
        KeyAction::IndexDecrease => {
            let index = from.index.checked_sub(1)?;
            Some(Location::new(origin.droppable_id, index))
        }
        KeyAction::IndexIncrease => {
            let index = from.index + 1;
            (index < origin.len).then(|| Location::new(origin.droppable_id, index))
        }
        KeyAction::DroppableDecrease => containers[..position]
            .iter()
            .rev()
            .find(|c| c.accepts.is_compatible(types))
            .map(|c| Location::new(c.droppable_id, from.index.min(c.len))),
        KeyAction::DroppableIncrease => containers[position + 1..]
            .iter()
            .find(|c| c.accepts.is_compatible(types))
            .map(|c| Location::new(c.droppable_id, from.index.min(c.len))),
    }
}
