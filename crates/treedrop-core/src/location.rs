#![forbid(unsafe_code)]

//! Drop endpoints and the result handed to the host on commit.

use std::fmt;

/// A position inside a droppable: container id plus insertion index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Location {
    /// The droppable's id.
    pub droppable_id: String,
    /// Index within the droppable's visible items.
    pub index: usize,
}

impl Location {
    /// Create a new location.
    #[must_use]
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.droppable_id, self.index)
    }
}

/// Outcome of a completed drop, delivered once to the droppable's callback.
///
/// `to.index` is the position in the destination after the dragged item
/// has been removed from `from`, so a host reducer can `remove(from)` and
/// then `insert(to)` without adjusting indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DropResult {
    /// Id of the draggable that was dropped.
    pub drag_id: String,
    /// Where the draggable came from.
    pub from: Location,
    /// Where the draggable is going.
    pub to: Location,
}

impl DropResult {
    /// Create a new drop result.
    #[must_use]
    pub fn new(drag_id: impl Into<String>, from: Location, to: Location) -> Self {
        Self {
            drag_id: drag_id.into(),
            from,
            to,
        }
    }

    /// True if the item lands where it started.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    /// True if the item moves to another droppable.
    #[must_use]
    pub fn crosses_droppables(&self) -> bool {
        self.from.droppable_id != self.to.droppable_id
    }
}

impl fmt::Display for DropResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.drag_id, self.from, self.to)
    }
}
