#![forbid(unsafe_code)]

//! Insertion-slot resolution.
//!
//! Given the pointer and the ordered sibling items of a droppable, pick the
//! index where a dragged item would land if released now.
//!
//! # Algorithm
//!
//! For each candidate, `distance = pointer - midpoint` on the container's
//! main axis. The winner is the candidate with the largest strictly negative
//! distance: the first midpoint the pointer has not yet passed. The item is
//! inserted before the winner. If no candidate qualifies (pointer past every
//! midpoint, or no candidates at all) the slot is the end of the container.
//!
//! # Invariants
//!
//! 1. `slot.index <= candidates.len()`.
//! 2. Pure: same inputs, same slot.
//! 3. `SlotAnchor::End` iff `slot.index == candidates.len()`.
//! 4. Equal midpoints: the first candidate in document order wins (strict
//!    comparison never replaces an equal best).
//!
//! # Failure Modes
//!
//! A NaN midpoint or pointer yields a NaN distance, which fails both
//! comparisons and is skipped.

use crate::geometry::{Direction, Point, Rect};

/// A host element as seen at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    /// Element id (the draggable id for items).
    pub id: String,
    /// Bounding box in client coordinates.
    pub rect: Rect,
    /// Element carries the `placeholder-hidden` marker.
    pub hidden: bool,
    /// Element is the one being dragged (`aria-grabbed="true"`).
    pub grabbed: bool,
}

impl ElementSnapshot {
    /// A visible, non-grabbed element.
    #[must_use]
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            hidden: false,
            grabbed: false,
        }
    }

    /// Mark as placeholder-hidden.
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Mark as grabbed.
    #[must_use]
    pub fn grabbed(mut self, grabbed: bool) -> Self {
        self.grabbed = grabbed;
        self
    }
}

/// Which elements are skipped when collecting candidates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateFilter {
    /// Skip elements flagged `grabbed`.
    pub exclude_grabbed: bool,
    /// Skip the element with this id.
    pub exclude_id: Option<String>,
}

impl CandidateFilter {
    /// Skip only placeholder-hidden elements.
    #[must_use]
    pub fn visible_only() -> Self {
        Self::default()
    }

    /// Also skip the grabbed element and, if given, the active payload.
    #[must_use]
    pub fn excluding_payload(exclude_grabbed: bool, payload_id: Option<&str>) -> Self {
        Self {
            exclude_grabbed,
            exclude_id: if exclude_grabbed {
                payload_id.map(str::to_owned)
            } else {
                None
            },
        }
    }

    fn admits(&self, element: &ElementSnapshot) -> bool {
        if element.hidden {
            return false;
        }
        if self.exclude_grabbed && element.grabbed {
            return false;
        }
        self.exclude_id.as_deref() != Some(element.id.as_str())
    }
}

/// A sibling item eligible for slot resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Element id.
    pub id: String,
    /// Bounding box.
    pub rect: Rect,
}

impl Candidate {
    /// Create a candidate.
    #[must_use]
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Filter a droppable's members down to resolution candidates, keeping order.
#[must_use]
pub fn visible_candidates(elements: &[ElementSnapshot], filter: &CandidateFilter) -> Vec<Candidate> {
    elements
        .iter()
        .filter(|e| filter.admits(e))
        .map(|e| Candidate::new(e.id.clone(), e.rect))
        .collect()
}

/// Element the placeholder is painted before.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotAnchor {
    /// Before the item with this id.
    Before(String),
    /// At the end of the container.
    End,
}

/// A resolved placeholder position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertionSlot {
    /// Target droppable.
    pub droppable_id: String,
    /// Insertion index among the candidates.
    pub index: usize,
    /// Paint anchor.
    pub anchor: SlotAnchor,
}

impl InsertionSlot {
    /// End-of-container slot.
    #[must_use]
    pub fn end(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
            anchor: SlotAnchor::End,
        }
    }

    /// Same `(droppable_id, index)` as `other`. The anchor is ignored.
    #[must_use]
    pub fn same_position(&self, other: &InsertionSlot) -> bool {
        self.index == other.index && self.droppable_id == other.droppable_id
    }

    /// Id of the element the placeholder precedes, if any.
    #[must_use]
    pub fn anchor_id(&self) -> Option<&str> {
        match &self.anchor {
            SlotAnchor::Before(id) => Some(id),
            SlotAnchor::End => None,
        }
    }
}

/// Resolve the insertion slot for `pointer` among `candidates`.
#[must_use]
pub fn resolve_insertion_slot(
    pointer: Point,
    direction: Direction,
    droppable_id: &str,
    candidates: &[Candidate],
) -> InsertionSlot {
    let coord = pointer.along(direction);
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let distance = coord - candidate.rect.midpoint(direction);
        let best_offset = best.map_or(f64::NEG_INFINITY, |(_, offset)| offset);
        if distance < 0.0 && distance > best_offset {
            best = Some((index, distance));
        }
    }

    let slot = match best {
        Some((index, _)) => InsertionSlot {
            droppable_id: droppable_id.to_owned(),
            index,
            anchor: SlotAnchor::Before(candidates[index].id.clone()),
        },
        None => InsertionSlot::end(droppable_id, candidates.len()),
    };

    crate::trace!(
        droppable = droppable_id,
        index = slot.index,
        candidates = candidates.len(),
        "resolved insertion slot"
    );
    slot
}
