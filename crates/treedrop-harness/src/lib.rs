#![forbid(unsafe_code)]

//! Test harness for treedrop sessions.
//!
//! - [`MockSurface`]: an in-memory host with laid-out droppables, hidden
//!   items, and scrollable frames. Applying a [`DropResult`] moves the item
//!   the way a host reducer would.
//! - [`gesture::Gesture`]: drives native event sequences against a session
//!   on a virtual clock.
//! - [`flicker_detection`]: records acceptance transitions and flags
//!   off/on flicker.
//!
//! # Quick Start
//!
//! ```ignore
//! use treedrop_harness::{MockSurface, gesture::Gesture};
//!
//! let mut surface = MockSurface::new().column("A", Rect::new(0.0, 0.0, 100.0, 300.0), 20.0, &["a0", "a1"]);
//! let mut g = Gesture::new();
//! g.pick_up(session, &card, &surface, Point::new(5.0, 5.0))?;
//! g.move_over(session, &card, &col, Point::new(5.0, 70.0), &surface)?;
//! g.release(session, &card, &col, &surface)?;
//! ```

pub mod flicker_detection;
pub mod gesture;

use std::collections::BTreeMap;

use tracing::Level;
use treedrop_core::{Direction, DropResult, ElementSnapshot, Rect};
use treedrop_session::{ScrollFrame, Surface};

pub use flicker_detection::{AcceptanceFlickerDetector, AnalysisStats, EventType, FlickerEvent, Severity};
pub use gesture::{DropSink, Gesture, record_into};

/// Install a test-writer fmt subscriber once. `RUST_LOG` overrides the
/// default `debug` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(Level::DEBUG.as_str()));
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

// ============================================================================
// Mock Surface
// ============================================================================

#[derive(Debug, Clone)]
struct MockItem {
    id: String,
    hidden: bool,
}

#[derive(Debug, Clone)]
struct MockDroppable {
    rect: Rect,
    direction: Direction,
    extent: f64,
    items: Vec<MockItem>,
    scroll_x: f64,
    scroll_y: f64,
    max_scroll_x: f64,
    max_scroll_y: f64,
    scrollable: bool,
}

impl MockDroppable {
    /// Item rects in client space (content position less scroll), hidden
    /// items taking no room.
    fn layout(&self) -> Vec<ElementSnapshot> {
        let mut cursor = 0.0;
        self.items
            .iter()
            .map(|item| {
                let content = match self.direction {
                    Direction::Vertical => Rect::new(self.rect.x, self.rect.y + cursor, self.rect.width, self.extent),
                    Direction::Horizontal => Rect::new(self.rect.x + cursor, self.rect.y, self.extent, self.rect.height),
                };
                let rect = content.offset(-self.scroll_x, -self.scroll_y);
                if !item.hidden {
                    cursor += self.extent;
                }
                ElementSnapshot::new(item.id.clone(), rect).hidden(item.hidden)
            })
            .collect()
    }
}

/// An in-memory host surface.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    droppables: BTreeMap<String, MockDroppable>,
    scroll_log: Vec<(String, f64, f64)>,
}

impl MockSurface {
    /// Empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_droppable(mut self, id: &str, rect: Rect, direction: Direction, extent: f64, items: &[&str]) -> Self {
        let items = items
            .iter()
            .map(|id| MockItem {
                id: (*id).to_owned(),
                hidden: false,
            })
            .collect();
        self.droppables.insert(
            id.to_owned(),
            MockDroppable {
                rect,
                direction,
                extent,
                items,
                scroll_x: 0.0,
                scroll_y: 0.0,
                max_scroll_x: 0.0,
                max_scroll_y: 0.0,
                scrollable: false,
            },
        );
        self
    }

    /// Add a vertical droppable whose items are `extent` tall.
    #[must_use]
    pub fn column(self, id: &str, rect: Rect, extent: f64, items: &[&str]) -> Self {
        self.with_droppable(id, rect, Direction::Vertical, extent, items)
    }

    /// Add a horizontal droppable whose items are `extent` wide.
    #[must_use]
    pub fn row(self, id: &str, rect: Rect, extent: f64, items: &[&str]) -> Self {
        self.with_droppable(id, rect, Direction::Horizontal, extent, items)
    }

    /// Make a droppable scrollable up to the given offsets.
    #[must_use]
    pub fn scrollable(mut self, id: &str, max_scroll_x: f64, max_scroll_y: f64) -> Self {
        if let Some(d) = self.droppables.get_mut(id) {
            d.scrollable = true;
            d.max_scroll_x = max_scroll_x;
            d.max_scroll_y = max_scroll_y;
        }
        self
    }

    /// Hide or show an item.
    pub fn set_hidden(&mut self, item_id: &str, hidden: bool) {
        if let Some(item) = self.item_mut(item_id) {
            item.hidden = hidden;
        }
    }

    fn item_mut(&mut self, item_id: &str) -> Option<&mut MockItem> {
        self.droppables
            .values_mut()
            .flat_map(|d| d.items.iter_mut())
            .find(|item| item.id == item_id)
    }

    /// Item ids of a droppable, hidden ones included.
    #[must_use]
    pub fn items(&self, droppable_id: &str) -> Vec<String> {
        self.droppables
            .get(droppable_id)
            .map(|d| d.items.iter().map(|item| item.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Current scroll offset of a droppable.
    #[must_use]
    pub fn scroll_offset(&self, droppable_id: &str) -> (f64, f64) {
        self.droppables
            .get(droppable_id)
            .map_or((0.0, 0.0), |d| (d.scroll_x, d.scroll_y))
    }

    /// Every `scroll_by` call received.
    #[must_use]
    pub fn scroll_log(&self) -> &[(String, f64, f64)] {
        &self.scroll_log
    }

    /// Move the dragged item as a host reducer would. The destination index
    /// counts visible items after removal. Returns false, leaving the
    /// surface untouched, if the item or destination is unknown or the
    /// index is past the end of the destination.
    pub fn apply(&mut self, result: &DropResult) -> bool {
        let Some(dest) = self.droppables.get(&result.to.droppable_id) else {
            return false;
        };
        let remaining = dest
            .items
            .iter()
            .filter(|item| !item.hidden && item.id != result.drag_id)
            .count();
        if result.to.index > remaining {
            return false;
        }
        let Some(source) = self
            .droppables
            .values_mut()
            .find(|d| d.items.iter().any(|item| item.id == result.drag_id))
        else {
            return false;
        };
        let Some(position) = source.items.iter().position(|item| item.id == result.drag_id) else {
            return false;
        };
        let item = source.items.remove(position);

        let Some(dest) = self.droppables.get_mut(&result.to.droppable_id) else {
            return false;
        };
        let insert_at = dest
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.hidden)
            .nth(result.to.index)
            .map_or(dest.items.len(), |(i, _)| i);
        dest.items.insert(insert_at, item);
        true
    }
}

impl Surface for MockSurface {
    fn members(&self, droppable_id: &str) -> Vec<ElementSnapshot> {
        self.droppables
            .get(droppable_id)
            .map(MockDroppable::layout)
            .unwrap_or_default()
    }

    fn scroll_frame(&self, droppable_id: &str) -> Option<ScrollFrame> {
        let d = self.droppables.get(droppable_id).filter(|d| d.scrollable)?;
        Some(ScrollFrame {
            rect: d.rect,
            scroll_x: d.scroll_x,
            scroll_y: d.scroll_y,
            max_scroll_x: d.max_scroll_x,
            max_scroll_y: d.max_scroll_y,
        })
    }

    fn scroll_by(&mut self, droppable_id: &str, dx: f64, dy: f64) {
        if let Some(d) = self.droppables.get_mut(droppable_id) {
            d.scroll_x = (d.scroll_x + dx).clamp(0.0, d.max_scroll_x);
            d.scroll_y = (d.scroll_y + dy).clamp(0.0, d.max_scroll_y);
            self.scroll_log.push((droppable_id.to_owned(), dx, dy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treedrop_core::Location;

    fn board() -> MockSurface {
        MockSurface::new()
            .column("A", Rect::new(0.0, 0.0, 100.0, 300.0), 20.0, &["a0", "a1", "a2"])
            .column("B", Rect::new(200.0, 0.0, 100.0, 300.0), 20.0, &[])
    }

    #[test]
    fn layout_skips_hidden_items() {
        let mut s = board();
        s.set_hidden("a0", true);
        let members = s.members("A");
        assert!(members[0].hidden);
        assert_eq!(members[1].rect.y, 0.0);
        assert_eq!(members[2].rect.y, 20.0);
    }

    #[test]
    fn apply_moves_across_droppables() {
        let mut s = board();
        assert!(s.apply(&DropResult::new("a1", Location::new("A", 1), Location::new("B", 0))));
        assert_eq!(s.items("A"), ["a0", "a2"]);
        assert_eq!(s.items("B"), ["a1"]);
    }

    #[test]
    fn apply_reorders_with_post_removal_index() {
        let mut s = board();
        assert!(s.apply(&DropResult::new("a0", Location::new("A", 0), Location::new("A", 2))));
        assert_eq!(s.items("A"), ["a1", "a2", "a0"]);
        assert!(!s.apply(&DropResult::new("ghost", Location::new("A", 0), Location::new("A", 0))));
    }

    #[test]
    fn apply_rejects_index_past_end() {
        let mut s = board();
        assert!(!s.apply(&DropResult::new("a0", Location::new("A", 0), Location::new("A", 3))));
        assert_eq!(s.items("A"), ["a0", "a1", "a2"]);
        assert!(!s.apply(&DropResult::new("a0", Location::new("A", 0), Location::new("B", 1))));
        assert!(s.apply(&DropResult::new("a0", Location::new("A", 0), Location::new("B", 0))));
    }

    #[test]
    fn scroll_is_clamped() {
        let mut s = board().scrollable("A", 0.0, 50.0);
        s.scroll_by("A", 0.0, 80.0);
        assert_eq!(s.scroll_offset("A"), (0.0, 50.0));
        assert_eq!(s.members("A")[0].rect.y, -50.0);
        assert!(s.scroll_frame("B").is_none());
    }
}
