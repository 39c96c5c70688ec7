#![forbid(unsafe_code)]

//! Host platform seam.
//!
//! The session never walks an element tree itself. The host implements
//! [`Surface`] to report a droppable's live members and, optionally, its
//! scroll state.

use treedrop_core::{ElementSnapshot, Rect};

/// Scroll state of a droppable's scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollFrame {
    /// Visible box in client coordinates.
    pub rect: Rect,
    /// Horizontal scroll offset.
    pub scroll_x: f64,
    /// Vertical scroll offset.
    pub scroll_y: f64,
    /// Largest horizontal offset.
    pub max_scroll_x: f64,
    /// Largest vertical offset.
    pub max_scroll_y: f64,
}

impl ScrollFrame {
    /// A frame with no scroll range.
    #[must_use]
    pub fn fixed(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// Set the scroll range (builder form).
    #[must_use]
    pub fn with_range(mut self, max_scroll_x: f64, max_scroll_y: f64) -> Self {
        self.max_scroll_x = max_scroll_x.max(0.0);
        self.max_scroll_y = max_scroll_y.max(0.0);
        self
    }

    /// Whether the frame can scroll toward the start of an axis.
    #[must_use]
    pub fn can_scroll_back(&self, horizontal: bool) -> bool {
        if horizontal {
            self.scroll_x > 0.0
        } else {
            self.scroll_y > 0.0
        }
    }

    /// Whether the frame can scroll toward the end of an axis.
    #[must_use]
    pub fn can_scroll_forward(&self, horizontal: bool) -> bool {
        if horizontal {
            self.scroll_x < self.max_scroll_x
        } else {
            self.scroll_y < self.max_scroll_y
        }
    }
}

/// Geometry and scrolling provided by the host.
pub trait Surface {
    /// Item elements tagged as members of `droppable_id`, in document order.
    ///
    /// Each snapshot's `id` is the draggable id of the item.
    fn members(&self, droppable_id: &str) -> Vec<ElementSnapshot>;

    /// Scroll state of the droppable, if it scrolls.
    fn scroll_frame(&self, _droppable_id: &str) -> Option<ScrollFrame> {
        None
    }

    /// Apply a scroll nudge.
    fn scroll_by(&mut self, _droppable_id: &str, _dx: f64, _dy: f64) {}
}
