#![forbid(unsafe_code)]

//! Drag session engine for treedrop.
//!
//! A [`DragDropRoot`] owns one [`Session`] while mounted. The session
//! composes the pure pieces from `treedrop-core` (slot resolution, the
//! enter/leave debouncer) with the stateful ones defined here:
//!
//! - [`DragSessionState`]: the single source of truth for the gesture.
//! - [`AcceptanceArbiter`]: epoch-based arbitration between overlapping
//!   droppables.
//! - [`keyboard`]: key bindings and move planning.
//! - [`autoscroll`]: per-frame edge scrolling.
//!
//! The host supplies geometry through [`Surface`] and forwards native
//! events to the handler methods on [`Session`]. Time is always passed in.

pub mod arbiter;
pub mod autoscroll;
pub mod config;
pub mod keyboard;
pub mod registry;
pub mod root;
pub mod session;
pub mod state;
pub mod surface;

pub use arbiter::{AcceptanceArbiter, DEFAULT_ACCEPTANCE_SETTLE, PendingRelease, ReleaseOutcome};
pub use autoscroll::{
    AutoScrollConfig, AutoScroller, DEFAULT_MAX_SCROLL_SPEED, DEFAULT_SCROLL_DISTANCE,
    ScrollCurve, ScrollStep,
};
pub use config::{SessionConfig, SessionConfigParse};
pub use keyboard::{
    ContainerView, KeyAction, KeyBindingMap, KeyOutcome, horizontal_key_mapping, plan_move,
    vertical_key_mapping,
};
pub use registry::{
    DraggableAttributes, DraggableBinding, DraggableConfig, DraggableSnapshot,
    DroppableAttributes, DroppableBinding, DroppableConfig, DroppableSnapshot,
};
pub use root::{DragDropRoot, PlaceholderFn};
pub use session::Session;
pub use state::{DragSessionState, InvariantViolation};
pub use surface::{ScrollFrame, Surface};
