#![forbid(unsafe_code)]

//! Core: geometry, type tags, drag transfer metadata, insertion-slot
//! resolution, and native enter/leave debouncing for treedrop.
//!
//! Everything in this crate is pure data or a small state machine. The
//! stateful drag session, keyboard moves, and auto-scroll live in
//! `treedrop-session`.

pub mod dragster;
pub mod error;
pub mod event;
pub mod geometry;
pub mod location;
pub mod logging;
pub mod resolver;
pub mod tags;
pub mod transfer;

pub use dragster::{Dragster, DragsterOutcome, DragsterPhase, LogicalDragEvent};
pub use error::ConfigError;
pub use event::{Disposition, KeyCode, KeyEvent, KeyEventKind, Modifiers, NativeDragKind};
pub use geometry::{Direction, Point, Rect};
pub use location::{DropResult, Location};
pub use resolver::{
    Candidate, CandidateFilter, ElementSnapshot, InsertionSlot, SlotAnchor,
    resolve_insertion_slot, visible_candidates,
};
pub use tags::{DraggableType, TypeSet};
pub use transfer::{DragTransfer, DropEffect, EffectAllowed};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
