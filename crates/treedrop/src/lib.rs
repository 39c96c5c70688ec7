#![forbid(unsafe_code)]

//! treedrop public facade crate.
//!
//! Re-exports the geometry, payload, and session types a host needs, plus a
//! prelude for day-to-day usage. A host mounts a [`DragDropRoot`], registers
//! droppables and draggables, forwards native drag signals to the
//! [`Session`], and applies each delivered [`DropResult`] to its own data.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use treedrop_core::{
    Candidate, CandidateFilter, ConfigError, Direction, Disposition, DragTransfer, DraggableType,
    Dragster, DropEffect, DropResult, EffectAllowed, ElementSnapshot, InsertionSlot, KeyCode,
    KeyEvent, KeyEventKind, Location, LogicalDragEvent, Modifiers, NativeDragKind, Point, Rect,
    SlotAnchor, TypeSet, resolve_insertion_slot, visible_candidates,
};

// --- Session re-exports ----------------------------------------------------

pub use treedrop_session::{
    AutoScrollConfig, DragDropRoot, DragSessionState, DraggableAttributes, DraggableBinding,
    DraggableConfig, DraggableSnapshot, DroppableAttributes, DroppableBinding, DroppableConfig,
    DroppableSnapshot, InvariantViolation, KeyAction, KeyBindingMap, KeyOutcome, PlaceholderFn,
    ScrollCurve, ScrollFrame, Session, SessionConfig, Surface,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for treedrop hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Misuse of the public contract.
    Config(ConfigError),
    /// The gesture state broke one of its invariants.
    Invariant(InvariantViolation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Invariant(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Invariant(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<InvariantViolation> for Error {
    fn from(err: InvariantViolation) -> Self {
        Self::Invariant(err)
    }
}

/// Standard result type for treedrop APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

/// Types most hosts need: `use treedrop::prelude::*;`.
pub mod prelude {
    pub use crate::{
        Direction, DragDropRoot, DragTransfer, DraggableConfig, DraggableType, DropResult,
        DroppableConfig, ElementSnapshot, Error, KeyOutcome, Location, NativeDragKind, Point,
        Rect, Result, Session, SessionConfig, Surface, TypeSet,
    };

    pub use crate::{core, session};
}

pub use treedrop_core as core;
pub use treedrop_session as session;
