#![forbid(unsafe_code)]

//! Scripted native gestures on a virtual clock.
//!
//! A [`Gesture`] holds the transfer the browser would carry between handlers
//! and a clock that only moves when told to. Each step forwards the same
//! native signals a host would, in host order: root pointer tracking first,
//! then the region handler.

use std::time::{Duration, Instant};

use treedrop_core::{ConfigError, Disposition, DragTransfer, DropResult, NativeDragKind, Point};
use treedrop_session::{DraggableBinding, DroppableBinding, Session, Surface};

use crate::flicker_detection::AcceptanceFlickerDetector;

/// Native gesture driver.
#[derive(Debug, Clone)]
pub struct Gesture {
    now: Instant,
    pointer: Point,
    transfer: DragTransfer,
    detector: Option<AcceptanceFlickerDetector>,
}

impl Default for Gesture {
    fn default() -> Self {
        Self::new()
    }
}

impl Gesture {
    /// Driver starting at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Driver starting at `now`.
    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self {
            now,
            pointer: Point::default(),
            transfer: DragTransfer::new(),
            detector: None,
        }
    }

    /// Record acceptance after every step.
    #[must_use]
    pub fn with_detector(mut self, detector: AcceptanceFlickerDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Virtual now.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Last pointer position.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// The carried transfer.
    #[must_use]
    pub fn transfer(&self) -> &DragTransfer {
        &self.transfer
    }

    /// Replace the carried transfer, e.g. with a foreign payload.
    pub fn set_transfer(&mut self, transfer: DragTransfer) {
        self.transfer = transfer;
    }

    /// The attached detector.
    #[must_use]
    pub fn detector(&self) -> Option<&AcceptanceFlickerDetector> {
        self.detector.as_ref()
    }

    /// Take the attached detector.
    pub fn take_detector(&mut self) -> Option<AcceptanceFlickerDetector> {
        self.detector.take()
    }

    fn observe<P>(&mut self, session: &Session<P>) {
        if let Some(detector) = self.detector.as_mut() {
            detector.observe(self.now, session.state());
        }
    }

    /// Advance the clock and run any due acceptance check.
    pub fn advance<P>(&mut self, session: &mut Session<P>, by: Duration) -> bool {
        self.now += by;
        let released = session.poll(self.now);
        self.observe(session);
        released
    }

    /// Advance past the settle window.
    pub fn settle<P>(&mut self, session: &mut Session<P>) -> bool {
        let settle = session.config().acceptance_settle;
        self.advance(session, settle)
    }

    /// Native drag start followed by the first motion at `at`.
    pub fn pick_up<P, S: Surface + ?Sized>(
        &mut self,
        session: &mut Session<P>,
        card: &DraggableBinding,
        surface: &S,
        at: Point,
    ) -> Result<Disposition, ConfigError> {
        self.transfer = DragTransfer::new();
        let disposition = session.drag_start(card, surface, &mut self.transfer)?;
        if disposition != Disposition::REJECTED {
            self.pointer = at;
            session.drag(card, at)?;
        }
        self.observe(session);
        Ok(disposition)
    }

    /// One native signal on a droppable at `at`.
    pub fn signal<P, S: Surface + ?Sized>(
        &mut self,
        session: &mut Session<P>,
        region: &DroppableBinding,
        kind: NativeDragKind,
        at: Point,
        surface: &S,
    ) -> Result<Disposition, ConfigError> {
        self.pointer = at;
        session.track_pointer(at);
        let disposition = session.droppable_event(region, kind, at, &self.transfer, surface, self.now)?;
        self.observe(session);
        Ok(disposition)
    }

    /// Enter `region` and move over it to `at`.
    pub fn enter<P, S: Surface + ?Sized>(
        &mut self,
        session: &mut Session<P>,
        region: &DroppableBinding,
        at: Point,
        surface: &S,
    ) -> Result<Disposition, ConfigError> {
        self.signal(session, region, NativeDragKind::Enter, at, surface)?;
        self.signal(session, region, NativeDragKind::Over, at, surface)
    }

    /// Leave `region`.
    pub fn leave<P, S: Surface + ?Sized>(
        &mut self,
        session: &mut Session<P>,
        region: &DroppableBinding,
        surface: &S,
    ) -> Result<Disposition, ConfigError> {
        let at = self.pointer;
        self.signal(session, region, NativeDragKind::Leave, at, surface)
    }

    /// Motion of the dragged card to `at` while over `region`.
    pub fn move_over<P, S: Surface + ?Sized>(
        &mut self,
        session: &mut Session<P>,
        card: &DraggableBinding,
        region: &DroppableBinding,
        at: Point,
        surface: &S,
    ) -> Result<Disposition, ConfigError> {
        session.drag(card, at)?;
        self.signal(session, region, NativeDragKind::Over, at, surface)
    }

    /// Drop on `region` at the last pointer position, then end the drag.
    pub fn release<P, S: Surface + ?Sized>(
        &mut self,
        session: &mut Session<P>,
        card: &DraggableBinding,
        region: &DroppableBinding,
        surface: &S,
    ) -> Result<Disposition, ConfigError> {
        let at = self.pointer;
        let disposition = self.signal(session, region, NativeDragKind::Drop, at, surface)?;
        session.drag_end(card)?;
        self.transfer = DragTransfer::new();
        self.observe(session);
        Ok(disposition)
    }

    /// End the drag without dropping.
    pub fn cancel<P>(&mut self, session: &mut Session<P>, card: &DraggableBinding) -> Result<(), ConfigError> {
        session.drag_end(card)?;
        self.transfer = DragTransfer::new();
        self.observe(session);
        Ok(())
    }
}

/// Collects drop results for assertions.
pub type DropSink = std::rc::Rc<std::cell::RefCell<Vec<DropResult>>>;

/// A callback that appends every result to `sink`.
pub fn record_into(sink: &DropSink) -> impl FnMut(&DropResult) + 'static {
    let sink = std::rc::Rc::clone(sink);
    move |result| sink.borrow_mut().push(result.clone())
}
