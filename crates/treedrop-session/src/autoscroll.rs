#![forbid(unsafe_code)]

//! Edge auto-scroll during a drag.
//!
//! While a drag is active and the pointer sits within `distance` of a
//! scrollable droppable's edge, each animation frame nudges the scroll offset.
//! The nudge is `curve(n)` where `n` is the pointer's distance to that edge
//! divided by `distance` (0 at the edge, 1 at the threshold). Axes are
//! independent.
//!
//! # Loop Lifecycle
//!
//! The host drives frames. [`AutoScroller::start`] arms a loop once (a second
//! start while running is refused); [`AutoScroller::frame`] checks the stop
//! conditions first and disarms itself when the drag ended, the pointer left,
//! or the feature is off.

use std::fmt;
use std::rc::Rc;

use treedrop_core::{ConfigError, Point};

use crate::surface::ScrollFrame;

/// Peak nudge, in pixels per frame, of the default curve.
pub const DEFAULT_MAX_SCROLL_SPEED: f64 = 20.0;

/// Default edge threshold, in pixels.
pub const DEFAULT_SCROLL_DISTANCE: f64 = 60.0;

/// Scroll speed as a function of normalized edge distance.
#[derive(Clone)]
pub struct ScrollCurve(Rc<dyn Fn(f64) -> f64>);

impl ScrollCurve {
    /// Wrap an arbitrary curve.
    pub fn new(curve: impl Fn(f64) -> f64 + 'static) -> Self {
        Self(Rc::new(curve))
    }

    /// `max * (1 - n)^4`: negligible far from the edge, strong near it.
    #[must_use]
    pub fn steep(max: f64) -> Self {
        Self::new(move |n| max * (1.0 - n).powi(4))
    }

    /// Same speed everywhere inside the threshold.
    #[must_use]
    pub fn constant(speed: f64) -> Self {
        Self::new(move |_| speed)
    }

    /// Evaluate at `normalized`, clamped to `0..=1`. Non-finite results are 0.
    #[must_use]
    pub fn eval(&self, normalized: f64) -> f64 {
        let speed = (self.0)(normalized.clamp(0.0, 1.0));
        if speed.is_finite() { speed.max(0.0) } else { 0.0 }
    }
}

impl Default for ScrollCurve {
    fn default() -> Self {
        Self::steep(DEFAULT_MAX_SCROLL_SPEED)
    }
}

impl fmt::Debug for ScrollCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollCurve")
            .field("at_edge", &self.eval(0.0))
            .finish()
    }
}

/// Per-droppable auto-scroll settings.
#[derive(Debug, Clone)]
pub struct AutoScrollConfig {
    /// Whether the droppable auto-scrolls.
    pub enabled: bool,
    /// Edge threshold in pixels.
    pub distance: f64,
    /// Horizontal speed curve.
    pub speed_x: ScrollCurve,
    /// Vertical speed curve.
    pub speed_y: ScrollCurve,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            distance: DEFAULT_SCROLL_DISTANCE,
            speed_x: ScrollCurve::default(),
            speed_y: ScrollCurve::default(),
        }
    }
}

impl AutoScrollConfig {
    /// Enabled with default curves.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Set the edge threshold.
    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Set the horizontal curve.
    #[must_use]
    pub fn with_speed_x(mut self, curve: ScrollCurve) -> Self {
        self.speed_x = curve;
        self
    }

    /// Set the vertical curve.
    #[must_use]
    pub fn with_speed_y(mut self, curve: ScrollCurve) -> Self {
        self.speed_y = curve;
        self
    }

    /// Validate settings and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if !(self.distance.is_finite() && self.distance > 0.0) {
            errors.push(ConfigError::invalid(
                "auto_scroll.distance",
                self.distance.to_string(),
                "must be a positive number of pixels",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Nudge for `pointer` inside `frame`, or `(0, 0)` away from the edges.
    #[must_use]
    pub fn velocity(&self, pointer: Point, frame: &ScrollFrame) -> (f64, f64) {
        (
            self.axis_velocity(pointer, frame, true),
            self.axis_velocity(pointer, frame, false),
        )
    }

    fn axis_velocity(&self, pointer: Point, frame: &ScrollFrame, horizontal: bool) -> f64 {
        let rect = frame.rect;
        let (curve, to_start, to_end, offset, max) = if horizontal {
            (
                &self.speed_x,
                pointer.x - rect.left(),
                rect.right() - pointer.x,
                frame.scroll_x,
                frame.max_scroll_x,
            )
        } else {
            (
                &self.speed_y,
                pointer.y - rect.top(),
                rect.bottom() - pointer.y,
                frame.scroll_y,
                frame.max_scroll_y,
            )
        };
        let within = |gap: f64| (0.0..self.distance).contains(&gap);
        if within(to_start) && frame.can_scroll_back(horizontal) {
            -curve.eval(to_start / self.distance).min(offset)
        } else if within(to_end) && frame.can_scroll_forward(horizontal) {
            curve.eval(to_end / self.distance).min(max - offset)
        } else {
            0.0
        }
    }
}

/// Outcome of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollStep {
    /// The loop is over; do not request another frame for it.
    Stopped,
    /// Apply this nudge and request another frame.
    Nudge {
        /// Horizontal delta.
        dx: f64,
        /// Vertical delta.
        dy: f64,
    },
}

/// Per-droppable frame loop state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoScroller {
    started: bool,
    hovering: bool,
}

impl AutoScroller {
    /// Whether a loop is running.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the pointer hovers the droppable.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Record hover state.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Arm the loop. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    /// Disarm the loop and forget hover state.
    pub fn stop(&mut self) {
        self.started = false;
        self.hovering = false;
    }

    /// Run one frame.
    pub fn frame(
        &mut self,
        config: &AutoScrollConfig,
        dragging: bool,
        pointer: Point,
        frame: Option<ScrollFrame>,
    ) -> ScrollStep {
        if !self.started || !config.enabled || !dragging || !self.hovering {
            self.started = false;
            return ScrollStep::Stopped;
        }
        let Some(frame) = frame else {
            self.started = false;
            return ScrollStep::Stopped;
        };
        let (dx, dy) = config.velocity(pointer, &frame);
        ScrollStep::Nudge { dx, dy }
    }
}
