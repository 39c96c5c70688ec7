#![forbid(unsafe_code)]

//! Acceptance flicker detection.
//!
//! Records the session's "some droppable accepts the payload" flag over
//! time and reports any loss followed by a regain within a short window.
//! Moving between adjacent droppables should never show one: the epoch
//! arbiter keeps acceptance until a settle window passes with no new claim.
//!
//! # Detection Rules
//!
//! 1. **Gain**: flag went from false to true.
//! 2. **Loss**: flag went from true to false.
//! 3. **Flicker**: a gain within `window` of the previous loss.
//!
//! # JSONL Logging Schema
//!
//! ```json
//! {
//!   "run_id": "kanban-01",
//!   "offset_ms": 120,
//!   "event_type": "acceptance_gained|acceptance_lost|flicker|analysis_complete",
//!   "severity": "info|warning|error",
//!   "epoch": 3,
//!   "message": "...",
//!   "stats": { ... only on analysis_complete ... }
//! }
//! ```

use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::time::{Duration, Instant};

use serde_json::json;
use treedrop_session::DragSessionState;

// ============================================================================
// Core Types
// ============================================================================

/// Severity level for acceptance events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Ordinary transition.
    Info,
    /// Suspicious but not user visible.
    Warning,
    /// Visible flicker.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Kind of acceptance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Acceptance went on.
    AcceptanceGained,
    /// Acceptance went off.
    AcceptanceLost,
    /// Acceptance came back on shortly after going off.
    Flicker,
    /// Summary.
    AnalysisComplete,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AcceptanceGained => write!(f, "acceptance_gained"),
            Self::AcceptanceLost => write!(f, "acceptance_lost"),
            Self::Flicker => write!(f, "flicker"),
            Self::AnalysisComplete => write!(f, "analysis_complete"),
        }
    }
}

/// Statistics from a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Observations recorded.
    pub samples: u64,
    /// Off to on transitions.
    pub gains: u64,
    /// On to off transitions.
    pub losses: u64,
    /// Gains within the window of a loss.
    pub flickers: u64,
}

impl AnalysisStats {
    /// Returns true if no flicker was seen.
    #[must_use]
    pub fn is_flicker_free(&self) -> bool {
        self.flickers == 0
    }
}

/// A recorded acceptance event.
#[derive(Debug, Clone)]
pub struct FlickerEvent {
    /// Run identifier.
    pub run_id: String,
    /// Milliseconds since the first observation.
    pub offset_ms: u64,
    /// Kind of event.
    pub event_type: EventType,
    /// Severity level.
    pub severity: Severity,
    /// Acceptance epoch at the time of the event.
    pub epoch: u64,
    /// Description.
    pub message: String,
    /// Summary, on `AnalysisComplete` only.
    pub stats: Option<AnalysisStats>,
}

impl FlickerEvent {
    /// Convert to a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = json!({
            "run_id": self.run_id,
            "offset_ms": self.offset_ms,
            "event_type": self.event_type.to_string(),
            "severity": self.severity.to_string(),
            "epoch": self.epoch,
            "message": self.message,
        });
        if let Some(stats) = self.stats {
            value["stats"] = json!({
                "samples": stats.samples,
                "gains": stats.gains,
                "losses": stats.losses,
                "flickers": stats.flickers,
                "flicker_free": stats.is_flicker_free(),
            });
        }
        value
    }

    /// Convert to JSONL format.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        self.to_json().to_string()
    }
}

// ============================================================================
// Detector
// ============================================================================

/// Default flicker window.
pub const DEFAULT_FLICKER_WINDOW: Duration = Duration::from_millis(250);

/// Acceptance flicker analyzer.
#[derive(Debug, Clone)]
pub struct AcceptanceFlickerDetector {
    run_id: String,
    window: Duration,
    started: Option<Instant>,
    accepting: bool,
    last_loss: Option<Instant>,
    events: Vec<FlickerEvent>,
    stats: AnalysisStats,
}

impl AcceptanceFlickerDetector {
    /// Create a detector with the default window.
    pub fn new(run_id: impl Into<String>) -> Self {
        Self::with_window(run_id, DEFAULT_FLICKER_WINDOW)
    }

    /// Create a detector that flags regains within `window` of a loss.
    pub fn with_window(run_id: impl Into<String>, window: Duration) -> Self {
        Self {
            run_id: run_id.into(),
            window,
            started: None,
            accepting: false,
            last_loss: None,
            events: Vec::new(),
            stats: AnalysisStats::default(),
        }
    }

    /// Run identifier.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Recorded events.
    #[must_use]
    pub fn events(&self) -> &[FlickerEvent] {
        &self.events
    }

    /// Run statistics.
    #[must_use]
    pub fn stats(&self) -> &AnalysisStats {
        &self.stats
    }

    /// Whether no flicker was seen so far.
    #[must_use]
    pub fn is_flicker_free(&self) -> bool {
        self.stats.is_flicker_free()
    }

    /// Observe a session state at `now`.
    pub fn observe(&mut self, now: Instant, state: &DragSessionState) {
        self.observe_value(now, state.is_any_container_accepting(), state.acceptance_epoch());
    }

    /// Observe a raw acceptance flag at `now`.
    pub fn observe_value(&mut self, now: Instant, accepting: bool, epoch: u64) {
        let started = *self.started.get_or_insert(now);
        let offset_ms = u64::try_from(now.saturating_duration_since(started).as_millis()).unwrap_or(u64::MAX);
        self.stats.samples += 1;

        if accepting == self.accepting {
            return;
        }
        self.accepting = accepting;

        if accepting {
            self.stats.gains += 1;
            self.emit(offset_ms, EventType::AcceptanceGained, Severity::Info, epoch, "acceptance gained".into());
            if let Some(lost) = self.last_loss
                && now.saturating_duration_since(lost) < self.window
            {
                self.stats.flickers += 1;
                let gap = now.saturating_duration_since(lost).as_millis();
                self.emit(
                    offset_ms,
                    EventType::Flicker,
                    Severity::Error,
                    epoch,
                    format!("acceptance regained {gap}ms after it was lost"),
                );
            }
        } else {
            self.stats.losses += 1;
            self.last_loss = Some(now);
            self.emit(offset_ms, EventType::AcceptanceLost, Severity::Info, epoch, "acceptance lost".into());
        }
    }

    fn emit(&mut self, offset_ms: u64, event_type: EventType, severity: Severity, epoch: u64, message: String) {
        self.events.push(FlickerEvent {
            run_id: self.run_id.clone(),
            offset_ms,
            event_type,
            severity,
            epoch,
            message,
            stats: None,
        });
    }

    /// Append the summary event.
    pub fn finalize(&mut self) {
        let offset_ms = self.events.last().map_or(0, |e| e.offset_ms);
        let severity = if self.is_flicker_free() { Severity::Info } else { Severity::Error };
        self.events.push(FlickerEvent {
            run_id: self.run_id.clone(),
            offset_ms,
            event_type: EventType::AnalysisComplete,
            severity,
            epoch: 0,
            message: format!("{} samples, {} flickers", self.stats.samples, self.stats.flickers),
            stats: Some(self.stats),
        });
    }

    /// Write all events to a writer in JSONL format.
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for event in &self.events {
            writeln!(writer, "{}", event.to_jsonl())?;
        }
        Ok(())
    }

    /// Get JSONL output as a string.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&event.to_jsonl());
            out.push('\n');
        }
        out
    }

    /// Panic with a readable report if any flicker was recorded.
    pub fn assert_flicker_free(&self) {
        if self.is_flicker_free() {
            return;
        }
        let mut msg = String::new();
        msg.push_str("\n=== Acceptance Flicker Detected ===\n\n");
        let _ = writeln!(msg, "Gains: {}", self.stats.gains);
        let _ = writeln!(msg, "Losses: {}", self.stats.losses);
        let _ = writeln!(msg, "Flickers: {}", self.stats.flickers);
        msg.push_str("\nIssues:\n");
        for event in self.events.iter().filter(|e| e.severity == Severity::Error) {
            let _ = writeln!(msg, "  - [{}] {} at {}ms: {}", event.severity, event.event_type, event.offset_ms, event.message);
        }
        msg.push_str("\nFull JSONL log:\n");
        msg.push_str(&self.to_jsonl());
        panic!("{msg}");
    }
}

// ============================================================================
// Tests
// ============================================================================
