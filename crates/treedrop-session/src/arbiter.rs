#![forbid(unsafe_code)]

//! Acceptance arbitration between overlapping droppables.
//!
//! Native enter/leave pairs across sibling or nested regions arrive in an
//! unreliable order: the region being left often reports its leave after the
//! region being entered reported its enter. Clearing "someone accepts" on
//! every leave would flicker the drop cursor.
//!
//! Instead, every accepting signal bumps a monotonic epoch. A leave schedules
//! a deferred check that records the epoch it saw; when the check comes due
//! it only releases acceptance if nobody has claimed since.
//!
//! # Invariants
//!
//! 1. `epoch` never decreases.
//! 2. At most one check is pending; scheduling replaces the previous one.
//! 3. A due check releases iff `epoch == pending.epoch`.
//!
//! # Failure Modes
//!
//! - Host never polls: acceptance stays claimed until the session resets.
//! - Clock moves backwards: the pending check simply stays pending longer.
//! - Settle window past the clock's range: the check is due immediately.

use std::time::{Duration, Instant};

/// Default settle window before a leave may release acceptance.
pub const DEFAULT_ACCEPTANCE_SETTLE: Duration = Duration::from_millis(100);

/// A scheduled acceptance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRelease {
    /// When the check runs.
    pub due: Instant,
    /// Epoch observed when the check was scheduled.
    pub epoch: u64,
}

/// What a due check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No claim since scheduling; acceptance cleared.
    Released,
    /// A newer claim arrived; nothing changed.
    Superseded,
}

/// Epoch-based acceptance tracker.
#[derive(Debug, Clone)]
pub struct AcceptanceArbiter {
    epoch: u64,
    accepting: bool,
    settle: Duration,
    pending: Option<PendingRelease>,
}

impl Default for AcceptanceArbiter {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTANCE_SETTLE)
    }
}

impl AcceptanceArbiter {
    /// Create an arbiter with the given settle window.
    #[must_use]
    pub fn new(settle: Duration) -> Self {
        Self {
            epoch: 0,
            accepting: false,
            settle,
            pending: None,
        }
    }

    /// Current epoch.
    #[inline]
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether any droppable currently claims acceptance.
    #[inline]
    #[must_use]
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Settle window.
    #[must_use]
    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// The pending check, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingRelease> {
        self.pending
    }

    /// Record an accepting signal. Returns the new epoch.
    pub fn claim(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.accepting = true;
        self.epoch
    }

    /// Schedule a deferred check at `now + settle`, replacing any pending one.
    ///
    /// A settle window the clock cannot represent comes due at `now`.
    pub fn schedule_release(&mut self, now: Instant) -> PendingRelease {
        let pending = PendingRelease {
            due: now.checked_add(self.settle).unwrap_or(now),
            epoch: self.epoch,
        };
        self.pending = Some(pending);
        pending
    }

    /// Run the pending check if it is due.
    ///
    /// Returns `None` when nothing was due.
    pub fn poll(&mut self, now: Instant) -> Option<ReleaseOutcome> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;
        if self.epoch == pending.epoch {
            self.accepting = false;
            Some(ReleaseOutcome::Released)
        } else {
            Some(ReleaseOutcome::Superseded)
        }
    }

    /// When the pending check comes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Drop any pending check and clear acceptance. The epoch is kept.
    pub fn reset(&mut self) {
        self.pending = None;
        self.accepting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn claim_bumps_epoch_and_accepts() {
        let mut a = AcceptanceArbiter::default();
        assert_eq!(a.claim(), 1);
        assert_eq!(a.claim(), 2);
        assert!(a.is_accepting());
    }

    #[test]
    fn release_after_settle_without_new_claim() {
        let t0 = Instant::now();
        let mut a = AcceptanceArbiter::default();
        a.claim();
        a.schedule_release(t0);
        assert_eq!(a.poll(t0 + 99 * MS), None);
        assert!(a.is_accepting());
        assert_eq!(a.poll(t0 + 100 * MS), Some(ReleaseOutcome::Released));
        assert!(!a.is_accepting());
        assert_eq!(a.next_deadline(), None);
    }

    #[test]
    fn newer_claim_supersedes_pending_check() {
        let t0 = Instant::now();
        let mut a = AcceptanceArbiter::default();
        a.claim();
        let pending = a.schedule_release(t0);
        assert_eq!(pending.epoch, 1);
        a.claim();
        assert_eq!(a.poll(t0 + 150 * MS), Some(ReleaseOutcome::Superseded));
        assert!(a.is_accepting());
    }

    #[test]
    fn rescheduling_replaces_previous_check() {
        let t0 = Instant::now();
        let mut a = AcceptanceArbiter::default();
        a.claim();
        a.schedule_release(t0);
        a.schedule_release(t0 + 50 * MS);
        assert_eq!(a.next_deadline(), Some(t0 + 150 * MS));
        assert_eq!(a.poll(t0 + 120 * MS), None);
        assert_eq!(a.poll(t0 + 150 * MS), Some(ReleaseOutcome::Released));
    }

    #[test]
    fn unrepresentable_settle_comes_due_immediately() {
        let t0 = Instant::now();
        let mut a = AcceptanceArbiter::new(Duration::MAX);
        a.claim();
        assert_eq!(a.schedule_release(t0).due, t0);
        assert_eq!(a.poll(t0), Some(ReleaseOutcome::Released));
    }

    #[test]
    fn reset_keeps_epoch() {
        let t0 = Instant::now();
        let mut a = AcceptanceArbiter::new(10 * MS);
        a.claim();
        a.schedule_release(t0);
        a.reset();
        assert_eq!(a.epoch(), 1);
        assert!(!a.is_accepting());
        assert_eq!(a.poll(t0 + 20 * MS), None);
    }
}
