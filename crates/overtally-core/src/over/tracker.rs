//! Over-tally state machine.
//!
//! The tracker is a wall-clock-based state machine. It owns no threads and
//! sets no OS timers - mutating calls that schedule deferred effects take
//! `now`, and the caller is responsible for calling `tick()` periodically so
//! due deadlines can fire.
//!
//! ## State Transitions
//!
//! ```text
//! InProgress -> Completed -> AwaitingReset -> InProgress
//! ```
//!
//! `undo()` returns to `InProgress` from any phase and cancels both pending
//! deadlines.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = OverTracker::new();
//! tracker.record(Delivery::Dot, Utc::now());
//! // In a loop:
//! tracker.tick(Utc::now()); // Returns Some(Event) when a deadline fires
//! ```

use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::delivery::Delivery;
use crate::events::Event;

/// Legal deliveries in a complete over.
pub const BALLS_PER_OVER: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverPhase {
    /// Fewer than six legal balls bowled; deliveries are accepted.
    InProgress,
    /// Sixth legal ball bowled, completion confirmation still pending.
    Completed,
    /// Confirmation fired; automatic reset scheduled.
    AwaitingReset,
}

/// Point-in-time view of the tally, consumed by display collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverState {
    pub balls_bowled: u8,
    pub events: Vec<Delivery>,
    pub completed_overs: u32,
}

/// The tally as it was before one mutation. Popped on undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct HistorySnapshot {
    balls_bowled: u8,
    events: Vec<Delivery>,
}

/// Delays between the sixth legal ball and the two deferred effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetDelays {
    /// Completion confirmation (the "OVER"/"MAIDEN" notification).
    pub confirmation_ms: u64,
    /// Automatic advance to a fresh over.
    pub auto_reset_ms: u64,
}

impl Default for ResetDelays {
    fn default() -> Self {
        Self {
            confirmation_ms: 1_000,
            auto_reset_ms: 3_000,
        }
    }
}

/// Core over-tally state machine.
///
/// Holds the current over's progress, the per-ball event log, the undo
/// stack, and at most one pending confirmation plus at most one pending
/// auto-reset deadline. Invalid operations are silent no-ops returning
/// `None`; no tracker operation fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverTracker {
    balls_bowled: u8,
    events: Vec<Delivery>,
    completed_overs: u32,
    phase: OverPhase,
    history: Vec<HistorySnapshot>,
    delays: ResetDelays,
    /// Deferred completion notification, owned by the current over.
    #[serde(default)]
    confirmation_at: Option<DateTime<Utc>>,
    /// Deferred automatic reset, owned by the current over.
    #[serde(default)]
    auto_reset_at: Option<DateTime<Utc>>,
}

impl OverTracker {
    pub fn new() -> Self {
        Self::with_delays(ResetDelays::default())
    }

    pub fn with_delays(delays: ResetDelays) -> Self {
        Self {
            balls_bowled: 0,
            events: Vec::new(),
            completed_overs: 0,
            phase: OverPhase::InProgress,
            history: Vec::new(),
            delays,
            confirmation_at: None,
            auto_reset_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> OverPhase {
        self.phase
    }

    pub fn balls_bowled(&self) -> u8 {
        self.balls_bowled
    }

    pub fn completed_overs(&self) -> u32 {
        self.completed_overs
    }

    pub fn events(&self) -> &[Delivery] {
        &self.events
    }

    /// Mutations applied since the last over boundary.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn pending_confirmation(&self) -> Option<DateTime<Utc>> {
        self.confirmation_at
    }

    pub fn pending_auto_reset(&self) -> Option<DateTime<Utc>> {
        self.auto_reset_at
    }

    /// Whether the six most recent events are all scoreless legal balls.
    ///
    /// Purely informative - the label never alters state transitions.
    pub fn is_maiden(&self) -> bool {
        self.events.len() >= BALLS_PER_OVER as usize
            && self
                .events
                .iter()
                .rev()
                .take(BALLS_PER_OVER as usize)
                .all(|d| *d == Delivery::Dot)
    }

    pub fn state(&self) -> OverState {
        OverState {
            balls_bowled: self.balls_bowled,
            events: self.events.clone(),
            completed_overs: self.completed_overs,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            balls_bowled: self.balls_bowled,
            completed_overs: self.completed_overs,
            events: self.events.clone(),
            maiden: self.is_maiden(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record a delivery.
    ///
    /// Accepted only while the over is in progress; once the sixth legal
    /// ball is down the over is closed pending reset or undo, and further
    /// deliveries are ignored.
    ///
    /// Every accepted delivery pushes an undo snapshot and appends to the
    /// event log. Codes that count toward the over also increment the ball
    /// tally; the sixth one closes the over and schedules the confirmation
    /// and auto-reset deadlines relative to `now`.
    pub fn record(&mut self, delivery: Delivery, now: DateTime<Utc>) -> Option<Event> {
        if self.phase != OverPhase::InProgress {
            return None;
        }
        self.push_snapshot();
        self.events.push(delivery);
        if delivery.counts_toward_over() {
            self.balls_bowled += 1;
            if self.balls_bowled == BALLS_PER_OVER {
                self.close_over(now);
            }
            Some(Event::DeliveryRecorded {
                delivery,
                balls_bowled: self.balls_bowled,
                at: now,
            })
        } else {
            Some(Event::ExtraRecorded {
                delivery,
                balls_bowled: self.balls_bowled,
                at: now,
            })
        }
    }

    /// Revert the last mutation.
    ///
    /// Valid in any phase. Cancels both pending deadlines before touching
    /// the tally, so an over that was closed goes back to being in
    /// progress. With no snapshot left but a non-zero ball count, the
    /// tally is forced back to a fresh over; with nothing to revert at
    /// all this is a no-op.
    pub fn undo(&mut self) -> Option<Event> {
        match self.history.pop() {
            Some(snap) => {
                self.cancel_pending();
                self.balls_bowled = snap.balls_bowled;
                self.events = snap.events;
                self.phase = OverPhase::InProgress;
                Some(Event::UndoApplied {
                    balls_bowled: self.balls_bowled,
                    at: Utc::now(),
                })
            }
            None if self.balls_bowled > 0 => {
                debug!(
                    "undo with empty history at {} balls, forcing fresh over",
                    self.balls_bowled
                );
                self.cancel_pending();
                self.balls_bowled = 0;
                self.events.clear();
                self.phase = OverPhase::InProgress;
                Some(Event::UndoApplied {
                    balls_bowled: 0,
                    at: Utc::now(),
                })
            }
            None => None,
        }
    }

    /// Manually advance to a fresh over.
    ///
    /// Counts the finished over only if all six legal balls were bowled;
    /// the reset itself is unconditional.
    pub fn new_over(&mut self) -> Option<Event> {
        Some(self.reset_over(false, Utc::now()))
    }

    /// Call periodically. Fires at most one due deadline per call:
    /// the completion confirmation first, then the automatic reset.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.phase == OverPhase::Completed {
            if let Some(due) = self.confirmation_at {
                if now >= due {
                    self.confirmation_at = None;
                    self.phase = OverPhase::AwaitingReset;
                    return Some(Event::OverCompleted {
                        maiden: self.is_maiden(),
                        at: now,
                    });
                }
            }
        }
        if let Some(due) = self.auto_reset_at {
            if now >= due {
                return Some(self.reset_over(true, now));
            }
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn close_over(&mut self, now: DateTime<Utc>) {
        self.phase = OverPhase::Completed;
        self.confirmation_at = Some(now + Duration::milliseconds(self.delays.confirmation_ms as i64));
        self.auto_reset_at = Some(now + Duration::milliseconds(self.delays.auto_reset_ms as i64));
        debug!(
            "over closed after {} balls, auto-reset in {}ms",
            self.balls_bowled, self.delays.auto_reset_ms
        );
    }

    fn push_snapshot(&mut self) {
        self.history.push(HistorySnapshot {
            balls_bowled: self.balls_bowled,
            events: self.events.clone(),
        });
    }

    /// Pending deadlines are cancelled in full before any competing
    /// mutation touches the tally.
    fn cancel_pending(&mut self) {
        self.confirmation_at = None;
        self.auto_reset_at = None;
    }

    fn reset_over(&mut self, auto: bool, at: DateTime<Utc>) -> Event {
        if self.balls_bowled == BALLS_PER_OVER {
            self.completed_overs += 1;
        }
        self.cancel_pending();
        self.balls_bowled = 0;
        self.events.clear();
        self.history.clear();
        self.phase = OverPhase::InProgress;
        Event::OverReset {
            completed_overs: self.completed_overs,
            auto,
            at,
        }
    }
}

impl Default for OverTracker {
    fn default() -> Self {
        Self::new()
    }
}
