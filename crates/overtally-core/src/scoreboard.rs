//! Display collaborator: textual scoreboard rendering.
//!
//! The scoreboard holds presentation settings only; all match state stays
//! in the tracker and is read by reference.

use crate::over::{OverPhase, OverTracker, BALLS_PER_OVER};

#[derive(Debug, Clone)]
pub struct Scoreboard {
    /// Separator between entries in the event log line.
    pub log_separator: String,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            log_separator: " ".to_string(),
        }
    }
}

impl Scoreboard {
    pub fn new(log_separator: impl Into<String>) -> Self {
        Self {
            log_separator: log_separator.into(),
        }
    }

    /// `"<balls> / 6"` while the over runs, `"OVER"` or `"MAIDEN"` once it
    /// closed.
    pub fn ball_counter(&self, tracker: &OverTracker) -> String {
        match tracker.phase() {
            OverPhase::InProgress => {
                format!("{} / {}", tracker.balls_bowled(), BALLS_PER_OVER)
            }
            _ if tracker.is_maiden() => "MAIDEN".to_string(),
            _ => "OVER".to_string(),
        }
    }

    /// `"<completed_overs>.<balls mod 6>"`.
    pub fn over_counter(&self, tracker: &OverTracker) -> String {
        format!(
            "{}.{}",
            tracker.completed_overs(),
            tracker.balls_bowled() % BALLS_PER_OVER
        )
    }

    /// Ordered labels of every event this over.
    pub fn event_log(&self, tracker: &OverTracker) -> String {
        tracker
            .events()
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(&self.log_separator)
    }

    /// Full scoreboard: counters on one line, the event log below it when
    /// there is one.
    pub fn render(&self, tracker: &OverTracker) -> String {
        let header = format!(
            "Over {}  [{}]",
            self.over_counter(tracker),
            self.ball_counter(tracker)
        );
        let log = self.event_log(tracker);
        if log.is_empty() {
            header
        } else {
            format!("{header}\n{log}")
        }
    }
}
