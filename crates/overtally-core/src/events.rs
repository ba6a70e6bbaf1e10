use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::over::{Delivery, OverPhase};

/// Every state change in the tracker produces an Event.
/// Display collaborators poll snapshots; feedback collaborators subscribe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A legal delivery went into the tally.
    DeliveryRecorded {
        delivery: Delivery,
        balls_bowled: u8,
        at: DateTime<Utc>,
    },
    /// A wide or no-ball went into the event log without consuming a ball.
    ExtraRecorded {
        delivery: Delivery,
        balls_bowled: u8,
        at: DateTime<Utc>,
    },
    /// Deferred completion confirmation, fired after the sixth legal ball.
    /// Distinguishes a maiden over from a normal one.
    OverCompleted { maiden: bool, at: DateTime<Utc> },
    UndoApplied {
        balls_bowled: u8,
        at: DateTime<Utc>,
    },
    /// The tally returned to a fresh over, manually or via the automatic
    /// reset deadline.
    OverReset {
        completed_overs: u32,
        auto: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: OverPhase,
        balls_bowled: u8,
        completed_overs: u32,
        events: Vec<Delivery>,
        maiden: bool,
        at: DateTime<Utc>,
    },
}
