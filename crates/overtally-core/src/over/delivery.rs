use serde::{Deserialize, Serialize};

/// Per-ball event code.
///
/// A closed set: the tracker never sees free-form strings. Each code knows
/// whether it consumes one of the over's six legal deliveries and what its
/// scoreboard label looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    /// Legal ball, no runs.
    Dot,
    /// Legal ball scoring 1..=6 runs off the bat.
    Runs(u8),
    Wide,
    NoBall,
    Wicket,
    Bye,
}

impl Delivery {
    /// Validated constructor for a run-scoring ball.
    pub fn runs(n: u8) -> Option<Self> {
        if (1..=6).contains(&n) {
            Some(Delivery::Runs(n))
        } else {
            None
        }
    }

    /// Whether this code consumes one of the over's six legal deliveries.
    ///
    /// Wides and no-balls do not; wickets and byes do. This mirrors the
    /// simplified tally rules rather than the full laws of cricket.
    pub fn counts_toward_over(&self) -> bool {
        !matches!(self, Delivery::Wide | Delivery::NoBall)
    }

    /// Scoreboard label for the event log.
    pub fn label(&self) -> String {
        match self {
            Delivery::Dot => ".".to_string(),
            Delivery::Runs(n) => n.to_string(),
            Delivery::Wide => "Wd".to_string(),
            Delivery::NoBall => "Nb".to_string(),
            Delivery::Wicket => "X".to_string(),
            Delivery::Bye => "B".to_string(),
        }
    }
}
