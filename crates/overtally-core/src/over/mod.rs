mod delivery;
mod tracker;

pub use delivery::Delivery;
pub use tracker::{OverPhase, OverState, OverTracker, ResetDelays, BALLS_PER_OVER};
