//! # Overtally Core Library
//!
//! This library provides the core logic for Overtally, a cricket over-tally
//! counter. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any graphical front end being
//! a thin presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Over Tracker**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` so deferred effects can fire
//! - **Events**: Every state change produces an [`Event`]; presentation
//!   layers poll snapshots and feedback collaborators subscribe
//! - **Scoreboard**: Textual rendering of tracker state for display
//!   collaborators
//! - **Storage**: TOML-based configuration (timing, feedback, display);
//!   match state itself is never persisted
//!
//! ## Key Components
//!
//! - [`OverTracker`]: Core over-tally state machine
//! - [`Delivery`]: Closed set of per-ball event codes
//! - [`Feedback`]: Trait for sound/vibration collaborators
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod feedback;
pub mod over;
pub mod scoreboard;
pub mod storage;

pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use feedback::{Feedback, NullFeedback};
pub use over::{Delivery, OverPhase, OverState, OverTracker, ResetDelays, BALLS_PER_OVER};
pub use scoreboard::Scoreboard;
pub use storage::Config;
