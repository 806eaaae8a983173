//! SnapScore — wrist-snap score keeping.
//!
//! Classifies a stream of single-axis rotation-rate samples from a watch into
//! two gestures: a lone snap (player point) and a paired double snap
//! (opponent point). Detection is gated on a near-rest rolling variance,
//! pairing uses a strict min/max interval, and a refractory period keeps one
//! motion from scoring twice. A calibration pass derives personal thresholds
//! from a short recording.
//!
//! The engine is synchronous and allocation-bounded: feed it
//! [`events::Sample`]s one at a time from a single thread and it returns at
//! most one [`events::GestureEvent`] per sample.

pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod gesture;
pub mod scoring;
pub mod session;
pub mod tasks;

pub use config::{GestureConfig, Orientation, Settings};
pub use error::ConfigurationError;
pub use events::{Command, GestureEvent, Sample};
pub use gesture::{derive_settings, CalibrationResult, EventDetector};
pub use session::ScoringSession;
