pub mod calibration;
pub mod engine;
pub mod window;

pub use calibration::{derive_settings, CalibrationResult, CalibrationSession, CalibrationState};
pub use engine::EventDetector;
pub use window::{is_low_activity, SignalWindow};
