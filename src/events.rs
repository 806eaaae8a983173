// SnapScore — Samples, Events & Commands

use serde::Serialize;

use crate::config::Settings;

// ---------------------------------------------------------------------------
// Sensor data (one reading of the watch's x-axis gyro)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    /// Monotonic seconds. Non-decreasing within one stream.
    pub time: f64,
    /// Signed angular velocity, before orientation correction.
    pub rotation_rate: f64,
    pub accel_magnitude: f64,
}

impl Sample {
    pub fn new(time: f64, rotation_rate: f64, accel_magnitude: f64) -> Self {
        Self {
            time,
            rotation_rate,
            accel_magnitude,
        }
    }
}

/// A sample captured verbatim while calibrating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSample {
    pub time: f64,
    pub rotation_rate: f64,
    pub accel_magnitude: f64,
}

impl From<&Sample> for CalibrationSample {
    fn from(sample: &Sample) -> Self {
        Self {
            time: sample.time,
            rotation_rate: sample.rotation_rate,
            accel_magnitude: sample.accel_magnitude,
        }
    }
}

// ---------------------------------------------------------------------------
// Gesture output
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// A lone snap, or a pending snap that timed out unpaired.
    Primary,
    /// Two snaps paired inside the double window.
    Secondary,
}

impl GestureEvent {
    pub fn score_event(&self) -> ScoreEvent {
        match self {
            Self::Primary => ScoreEvent::Player,
            Self::Secondary => ScoreEvent::Opponent,
        }
    }

    pub fn haptic_pattern(&self) -> HapticPattern {
        match self {
            Self::Primary => HapticPattern::Single,
            Self::Secondary => HapticPattern::Double,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreEvent {
    Player,
    Opponent,
}

impl ScoreEvent {
    pub fn haptic_pattern(&self) -> HapticPattern {
        match self {
            Self::Player => HapticPattern::Single,
            Self::Opponent => HapticPattern::Double,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticPattern {
    Single,
    Double,
}

// ---------------------------------------------------------------------------
// Commands — everything funnelled onto the gesture task's channel
// ---------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub enum Command {
    /// New sensor reading.
    Sample(Sample),
    /// Replace thresholds and orientation (resets detector timing state).
    UpdateSettings(Settings),
    StartCalibration,
    FinishCalibration,
    IncrementPlayer,
    IncrementOpponent,
    Undo,
    ResetScores,
}
