// SnapScore — Haptic Feedback
//
// The watch buzzes once for a player point and twice for an opponent point.
// Actual motor control belongs to the platform; the host build only logs.

use std::time::Duration;

use crate::events::HapticPattern;

pub const PULSE: Duration = Duration::from_millis(50);
pub const PULSE_GAP: Duration = Duration::from_millis(80);

pub trait HapticFeedback {
    fn play(&mut self, pattern: HapticPattern);
}

impl HapticPattern {
    pub fn pulses(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// Stand-in for the motor when running off-device.
#[derive(Debug, Default)]
pub struct LogHaptics {
    played: u64,
}

impl LogHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}

impl HapticFeedback for LogHaptics {
    fn play(&mut self, pattern: HapticPattern) {
        self.played += 1;
        log::debug!(
            "Haptic {:?}: {} x {} ms pulse ({} ms gap)",
            pattern,
            pattern.pulses(),
            PULSE.as_millis(),
            PULSE_GAP.as_millis()
        );
    }
}
