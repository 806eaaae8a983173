// SnapScore — Calibration
//
// The user performs a few snaps with detection paused; the recorded rotation
// is reduced to a personal snap threshold (~70th percentile of |rotation|) and
// a rest variance.

use crate::config::{GestureConfig, CALIBRATION_PERCENTILE};
use crate::events::{CalibrationSample, Sample};
use crate::gesture::window::population_variance;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalibrationResult {
    pub single_threshold: Option<f64>,
    pub variance: Option<f64>,
}

impl CalibrationResult {
    /// Overwrite the fields this result carries; leave the rest untouched.
    pub fn apply_to(&self, config: &mut GestureConfig) {
        if let Some(threshold) = self.single_threshold {
            config.single_snap_threshold = threshold;
        }
        if let Some(variance) = self.variance {
            config.low_activity_variance = variance;
        }
    }
}

/// Both fields are `None` exactly when `samples` is empty.
pub fn derive_settings(samples: &[CalibrationSample]) -> CalibrationResult {
    if samples.is_empty() {
        return CalibrationResult::default();
    }

    let mut magnitudes: Vec<f64> = samples.iter().map(|s| s.rotation_rate.abs()).collect();
    magnitudes.sort_by(f64::total_cmp);

    let rank = (magnitudes.len() as f64 * CALIBRATION_PERCENTILE).floor() as usize;
    let index = rank.saturating_sub(1);

    // Spread of the signed signal, not of the magnitudes.
    let variance = population_variance(samples.iter().map(|s| s.rotation_rate));

    CalibrationResult {
        single_threshold: Some(magnitudes[index]),
        variance,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationState {
    Idle,
    Recording,
    Completed,
}

pub struct CalibrationSession {
    state: CalibrationState,
    samples: Vec<CalibrationSample>,
}

impl CalibrationSession {
    pub fn new() -> Self {
        Self {
            state: CalibrationState::Idle,
            samples: Vec::new(),
        }
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == CalibrationState::Recording
    }

    pub fn recorded(&self) -> usize {
        self.samples.len()
    }

    pub fn start(&mut self) {
        self.samples.clear();
        self.state = CalibrationState::Recording;
        log::info!("Calibration recording started");
    }

    pub fn record(&mut self, sample: &Sample) {
        if self.is_recording() {
            self.samples.push(CalibrationSample::from(sample));
        }
    }

    /// Analyse and discard the recording. Finishing a session that was
    /// never started just returns to idle.
    pub fn finish(&mut self) -> Option<CalibrationResult> {
        if !self.is_recording() {
            self.state = CalibrationState::Idle;
            return None;
        }

        let samples = std::mem::take(&mut self.samples);
        let result = derive_settings(&samples);
        self.state = CalibrationState::Completed;
        log::info!(
            "Calibration finished over {} samples: threshold {:?}, variance {:?}",
            samples.len(),
            result.single_threshold,
            result.variance
        );
        Some(result)
    }
}

impl Default for CalibrationSession {
    fn default() -> Self {
        Self::new()
    }
}
