// SnapScore — Gesture & System Configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

// ---------------------------------------------------------------------------
// Gesture defaults (single-axis rotation rate, rad/s; times in seconds)
// ---------------------------------------------------------------------------
pub const DEFAULT_SINGLE_SNAP_THRESHOLD: f64 = 5.5;
pub const DEFAULT_LOW_ACTIVITY_VARIANCE: f64 = 0.15;
pub const DEFAULT_LOW_ACTIVITY_WINDOW_S: f64 = 0.4;
pub const DEFAULT_DOUBLE_MIN_INTERVAL_S: f64 = 0.6;
pub const DEFAULT_DOUBLE_MAX_INTERVAL_S: f64 = 0.9;
pub const DEFAULT_REFRACTORY_PERIOD_S: f64 = 1.2;
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 50.0;

// ---------------------------------------------------------------------------
// Calibration
// ---------------------------------------------------------------------------
pub const CALIBRATION_PERCENTILE: f64 = 0.7; // snap threshold = ~70th pct of |rotation|

// ---------------------------------------------------------------------------
// Host tasks
// ---------------------------------------------------------------------------
pub const THREAD_REPLAY: &str = "replay";
pub const THREAD_GESTURE: &str = "gesture";
pub const STACK_REPLAY: usize = 64 * 1024;
pub const STACK_GESTURE: usize = 64 * 1024;

/// Thresholds driving the snap detector. Swapped as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureConfig {
    pub single_snap_threshold: f64,
    pub low_activity_variance: f64,
    pub low_activity_window: f64,
    pub double_min_interval: f64,
    pub double_max_interval: f64,
    pub refractory_period: f64,
    /// Capture rate requested from the sensor. The detector itself is rate-agnostic.
    pub sample_rate_hint: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            single_snap_threshold: DEFAULT_SINGLE_SNAP_THRESHOLD,
            low_activity_variance: DEFAULT_LOW_ACTIVITY_VARIANCE,
            low_activity_window: DEFAULT_LOW_ACTIVITY_WINDOW_S,
            double_min_interval: DEFAULT_DOUBLE_MIN_INTERVAL_S,
            double_max_interval: DEFAULT_DOUBLE_MAX_INTERVAL_S,
            refractory_period: DEFAULT_REFRACTORY_PERIOD_S,
            sample_rate_hint: DEFAULT_SAMPLE_RATE_HZ,
        }
    }
}

impl GestureConfig {
    /// Reject values the detector would silently misbehave on.
    ///
    /// The detector never calls this; it is up to whoever hands it a new
    /// configuration.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let fields = [
            ("singleSnapThreshold", self.single_snap_threshold),
            ("lowActivityVariance", self.low_activity_variance),
            ("lowActivityWindow", self.low_activity_window),
            ("doubleMinInterval", self.double_min_interval),
            ("doubleMaxInterval", self.double_max_interval),
            ("refractoryPeriod", self.refractory_period),
            ("sampleRateHint", self.sample_rate_hint),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigurationError::Negative { field, value });
            }
        }

        if self.double_min_interval > self.double_max_interval {
            return Err(ConfigurationError::InvertedDoubleWindow {
                min: self.double_min_interval,
                max: self.double_max_interval,
            });
        }

        if self.sample_rate_hint <= 0.0 {
            return Err(ConfigurationError::NonPositiveSampleRate(self.sample_rate_hint));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Orientation (which wrist wears the watch)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Left,
    Right,
}

impl Orientation {
    /// Multiplier applied to raw rotation before any other processing.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Right
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub dominant_wrist: Orientation,
}

/// Everything the settings collaborator hands us in one piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub gesture: GestureConfig,
    #[serde(default)]
    pub profile: ProfileSettings,
}

impl Settings {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).context("settings are not valid JSON")?;
        settings.gesture.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GestureConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_double_window_is_rejected() {
        let cfg = GestureConfig {
            double_min_interval: 1.0,
            double_max_interval: 0.5,
            ..GestureConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigurationError::InvertedDoubleWindow { .. })
        ));
    }

    #[test]
    fn negative_and_non_finite_values_are_rejected() {
        let negative = GestureConfig {
            refractory_period: -0.1,
            ..GestureConfig::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigurationError::Negative { field: "refractoryPeriod", .. })
        ));

        let nan = GestureConfig {
            single_snap_threshold: f64::NAN,
            ..GestureConfig::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigurationError::NonFinite { field: "singleSnapThreshold" })
        ));

        let zero_rate = GestureConfig {
            sample_rate_hint: 0.0,
            ..GestureConfig::default()
        };
        assert!(matches!(
            zero_rate.validate(),
            Err(ConfigurationError::NonPositiveSampleRate(_))
        ));
    }

    #[test]
    fn orientation_sign() {
        assert_eq!(Orientation::Left.sign(), -1.0);
        assert_eq!(Orientation::Right.sign(), 1.0);
        assert_eq!(Orientation::default(), Orientation::Right);
    }

    #[test]
    fn settings_parse_without_profile() {
        let json = r#"{
            "gesture": {
                "singleSnapThreshold": 4.0,
                "lowActivityVariance": 0.2,
                "lowActivityWindow": 0.5,
                "doubleMinInterval": 0.3,
                "doubleMaxInterval": 0.8,
                "refractoryPeriod": 1.0,
                "sampleRateHint": 100
            }
        }"#;
        let settings = Settings::from_json_str(json).unwrap();
        assert_eq!(settings.gesture.single_snap_threshold, 4.0);
        assert_eq!(settings.profile.dominant_wrist, Orientation::Right);
    }

    #[test]
    fn settings_with_bad_thresholds_fail_to_load() {
        let json = r#"{
            "gesture": {
                "singleSnapThreshold": 4.0,
                "lowActivityVariance": 0.2,
                "lowActivityWindow": 0.5,
                "doubleMinInterval": 0.9,
                "doubleMaxInterval": 0.3,
                "refractoryPeriod": 1.0,
                "sampleRateHint": 100
            },
            "profile": { "dominantWrist": "left" }
        }"#;
        assert!(Settings::from_json_str(json).is_err());
    }
}
