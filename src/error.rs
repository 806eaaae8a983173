// SnapScore — Error Types

use thiserror::Error;

/// Why a [`GestureConfig`](crate::config::GestureConfig) was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("doubleMinInterval ({min}) exceeds doubleMaxInterval ({max})")]
    InvertedDoubleWindow { min: f64, max: f64 },

    #[error("sampleRateHint must be positive (got {0})")]
    NonPositiveSampleRate(f64),
}
