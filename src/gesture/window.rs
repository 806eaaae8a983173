// SnapScore — Rolling Rotation Window & Activity Gate
//
// Keeps the last `span` seconds of orientation-corrected rotation and answers
// "is the wrist near rest?" from their population variance.

use std::collections::VecDeque;

pub struct SignalWindow {
    span: f64,
    entries: VecDeque<(f64, f64)>,
}

impl SignalWindow {
    pub fn new(span: f64) -> Self {
        Self {
            span,
            entries: VecDeque::new(),
        }
    }

    /// Append a reading and drop everything older than `time - span`.
    /// `time` must not go backwards.
    pub fn push(&mut self, time: f64, value: f64) {
        self.entries.push_back((time, value));

        let cutoff = time - self.span;
        while let Some(&(oldest, _)) = self.entries.front() {
            if oldest < cutoff {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    /// Population variance of the buffered values, or `+inf` while empty so
    /// that a cold window never reads as low activity.
    pub fn variance(&self) -> f64 {
        population_variance(self.entries.iter().map(|&(_, v)| v)).unwrap_or(f64::INFINITY)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn set_span(&mut self, span: f64) {
        self.span = span;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn oldest_time(&self) -> Option<f64> {
        self.entries.front().map(|&(t, _)| t)
    }
}

/// Strictly below `threshold`; equality counts as active.
pub fn is_low_activity(window: &SignalWindow, threshold: f64) -> bool {
    window.variance() < threshold
}

/// Divide-by-N variance. `None` for an empty input.
pub fn population_variance<I>(values: I) -> Option<f64>
where
    I: Iterator<Item = f64> + Clone,
{
    let (count, sum) = values
        .clone()
        .fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        return None;
    }

    let n = count as f64;
    let mean = sum / n;
    let squares: f64 = values.map(|v| (v - mean).powi(2)).sum();
    Some(squares / n)
}
