// SnapScore — Snap Detector
//
// Turns one rotation sample at a time into at most one gesture event.
//
// A qualifying snap (near-rest window + magnitude over threshold, outside the
// refractory period) is held as "pending". A second snap landing inside
// [double_min, double_max] of it confirms a Secondary. A pending snap that is
// still unpaired when a later sample arrives `double_max` or more after it is
// released as a Primary. Nothing fires without a sample to observe it.

use crate::config::{GestureConfig, Orientation};
use crate::events::{GestureEvent, Sample};
use crate::gesture::window::{is_low_activity, SignalWindow};

pub struct EventDetector {
    config: GestureConfig,
    window: SignalWindow,
    pending_single: Option<f64>,
    last_trigger: Option<f64>,
    paused: bool,
    orientation_sign: f64,
}

impl EventDetector {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            window: SignalWindow::new(config.low_activity_window),
            pending_single: None,
            last_trigger: None,
            paused: false,
            orientation_sign: Orientation::default().sign(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Swap thresholds and wipe all timing state.
    pub fn set_configuration(&mut self, config: GestureConfig) {
        self.config = config;
        self.reset();
        log::info!(
            "Detector reconfigured (threshold {:.2}, variance {:.3}, double {:.2}-{:.2}s)",
            config.single_snap_threshold,
            config.low_activity_variance,
            config.double_min_interval,
            config.double_max_interval
        );
    }

    /// Clears window, pending snap and refractory clock. Orientation and
    /// pause state are kept.
    pub fn reset(&mut self) {
        self.window.clear();
        self.window.set_span(self.config.low_activity_window);
        self.pending_single = None;
        self.last_trigger = None;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation_sign = orientation.sign();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            self.pending_single = None;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pending_single(&self) -> Option<f64> {
        self.pending_single
    }

    pub fn last_trigger(&self) -> Option<f64> {
        self.last_trigger
    }

    pub fn window(&self) -> &SignalWindow {
        &self.window
    }

    /// Feed one sample. Sample times must be non-decreasing.
    pub fn process(&mut self, sample: &Sample) -> Option<GestureEvent> {
        if self.paused {
            return None;
        }

        let now = sample.time;
        let adjusted = sample.rotation_rate * self.orientation_sign;
        self.window.push(now, adjusted);

        let is_low = is_low_activity(&self.window, self.config.low_activity_variance);
        let magnitude = adjusted.abs();

        // An expired pending snap always resolves first, whatever this sample is.
        if let Some(pending) = self.pending_single {
            if now - pending >= self.config.double_max_interval {
                return Some(self.emit(GestureEvent::Primary, now));
            }
        }

        if !is_low || magnitude < self.config.single_snap_threshold {
            return None;
        }

        if let Some(last) = self.last_trigger {
            if now - last < self.config.refractory_period {
                log::trace!("Snap at {:.3}s inside refractory period", now);
                return None;
            }
        }

        match self.pending_single {
            Some(pending)
                if (self.config.double_min_interval..=self.config.double_max_interval)
                    .contains(&(now - pending)) =>
            {
                Some(self.emit(GestureEvent::Secondary, now))
            }
            _ => {
                // A snap too soon after the pending one restarts the pairing clock.
                self.pending_single = Some(now);
                None
            }
        }
    }

    fn emit(&mut self, event: GestureEvent, now: f64) -> GestureEvent {
        self.pending_single = None;
        self.last_trigger = Some(now);
        log::debug!("{:?} at {:.3}s", event, now);
        event
    }
}
