// SnapScore — Scoring Session
//
// Owns the detector, score, calibration recorder and haptics, and applies
// every command in arrival order. Run it on exactly one thread: the gesture
// task drains a channel into `handle`, so sensor samples and settings changes
// can never interleave mid-sample.

use crate::config::Settings;
use crate::drivers::haptic::HapticFeedback;
use crate::error::ConfigurationError;
use crate::events::{Command, GestureEvent, Sample, ScoreEvent};
use crate::gesture::{CalibrationResult, CalibrationSession, CalibrationState, EventDetector};
use crate::scoring::{ScoreSnapshot, ScoringService};

pub struct ScoringSession<H: HapticFeedback> {
    settings: Settings,
    detector: EventDetector,
    scoring: ScoringService,
    calibration: CalibrationSession,
    haptics: H,
}

impl<H: HapticFeedback> ScoringSession<H> {
    pub fn new(settings: Settings, haptics: H) -> Self {
        let mut detector = EventDetector::new(settings.gesture);
        detector.set_orientation(settings.profile.dominant_wrist);
        Self {
            settings,
            detector,
            scoring: ScoringService::new(),
            calibration: CalibrationSession::new(),
            haptics,
        }
    }

    /// Apply one command. Returns the gesture event a sample produced, if any.
    pub fn handle(&mut self, command: Command) -> Option<GestureEvent> {
        match command {
            Command::Sample(sample) => return self.on_sample(&sample),
            Command::UpdateSettings(settings) => {
                if let Err(e) = self.update_settings(settings) {
                    log::warn!("Rejected settings update: {}", e);
                }
            }
            Command::StartCalibration => self.start_calibration(),
            Command::FinishCalibration => {
                self.finish_calibration();
            }
            Command::IncrementPlayer => self.score(ScoreEvent::Player),
            Command::IncrementOpponent => self.score(ScoreEvent::Opponent),
            Command::Undo => {
                if let Some(undone) = self.scoring.undo() {
                    log::info!("Undid {:?} point", undone);
                }
            }
            Command::ResetScores => {
                self.scoring.reset();
                log::info!("Scores reset");
            }
        }
        None
    }

    fn on_sample(&mut self, sample: &Sample) -> Option<GestureEvent> {
        self.calibration.record(sample);

        let event = self.detector.process(sample)?;
        self.score(event.score_event());
        Some(event)
    }

    fn score(&mut self, event: ScoreEvent) {
        self.scoring.record(event);
        self.haptics.play(event.haptic_pattern());
        let snapshot = self.scoring.snapshot();
        log::info!(
            "{:?} point -> {}:{}",
            event,
            snapshot.player,
            snapshot.opponent
        );
    }

    /// Validate, then swap thresholds (full detector reset) and orientation.
    /// On error the previous settings stay in force.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ConfigurationError> {
        settings.gesture.validate()?;
        self.settings = settings;
        self.detector.set_configuration(settings.gesture);
        self.detector.set_orientation(settings.profile.dominant_wrist);
        Ok(())
    }

    pub fn start_calibration(&mut self) {
        self.calibration.start();
        self.detector.set_paused(true);
    }

    /// Fold the recording into the thresholds and resume detection.
    pub fn finish_calibration(&mut self) -> Option<CalibrationResult> {
        let result = self.calibration.finish();

        if let Some(result) = result {
            let mut gesture = self.settings.gesture;
            result.apply_to(&mut gesture);
            match gesture.validate() {
                Ok(()) => {
                    self.settings.gesture = gesture;
                    self.detector.set_configuration(gesture);
                }
                Err(e) => log::warn!("Calibration produced unusable thresholds: {}", e),
            }
        }

        self.detector.set_paused(false);
        result
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn detector(&self) -> &EventDetector {
        &self.detector
    }

    pub fn calibration_state(&self) -> CalibrationState {
        self.calibration.state()
    }

    pub fn scores(&self) -> ScoreSnapshot {
        self.scoring.snapshot()
    }

    pub fn can_undo(&self) -> bool {
        self.scoring.can_undo()
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GestureConfig, Orientation, ProfileSettings};
    use crate::events::HapticPattern;

    #[derive(Default)]
    struct RecordingHaptics(Vec<HapticPattern>);

    impl HapticFeedback for RecordingHaptics {
        fn play(&mut self, pattern: HapticPattern) {
            self.0.push(pattern);
        }
    }

    fn session() -> ScoringSession<RecordingHaptics> {
        ScoringSession::new(Settings::default(), RecordingHaptics::default())
    }

    fn sample(t: f64, r: f64) -> Command {
        Command::Sample(Sample::new(t, r, 0.0))
    }

    #[test]
    fn gesture_events_score_and_buzz() {
        let mut s = session();
        assert_eq!(s.handle(sample(0.0, 6.0)), None);
        assert_eq!(s.handle(sample(0.65, 6.2)), Some(GestureEvent::Secondary));
        assert_eq!(s.handle(sample(2.0, 6.0)), None);
        assert_eq!(s.handle(sample(3.0, 0.0)), Some(GestureEvent::Primary));

        assert_eq!(s.scores(), ScoreSnapshot { player: 1, opponent: 1 });
        assert_eq!(
            s.haptics().0,
            vec![HapticPattern::Double, HapticPattern::Single]
        );
    }

    #[test]
    fn manual_controls() {
        let mut s = session();
        s.handle(Command::IncrementPlayer);
        s.handle(Command::IncrementOpponent);
        s.handle(Command::IncrementOpponent);
        assert_eq!(s.scores(), ScoreSnapshot { player: 1, opponent: 2 });

        s.handle(Command::Undo);
        assert_eq!(s.scores(), ScoreSnapshot { player: 1, opponent: 1 });

        s.handle(Command::ResetScores);
        assert_eq!(s.scores(), ScoreSnapshot::default());
        assert!(!s.can_undo());
        assert_eq!(s.haptics().0.len(), 3);
    }

    #[test]
    fn invalid_settings_are_refused() {
        let mut s = session();
        s.handle(sample(0.0, 6.0));

        let mut bad = Settings::default();
        bad.gesture.double_min_interval = 2.0;
        assert!(s.update_settings(bad).is_err());
        s.handle(Command::UpdateSettings(bad));

        assert_eq!(s.settings().gesture, GestureConfig::default());
        // Refused update must not reset the detector either.
        assert_eq!(s.detector().pending_single(), Some(0.0));
    }

    #[test]
    fn settings_update_resets_and_flips_orientation() {
        let mut s = session();
        s.handle(sample(0.0, 6.0));

        let left = Settings {
            gesture: GestureConfig::default(),
            profile: ProfileSettings {
                dominant_wrist: Orientation::Left,
            },
        };
        s.handle(Command::UpdateSettings(left));
        assert_eq!(s.detector().pending_single(), None);
        assert_eq!(s.settings().profile.dominant_wrist, Orientation::Left);

        // Mirrored double snap still pairs.
        s.handle(sample(1.0, -6.0));
        assert_eq!(s.handle(sample(1.7, -6.0)), Some(GestureEvent::Secondary));
    }

    #[test]
    fn calibration_pauses_detection_and_updates_thresholds() {
        let mut s = session();
        s.handle(sample(0.0, 6.0));
        s.handle(Command::StartCalibration);
        assert_eq!(s.calibration_state(), CalibrationState::Recording);
        assert!(s.detector().is_paused());
        assert_eq!(s.detector().pending_single(), None);

        // Recorded but never scored while paused.
        for (i, r) in [1.0, -2.0, 3.0, -4.0, 5.0, -6.0, 7.0, -8.0, 9.0, -10.0]
            .iter()
            .enumerate()
        {
            assert_eq!(s.handle(sample(0.1 + i as f64 * 0.7, *r)), None);
        }
        assert_eq!(s.scores(), ScoreSnapshot::default());

        s.handle(Command::FinishCalibration);
        assert_eq!(s.calibration_state(), CalibrationState::Completed);
        assert!(!s.detector().is_paused());
        assert_eq!(s.settings().gesture.single_snap_threshold, 7.0);
        assert!((s.settings().gesture.low_activity_variance - 38.25).abs() < 1e-9);
        assert_eq!(s.detector().config(), &s.settings().gesture);
    }

    #[test]
    fn finishing_idle_calibration_only_unpauses() {
        let mut s = session();
        assert_eq!(s.finish_calibration(), None);
        assert_eq!(s.calibration_state(), CalibrationState::Idle);
        assert_eq!(s.settings().gesture, GestureConfig::default());
        assert!(!s.detector().is_paused());
    }

    #[test]
    fn empty_calibration_keeps_thresholds() {
        let mut s = session();
        s.start_calibration();
        assert_eq!(s.finish_calibration(), Some(CalibrationResult::default()));
        assert_eq!(s.settings().gesture, GestureConfig::default());
    }
}
