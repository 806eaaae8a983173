// SnapScore — Gesture Task
//
// The single serial context for the engine: blocks on the command channel and
// feeds each command to the session in arrival order. Returns the session once
// every sender has hung up so the caller can read the final score.

use std::sync::mpsc::Receiver;

use crate::drivers::haptic::HapticFeedback;
use crate::events::Command;
use crate::session::ScoringSession;

pub fn gesture_task<H: HapticFeedback>(
    rx: Receiver<Command>,
    mut session: ScoringSession<H>,
) -> ScoringSession<H> {
    log::info!(
        "Gesture task started (expecting ~{} Hz)",
        session.settings().gesture.sample_rate_hint
    );

    let mut processed: u64 = 0;
    let mut emitted: u64 = 0;

    while let Ok(command) = rx.recv() {
        if matches!(command, Command::Sample(_)) {
            processed += 1;
        }
        if session.handle(command).is_some() {
            emitted += 1;
        }
    }

    if session.detector().pending_single().is_some() {
        // Only a later sample can time out a pending snap.
        log::info!("Stream ended with an unpaired snap still pending; it is not scored");
    }

    log::info!(
        "Command channel closed — {} samples, {} gestures",
        processed,
        emitted
    );
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::drivers::haptic::LogHaptics;
    use crate::events::Sample;
    use crate::scoring::ScoreSnapshot;
    use std::sync::mpsc;

    #[test]
    fn drains_channel_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(Command::IncrementPlayer).unwrap();
        tx.send(Command::Sample(Sample::new(0.0, 6.0, 0.0))).unwrap();
        tx.send(Command::Sample(Sample::new(0.7, 6.0, 0.0))).unwrap();
        tx.send(Command::Undo).unwrap();
        drop(tx);

        let session = gesture_task(rx, ScoringSession::new(Settings::default(), LogHaptics::new()));
        // Undo removed the Secondary, not the manual point.
        assert_eq!(session.scores(), ScoreSnapshot { player: 1, opponent: 0 });
        assert_eq!(session.haptics().played(), 2);
    }
}
