// SnapScore — Score Keeping
//
// Two counters plus an undo history. Undo never drives a score below zero.

use serde::Serialize;

use crate::events::ScoreEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreSnapshot {
    pub player: u32,
    pub opponent: u32,
}

#[derive(Debug, Default)]
pub struct ScoringService {
    player: u32,
    opponent: u32,
    history: Vec<ScoreEvent>,
}

impl ScoringService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::Player => self.player += 1,
            ScoreEvent::Opponent => self.opponent += 1,
        }
        self.history.push(event);
    }

    pub fn undo(&mut self) -> Option<ScoreEvent> {
        let last = self.history.pop()?;
        match last {
            ScoreEvent::Player => self.player = self.player.saturating_sub(1),
            ScoreEvent::Opponent => self.opponent = self.opponent.saturating_sub(1),
        }
        Some(last)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn reset(&mut self) {
        self.player = 0;
        self.opponent = 0;
        self.history.clear();
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            player: self.player,
            opponent: self.opponent,
        }
    }
}
