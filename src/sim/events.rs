//! Discrete simulation events for the audio/visual layer

use serde::{Deserialize, Serialize};

use super::paddle::Side;

/// Something that happened during a tick, reported once per occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Ball bounced off the top or bottom edge
    WallBounce,
    /// Ball bounced off a paddle
    PaddleHit { side: Side },
    /// Ball left the table; `scorer` gets the point
    Score { scorer: Side },
    /// A game ended but the series continues
    GameWon { winner: Side },
    /// A game ended and decided the series
    SeriesWon { winner: Side },
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::WallBounce => "wall_bounce",
            GameEvent::PaddleHit { .. } => "paddle_hit",
            GameEvent::Score { .. } => "score",
            GameEvent::GameWon { .. } => "game_won",
            GameEvent::SeriesWon { .. } => "series_won",
        }
    }
}

/// Consumer of simulation events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
