//! Hooks for read-only consumers of a running match

use super::history::{FrameHistory, PositionSnapshot};
use super::state::{Score, Side};

/// Receives match events as they happen. All methods default to no-ops.
pub trait MatchObserver {
    /// Start of every tick, before the ball moves
    fn on_tick(&mut self, _positions: PositionSnapshot) {}

    /// A frame was pushed into the history (post warm-up ticks only)
    fn on_frame_recorded(&mut self, _history: &FrameHistory) {}

    /// `scorer` won a point; `score` already includes it
    fn on_game_over(&mut self, _scorer: Side, _score: &Score) {}
}

/// Observer that ignores everything
impl MatchObserver for () {}

impl<T: MatchObserver + ?Sized> MatchObserver for &mut T {
    fn on_tick(&mut self, positions: PositionSnapshot) {
        (**self).on_tick(positions);
    }

    fn on_frame_recorded(&mut self, history: &FrameHistory) {
        (**self).on_frame_recorded(history);
    }

    fn on_game_over(&mut self, scorer: Side, score: &Score) {
        (**self).on_game_over(scorer, score);
    }
}

/// Fan events out to two observers
impl<A: MatchObserver, B: MatchObserver> MatchObserver for (A, B) {
    fn on_tick(&mut self, positions: PositionSnapshot) {
        self.0.on_tick(positions);
        self.1.on_tick(positions);
    }

    fn on_frame_recorded(&mut self, history: &FrameHistory) {
        self.0.on_frame_recorded(history);
        self.1.on_frame_recorded(history);
    }

    fn on_game_over(&mut self, scorer: Side, score: &Score) {
        self.0.on_game_over(scorer, score);
        self.1.on_game_over(scorer, score);
    }
}

/// Optional observer; `None` ignores everything
impl<T: MatchObserver> MatchObserver for Option<T> {
    fn on_tick(&mut self, positions: PositionSnapshot) {
        if let Some(observer) = self {
            observer.on_tick(positions);
        }
    }

    fn on_frame_recorded(&mut self, history: &FrameHistory) {
        if let Some(observer) = self {
            observer.on_frame_recorded(history);
        }
    }

    fn on_game_over(&mut self, scorer: Side, score: &Score) {
        if let Some(observer) = self {
            observer.on_game_over(scorer, score);
        }
    }
}
