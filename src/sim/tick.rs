//! Match flow: serving, ticking, scoring
//!
//! `Match` owns all mutable simulation state and advances it one fixed
//! tick at a time. The headless CPU-vs-CPU driver lives here too.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::history::{FrameHistory, PositionSnapshot};
use super::observer::MatchObserver;
use super::paddle::{cpu_move, move_by_delta};
use super::physics::advance;
use super::state::{Ball, GamePhase, Paddles, Score, Side};
use crate::settings::Config;

/// Read-only state for a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderView {
    pub ball_x: i32,
    pub ball_y: i32,
    pub paddle_one_y: i32,
    pub paddle_two_y: i32,
    pub score: Score,
    /// Human-controlled flag per side, indexed by `Side::index`
    pub human: [bool; 2],
}

/// Outcome of a finished simulated match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub score: Score,
    pub winner: Option<Side>,
    /// Points played
    pub games: u32,
    /// Ticks simulated across all games
    pub ticks: u64,
    /// Frames pushed into the history
    pub frames_recorded: u64,
    /// Early exits absorbed by the serve warm-up
    pub reserves: u32,
    pub longest_rally: u32,
}

/// A match in progress
#[derive(Debug, Clone)]
pub struct Match {
    config: Config,
    seed: u64,
    rng: Pcg32,
    pub ball: Ball,
    pub paddles: Paddles,
    pub score: Score,
    /// Paddle hits in the current game
    pub volleys: u32,
    pub phase: GamePhase,
    pub history: FrameHistory,
    /// Ticks simulated since the match started
    pub time_ticks: u64,
    frames_recorded: u64,
    reserves: u32,
    longest_rally: u32,
}

impl Match {
    /// Create a match and serve the first ball. `config` must already be validated.
    pub fn new(config: Config, seed: u64) -> Self {
        let mut game = Self {
            history: FrameHistory::new(&config),
            ball: Ball::centered(&config),
            paddles: Paddles::centered(&config),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            score: Score::default(),
            volleys: 0,
            phase: GamePhase::AwaitingServe,
            time_ticks: 0,
            frames_recorded: 0,
            reserves: 0,
            longest_rally: 0,
            config,
        };
        game.start_new_game();
        game
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Center everything, clear the history and serve. Scores are untouched.
    pub fn start_new_game(&mut self) {
        let config = &self.config;
        self.ball = Ball::centered(config);
        self.paddles = Paddles::centered(config);
        self.volleys = 0;
        self.history.clear();

        let dx = config.serve_dx();
        let dy = if config.max_dy > config.min_dy {
            self.rng.random_range(config.min_dy..config.max_dy)
        } else {
            config.min_dy
        };
        self.ball.vel.x = if self.rng.random_bool(0.5) { dx } else { -dx };
        self.ball.vel.y = if self.rng.random_bool(0.5) { dy } else { -dy };

        self.phase = if config.serve_warmup_volleys > 0 {
            GamePhase::AwaitingServe
        } else {
            GamePhase::InPlay
        };
    }

    /// True once the current game has been decided.
    ///
    /// During the serve warm-up an exit re-serves instead and reports `false`.
    pub fn is_game_over(&mut self) -> bool {
        self.resolve_exit(&mut ())
    }

    /// Either player has reached the winning score
    pub fn is_match_over(&self) -> bool {
        self.score.winner(self.config.winning_score).is_some()
    }

    fn resolve_exit<O: MatchObserver>(&mut self, observer: &mut O) -> bool {
        if matches!(self.phase, GamePhase::GameOver | GamePhase::MatchOver) {
            return true;
        }
        if !self.ball.has_exited(&self.config) {
            return false;
        }

        if self.volleys < self.config.serve_warmup_volleys {
            log::trace!(
                "Ball left the field after {} volleys during warm-up, re-serving",
                self.volleys
            );
            self.reserves += 1;
            self.start_new_game();
            return false;
        }

        // Out past the right edge is player one's point
        let scorer = if self.ball.pos.x > self.config.width {
            Side::One
        } else {
            Side::Two
        };
        self.score.award(scorer);
        self.phase = GamePhase::GameOver;
        log::debug!(
            "Player {:?} wins game after {} volleys ({})",
            scorer,
            self.volleys,
            self.score
        );
        observer.on_game_over(scorer, &self.score);

        if let Some(winner) = self.score.winner(self.config.winning_score) {
            self.phase = GamePhase::MatchOver;
            log::info!("Player {:?} wins match {}", winner, self.score);
        }
        true
    }

    /// Move the ball one step and count a volley on a paddle hit
    pub fn advance_ball(&mut self) -> Option<Side> {
        let hit = advance(&mut self.ball, &self.paddles, &self.config);
        if hit.is_some() {
            self.volleys += 1;
            self.longest_rally = self.longest_rally.max(self.volleys);
            if self.phase == GamePhase::AwaitingServe
                && self.volleys >= self.config.serve_warmup_volleys
            {
                self.phase = GamePhase::InPlay;
            }
        }
        hit
    }

    /// One controller step for `side`; no-op for a human side
    pub fn move_cpu_paddle(&mut self, side: Side) {
        cpu_move(
            side,
            self.config.controller(side),
            &self.ball,
            self.paddles.get_mut(side),
            &self.config,
        );
    }

    /// Run every CPU controller for one tick
    pub fn move_cpu_paddles(&mut self) {
        for _ in 0..self.config.paddle_moves_per_tick {
            for side in Side::BOTH {
                self.move_cpu_paddle(side);
            }
        }
    }

    /// Apply a human paddle movement
    pub fn move_paddle(&mut self, side: Side, delta: i32) {
        move_by_delta(self.paddles.get_mut(side), delta, &self.config);
    }

    /// Whether frames are being recorded this tick
    pub fn warmed_up(&self) -> bool {
        self.volleys >= self.config.serve_warmup_volleys
    }

    /// Push the current positions into the history once warmed up
    pub fn record_frame<O: MatchObserver>(&mut self, observer: &mut O) -> bool {
        if !self.warmed_up() {
            return false;
        }
        self.history
            .record(&self.ball, &self.paddles, &self.config);
        self.frames_recorded += 1;
        observer.on_frame_recorded(&self.history);
        true
    }

    /// One simulation step with no observer
    pub fn tick(&mut self) {
        self.tick_with(&mut ());
    }

    /// Record (after warm-up), move the ball, then move the CPU paddles
    pub fn tick_with<O: MatchObserver>(&mut self, observer: &mut O) {
        self.record_frame(observer);
        observer.on_tick(PositionSnapshot::capture(&self.ball, &self.paddles));

        self.advance_ball();
        self.move_cpu_paddles();
        self.time_ticks += 1;
    }

    /// Play CPU against CPU from 0 - 0 until someone reaches the winning score
    pub fn run_simulated_match<O: MatchObserver>(&mut self, mut observer: O) -> MatchSummary {
        self.score = Score::default();
        self.time_ticks = 0;
        self.frames_recorded = 0;
        self.reserves = 0;
        self.longest_rally = 0;

        while !self.is_match_over() {
            self.start_new_game();
            while !self.resolve_exit(&mut observer) {
                self.tick_with(&mut observer);
            }
        }

        self.summary()
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            score: self.score,
            winner: self.score.winner(self.config.winning_score),
            games: self.score.one + self.score.two,
            ticks: self.time_ticks,
            frames_recorded: self.frames_recorded,
            reserves: self.reserves,
            longest_rally: self.longest_rally,
        }
    }

    pub fn view(&self) -> RenderView {
        RenderView {
            ball_x: self.ball.pos.x,
            ball_y: self.ball.pos.y,
            paddle_one_y: self.paddles.get(Side::One).y,
            paddle_two_y: self.paddles.get(Side::Two).y,
            score: self.score,
            human: [
                self.config.player_one.is_human(),
                self.config.player_two.is_human(),
            ],
        }
    }
}
