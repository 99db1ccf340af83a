//! ML Pong - deterministic integer Pong that records training frames
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, paddle controllers, frame history, match flow)
//! - `settings`: Validated match configuration
//! - `persistence`: Saved-match text logs and training-frame export
//! - `platform`: Serialized command channel for interactive front ends
//! - `renderer`: Window-free draw lists for boards and raster frames

pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, MatchLogError};
pub use settings::{Config, Controller};
pub use sim::{Match, MatchSummary, Side};

/// Default configuration values
pub mod consts {
    /// Field dimensions
    pub const DEFAULT_WIDTH: i32 = 125;
    pub const DEFAULT_HEIGHT: i32 = 100;
    pub const DEFAULT_DIVIDER_WIDTH: i32 = 2;

    /// Ball defaults (square ball, same speed range on both axes)
    pub const DEFAULT_BALL_SIZE: i32 = 3;
    pub const DEFAULT_MIN_SPEED: i32 = 2;
    pub const DEFAULT_MAX_SPEED: i32 = 6;
    pub const DEFAULT_MAX_SPIN_INCREMENT: i32 = 4;

    /// Paddle defaults
    pub const DEFAULT_PADDLE_WIDTH: i32 = 3;
    pub const DEFAULT_PADDLE_HEIGHT: i32 = 15;
    pub const DEFAULT_PADDLE_STEP: i32 = 1;

    /// First to this many points wins the match
    pub const DEFAULT_WINNING_SCORE: u32 = 21;
    /// Frames of history handed to the learner
    pub const DEFAULT_HISTORY_DEPTH: usize = 4;

    /// Largest accepted field side, paddle size and ball size
    pub const MAX_DIMENSION: i32 = 4096;
    /// Largest accepted speed, spin or paddle step
    pub const MAX_SPEED: i32 = 4096;
    /// Largest accepted history depth
    pub const MAX_HISTORY_DEPTH: usize = 1024;
}
