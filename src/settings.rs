//! Match configuration
//!
//! An immutable record of named integer parameters, loaded once from JSON
//! (every field optional) and validated before a `Match` is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Who drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    /// Keyboard-driven, moved only through `move_paddle`
    Human,
    /// Chases the ball's current height while the ball approaches
    #[default]
    Simple,
    /// Projects the ball to the far edge and pre-positions
    Forecast,
}

impl Controller {
    pub fn as_str(&self) -> &'static str {
        match self {
            Controller::Human => "human",
            Controller::Simple => "simple",
            Controller::Forecast => "forecast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Controller::Human),
            "simple" => Some(Controller::Simple),
            "forecast" | "forecasting" => Some(Controller::Forecast),
            _ => None,
        }
    }

    pub fn is_human(&self) -> bool {
        *self == Controller::Human
    }
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Field ===
    pub width: i32,
    pub height: i32,
    /// Only used by the center line in draw lists
    pub divider_width: i32,

    // === Ball ===
    pub ball_width: i32,
    pub ball_height: i32,
    pub min_dx: i32,
    pub max_dx: i32,
    pub min_dy: i32,
    pub max_dy: i32,
    /// Largest vertical speed change from an edge-of-paddle hit
    pub max_spin_increment: i32,

    // === Paddles ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Distance a paddle moves per controller step
    pub paddle_step: i32,
    /// CPU controller invocations per ball advance
    pub paddle_moves_per_tick: u32,
    pub player_one: Controller,
    pub player_two: Controller,

    // === Match ===
    pub winning_score: u32,
    /// Volleys required before an exit counts as a point
    pub serve_warmup_volleys: u32,
    /// Snapshots kept in each rolling history
    pub history_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            divider_width: DEFAULT_DIVIDER_WIDTH,

            ball_width: DEFAULT_BALL_SIZE,
            ball_height: DEFAULT_BALL_SIZE,
            min_dx: DEFAULT_MIN_SPEED,
            max_dx: DEFAULT_MAX_SPEED,
            min_dy: DEFAULT_MIN_SPEED,
            max_dy: DEFAULT_MAX_SPEED,
            max_spin_increment: DEFAULT_MAX_SPIN_INCREMENT,

            paddle_width: DEFAULT_PADDLE_WIDTH,
            paddle_height: DEFAULT_PADDLE_HEIGHT,
            paddle_step: DEFAULT_PADDLE_STEP,
            paddle_moves_per_tick: 1,
            player_one: Controller::Forecast,
            player_two: Controller::Simple,

            winning_score: DEFAULT_WINNING_SCORE,
            serve_warmup_volleys: 0,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl Config {
    /// Half the paddle height, rounded down; the collision band radius
    #[inline]
    pub fn paddle_half(&self) -> i32 {
        self.paddle_height / 2
    }

    /// Lowest legal paddle center
    #[inline]
    pub fn paddle_min_y(&self) -> i32 {
        self.paddle_half()
    }

    /// Highest legal paddle center
    #[inline]
    pub fn paddle_max_y(&self) -> i32 {
        self.height - self.paddle_half()
    }

    /// Serve speed along x: the midpoint of the allowed range
    #[inline]
    pub fn serve_dx(&self) -> i32 {
        self.min_dx + (self.max_dx - self.min_dx) / 2
    }

    pub fn controller(&self, side: crate::sim::Side) -> Controller {
        match side {
            crate::sim::Side::One => self.player_one,
            crate::sim::Side::Two => self.player_two,
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // A struct of integers and unit enums always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject configurations the simulation core cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("ball_width", self.ball_width),
            ("ball_height", self.ball_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("min_dx", self.min_dx),
        ] {
            if value <= 0 {
                return Err(ConfigError::NotPositive {
                    field,
                    value: value as i64,
                });
            }
        }
        for (field, value) in [
            ("winning_score", self.winning_score as i64),
            ("history_depth", self.history_depth as i64),
            ("paddle_moves_per_tick", self.paddle_moves_per_tick as i64),
        ] {
            if value <= 0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("paddle_step", self.paddle_step),
            ("max_spin_increment", self.max_spin_increment),
            ("min_dy", self.min_dy),
            ("divider_width", self.divider_width),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value, max) in [
            ("width", self.width, MAX_DIMENSION),
            ("height", self.height, MAX_DIMENSION),
            ("ball_width", self.ball_width, MAX_DIMENSION),
            ("ball_height", self.ball_height, MAX_DIMENSION),
            ("paddle_width", self.paddle_width, MAX_DIMENSION),
            ("divider_width", self.divider_width, MAX_DIMENSION),
            ("max_dx", self.max_dx, MAX_SPEED),
            ("max_dy", self.max_dy, MAX_SPEED),
            ("max_spin_increment", self.max_spin_increment, MAX_SPEED),
            ("paddle_step", self.paddle_step, MAX_SPEED),
        ] {
            if value > max {
                return Err(ConfigError::TooLarge {
                    field,
                    value: value as i64,
                    max: max as i64,
                });
            }
        }
        if self.history_depth > MAX_HISTORY_DEPTH {
            return Err(ConfigError::TooLarge {
                field: "history_depth",
                value: self.history_depth as i64,
                max: MAX_HISTORY_DEPTH as i64,
            });
        }
        if self.paddle_height > self.height {
            return Err(ConfigError::PaddleTooTall {
                paddle_height: self.paddle_height,
                height: self.height,
            });
        }
        if self.min_dx > self.max_dx {
            return Err(ConfigError::InvertedRange {
                name: "dx",
                min: self.min_dx,
                max: self.max_dx,
            });
        }
        if self.min_dy > self.max_dy {
            return Err(ConfigError::InvertedRange {
                name: "dy",
                min: self.min_dy,
                max: self.max_dy,
            });
        }
        Ok(())
    }
}
