//! Game state and core simulation types
//!
//! Everything here is plain integer data; the RNG lives on `Match`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::settings::Config;

/// One side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player one, left edge (column 0)
    One,
    /// Player two, right edge (column width - 1)
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// True when a ball moving with `dx` travels away from this side
    #[inline]
    pub fn is_departing(self, dx: i32) -> bool {
        match self {
            Side::One => dx > 0,
            Side::Two => dx < 0,
        }
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fewer volleys than the warm-up threshold; exits re-serve
    AwaitingServe,
    /// Exits score
    InPlay,
    /// A point was scored; waiting for `start_new_game`
    GameOver,
    /// A player reached the winning score
    MatchOver,
}

/// The ball: integer position and per-tick velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub vel: IVec2,
}

impl Ball {
    pub fn new(x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            vel: IVec2::new(dx, dy),
        }
    }

    /// Ball at field center, at rest
    pub fn centered(config: &Config) -> Self {
        Self::new(config.width / 2, config.height / 2, 0, 0)
    }

    /// Left of column 0 or right of column `width`
    pub fn has_exited(&self, config: &Config) -> bool {
        self.pos.x > config.width || self.pos.x < 0
    }
}

/// A paddle, tracked by its vertical center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: i32,
}

impl Paddle {
    pub fn centered(config: &Config) -> Self {
        Self {
            y: config.height / 2,
        }
    }

    /// Inclusive band of ball heights this paddle returns
    pub fn hit_band(&self, config: &Config) -> (i32, i32) {
        let half = config.paddle_half();
        (self.y - half, self.y + half)
    }

    /// Half-open range of raster rows this paddle covers
    pub fn raster_rows(&self, config: &Config) -> std::ops::Range<i32> {
        let half = config.paddle_half();
        (self.y - half).max(0)..(self.y + half).min(config.height)
    }
}

/// Both paddles, indexed by `Side`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddles(pub [Paddle; 2]);

impl Paddles {
    pub fn centered(config: &Config) -> Self {
        Self([Paddle::centered(config); 2])
    }

    #[inline]
    pub fn get(&self, side: Side) -> &Paddle {
        &self.0[side.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.0[side.index()]
    }
}

/// Points won in the current match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub one: u32,
    pub two: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::One => self.one,
            Side::Two => self.two,
        }
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::One => self.one += 1,
            Side::Two => self.two += 1,
        }
    }

    /// The side that has reached `winning_score`, if any
    pub fn winner(&self, winning_score: u32) -> Option<Side> {
        if self.one >= winning_score {
            Some(Side::One)
        } else if self.two >= winning_score {
            Some(Side::Two)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.one, self.two)
    }
}
