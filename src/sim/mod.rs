//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer arithmetic only
//! - Seeded RNG only, owned by `Match`
//! - No rendering or platform dependencies

pub mod history;
pub mod observer;
pub mod paddle;
pub mod physics;
pub mod state;
pub mod tick;

pub use history::{FrameHistory, PositionSnapshot, Raster, mirror};
pub use observer::MatchObserver;
pub use paddle::{cpu_move, forecast_track, forecast_y, move_by_delta, simple_track, step_toward};
pub use physics::{advance, spin_offset};
pub use state::{Ball, GamePhase, Paddle, Paddles, Score, Side};
pub use tick::{Match, MatchSummary, RenderView};
