//! Ball movement, wall bounces and paddle returns
//!
//! Pure integer arithmetic; every branch clamps, nothing can fail.

use super::state::{Ball, Paddles, Side};
use crate::settings::Config;

/// Advance the ball one tick.
///
/// Moves the ball by its velocity, bounces it off the top and bottom walls,
/// then returns it from whichever paddle it reached. Returns the side whose
/// paddle hit the ball, if any; the caller owns the volley count. A ball that
/// passes an edge outside the paddle band is left where it is for scoring.
pub fn advance(ball: &mut Ball, paddles: &Paddles, config: &Config) -> Option<Side> {
    ball.pos += ball.vel;

    bounce_walls(ball, config);

    let mut hit = None;

    let left = paddles.get(Side::One);
    if ball.pos.x <= 0 && in_band(ball.pos.y, left.hit_band(config)) {
        apply_spin(ball, left.y, config);
        ball.pos.x = 1;
        ball.vel.x = -ball.vel.x;
        hit = Some(Side::One);
    }

    let right = paddles.get(Side::Two);
    if ball.pos.x >= config.width - 1 && in_band(ball.pos.y, right.hit_band(config)) {
        apply_spin(ball, right.y, config);
        ball.pos.x = config.width - 1;
        ball.vel.x = -ball.vel.x;
        hit = Some(Side::Two);
    }

    hit
}

/// Clamp to the field and force the vertical velocity away from the wall
fn bounce_walls(ball: &mut Ball, config: &Config) {
    let bottom = config.height - 1;
    if ball.pos.y >= bottom {
        ball.pos.y = bottom;
        ball.vel.y = -ball.vel.y.abs();
    }
    if ball.pos.y <= 0 {
        ball.pos.y = 0;
        ball.vel.y = ball.vel.y.abs();
    }
}

#[inline]
fn in_band(y: i32, (low, high): (i32, i32)) -> bool {
    y >= low && y <= high
}

/// Vertical speed change for a hit at `ball_y` on a paddle centered at `paddle_y`.
///
/// Positive when the ball strikes the far half of the paddle relative to its
/// direction of travel (speeds it up), negative on the near half. Scales to
/// `max_spin_increment` at the paddle tip; truncates toward zero.
pub fn spin_offset(dy: i32, ball_y: i32, paddle_y: i32, config: &Config) -> i32 {
    let from_center = match dy.signum() {
        -1 => paddle_y - ball_y,
        1 => ball_y - paddle_y,
        _ => return 0,
    };
    // max_spin * d / (paddle_height / 2) without losing the odd half cell
    let offset = 2 * i64::from(config.max_spin_increment) * i64::from(from_center)
        / i64::from(config.paddle_height);
    offset.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Add spin, then keep the speed inside `[min_dy, max_dy]` in the original direction
fn apply_spin(ball: &mut Ball, paddle_y: i32, config: &Config) {
    let dy = ball.vel.y;
    let spun = dy.saturating_add(spin_offset(dy, ball.pos.y, paddle_y, config));
    ball.vel.y = if dy <= 0 {
        spun.max(-config.max_dy).min(-config.min_dy)
    } else {
        spun.min(config.max_dy).max(config.min_dy)
    };
}
