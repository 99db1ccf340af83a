//! Paddle movement: human deltas and the two CPU opponents
//!
//! Every controller moves a paddle by at most one `paddle_step` per call.

use super::state::{Ball, Paddle, Side};
use crate::settings::{Config, Controller};

/// Move a paddle by `delta` and clamp it into the legal band
pub fn move_by_delta(paddle: &mut Paddle, delta: i32, config: &Config) {
    paddle.y = (paddle.y + delta)
        .max(config.paddle_min_y())
        .min(config.paddle_max_y());
}

/// Step toward `target`.
///
/// Both comparisons use the starting position, so a paddle already level
/// with the target steps up and back down again.
pub fn step_toward(paddle: &mut Paddle, target: i32, config: &Config) {
    let y = paddle.y;
    if y >= target {
        move_by_delta(paddle, -config.paddle_step, config);
    }
    if y <= target {
        move_by_delta(paddle, config.paddle_step, config);
    }
}

/// Follow the ball's current height while it approaches `side`
pub fn simple_track(side: Side, ball: &Ball, paddle: &mut Paddle, config: &Config) {
    if side.is_departing(ball.vel.x) {
        return;
    }
    step_toward(paddle, ball.pos.y, config);
}

/// Move toward the height where the ball is projected to leave the field
pub fn forecast_track(_side: Side, ball: &Ball, paddle: &mut Paddle, config: &Config) {
    let target = forecast_y(ball, config);
    step_toward(paddle, target, config);
}

/// Project the ball to the field edge it is travelling toward.
///
/// Only wall bounces are modelled (using the ball's half height as margin);
/// paddles are ignored, and the projection always runs to the edge in the
/// direction of travel, whichever side is asking.
pub fn forecast_y(ball: &Ball, config: &Config) -> i32 {
    let mut pos = ball.pos;
    let mut vel = ball.vel;
    let half_ball = config.ball_height / 2;
    let direction = vel.x.signum();

    let still_inside = |x: i32| match direction {
        1 => x < config.width,
        -1 => x >= 0,
        _ => false,
    };

    while still_inside(pos.x) {
        pos += vel;
        if pos.y + half_ball >= config.height {
            pos.y = config.height;
            vel.y = -vel.y.abs();
        }
        if pos.y - half_ball <= 0 {
            pos.y = 0;
            vel.y = vel.y.abs();
        }
    }

    pos.y
}

/// Run one CPU step for `controller`; humans only move through input
pub fn cpu_move(
    side: Side,
    controller: Controller,
    ball: &Ball,
    paddle: &mut Paddle,
    config: &Config,
) {
    match controller {
        Controller::Human => {}
        Controller::Simple => simple_track(side, ball, paddle, config),
        Controller::Forecast => forecast_track(side, ball, paddle, config),
    }
}
