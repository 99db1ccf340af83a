//! Property tests for the simulation invariants

use ml_pong::sim::{Ball, FrameHistory, Paddle, Paddles, Score, advance, move_by_delta};
use ml_pong::{Config, Match, Side};
use proptest::prelude::*;

proptest! {
    /// Paddles never leave the legal band
    #[test]
    fn prop_paddle_stays_in_band(start in 7i32..=93, deltas in prop::collection::vec(-200i32..200, 1..20)) {
        let config = Config::default();
        let mut paddle = Paddle { y: start };
        for delta in deltas {
            move_by_delta(&mut paddle, delta, &config);
            prop_assert!(paddle.y >= config.paddle_min_y());
            prop_assert!(paddle.y <= config.paddle_max_y());
        }
    }

    /// Every paddle return leaves |dy| inside the configured range
    #[test]
    fn prop_hit_bounds_dy(
        x in 0i32..4,
        extra in 0i32..3,
        paddle_y in 20i32..=80,
        offset in -7i32..=7,
        dy in -6i32..=6,
    ) {
        let config = Config::default();
        let dx = -(x + extra + 1);
        let mut ball = Ball::new(x, paddle_y + offset - dy, dx, dy);
        let paddles = Paddles([Paddle { y: paddle_y }, Paddle { y: 50 }]);

        prop_assert_eq!(advance(&mut ball, &paddles, &config), Some(Side::One));
        prop_assert!(ball.vel.y.abs() >= config.min_dy);
        prop_assert!(ball.vel.y.abs() <= config.max_dy);
        prop_assert_eq!(ball.vel.x, -dx);
        prop_assert_eq!(ball.pos.x, 1);
    }

    /// Between scoring frames the ball stays on the field
    #[test]
    fn prop_ball_stays_on_field(seed in any::<u64>()) {
        let config = Config::default();
        let mut game = Match::new(config.clone(), seed);
        for _ in 0..600 {
            game.tick();
            prop_assert!(game.ball.pos.y >= 0 && game.ball.pos.y <= config.height - 1);
            if game.is_game_over() {
                if game.is_match_over() {
                    break;
                }
                game.start_new_game();
            } else {
                prop_assert!(game.ball.pos.x >= 0 && game.ball.pos.x <= config.width);
            }
        }
    }

    /// History keeps exactly `history_depth` entries, newest first
    #[test]
    fn prop_history_is_bounded_fifo(depth in 1usize..8, xs in prop::collection::vec(0i32..125, 0..20)) {
        let config = Config { history_depth: depth, ..Default::default() };
        let mut history = FrameHistory::new(&config);
        let paddles = Paddles::centered(&config);
        for &x in &xs {
            history.record(&Ball::new(x, 10, 1, 1), &paddles, &config);
            prop_assert_eq!(history.positions().len(), depth);
            prop_assert_eq!(history.rasters().len(), depth);
        }
        for (i, &x) in xs.iter().rev().take(depth).enumerate() {
            prop_assert_eq!(history.positions()[i].ball_x, x);
        }
    }

    /// A new game resets the rally but never the score
    #[test]
    fn prop_new_game_keeps_score(one in 0u32..20, two in 0u32..20, seed in any::<u64>()) {
        let mut game = Match::new(Config::default(), seed);
        game.score = Score { one, two };
        game.volleys = 9;
        game.start_new_game();
        prop_assert_eq!(game.score, Score { one, two });
        prop_assert_eq!(game.volleys, 0);
        prop_assert_eq!(game.ball.vel.x.abs(), 4);
    }
}
