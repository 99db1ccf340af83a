//! End-to-end match scenarios

use ml_pong::persistence::{MatchLog, TrainingExporter};
use ml_pong::sim::{Ball, GamePhase, MatchObserver, Paddle, Paddles, PositionSnapshot, Score};
use ml_pong::{Config, Controller, Match, Side};

fn cpu_config(winning_score: u32) -> Config {
    Config {
        winning_score,
        player_one: Controller::Simple,
        player_two: Controller::Simple,
        ..Default::default()
    }
}

#[test]
fn bottom_wall_reflects_ball() {
    let config = Config {
        width: 80,
        height: 70,
        ..Default::default()
    };
    let mut game = Match::new(config, 1);
    game.ball = Ball::new(40, 69, 2, 4);
    assert_eq!(game.advance_ball(), None);
    assert_eq!(game.ball.pos.y, 69);
    assert_eq!(game.ball.vel.y, -4);
}

#[test]
fn center_paddle_hit_flips_dx_and_counts_volley() {
    let mut game = Match::new(Config::default(), 1);
    game.paddles = Paddles([Paddle { y: 35 }, Paddle { y: 50 }]);
    // Lands on x = 0, y = 35 this tick
    game.ball = Ball::new(4, 31, -4, 4);

    assert_eq!(game.advance_ball(), Some(Side::One));
    assert_eq!(game.ball.pos.x, 1);
    assert_eq!(game.ball.pos.y, 35);
    assert_eq!(game.ball.vel.x, 4);
    assert_eq!(game.ball.vel.y, 4);
    assert_eq!(game.volleys, 1);
}

#[test]
fn serve_distribution() {
    let mut game = Match::new(Config::default(), 2024);
    let mut counts = [0u32; 4];
    let (mut left, mut up) = (0, 0);

    for _ in 0..1000 {
        game.start_new_game();
        assert_eq!(game.ball.vel.x.abs(), 4);
        let dy = game.ball.vel.y.abs();
        assert!((2..6).contains(&dy), "dy {} out of range", dy);
        counts[(dy - 2) as usize] += 1;
        if game.ball.vel.x < 0 {
            left += 1;
        }
        if game.ball.vel.y < 0 {
            up += 1;
        }
    }

    for count in counts {
        assert!((150..=350).contains(&count), "skewed serve counts {:?}", counts);
    }
    assert!((400..=600).contains(&left));
    assert!((400..=600).contains(&up));
}

#[test]
fn empty_dy_range_serves_min_dy() {
    let config = Config {
        min_dy: 3,
        max_dy: 3,
        ..Default::default()
    };
    let mut game = Match::new(config, 5);
    for _ in 0..20 {
        game.start_new_game();
        assert_eq!(game.ball.vel.y.abs(), 3);
    }
}

/// Counts ticks and remembers the tick count when the match was decided
#[derive(Default)]
struct TickCounter {
    ticks: u64,
    decided_at: Option<u64>,
}

impl MatchObserver for TickCounter {
    fn on_tick(&mut self, _positions: PositionSnapshot) {
        self.ticks += 1;
    }

    fn on_game_over(&mut self, _scorer: Side, score: &Score) {
        if score.winner(21).is_some() {
            self.decided_at = Some(self.ticks);
        }
    }
}

#[test]
fn match_stops_at_winning_score() {
    let mut game = Match::new(cpu_config(21), 77);
    let mut counter = TickCounter::default();
    let summary = game.run_simulated_match(&mut counter);

    let winner = summary.winner.expect("winner");
    assert_eq!(summary.score.get(winner), 21);
    assert!(summary.score.get(winner.opponent()) < 21);
    assert_eq!(game.phase, GamePhase::MatchOver);
    assert!(game.is_match_over());
    assert!(game.is_game_over());

    // No tick runs after the deciding point
    assert_eq!(counter.decided_at, Some(counter.ticks));
    assert_eq!(counter.ticks, summary.ticks);
    assert_eq!(game.time_ticks, summary.ticks);

    // Querying a finished match does not advance it
    let ball = game.ball;
    assert!(game.is_game_over());
    assert_eq!(game.time_ticks, summary.ticks);
    assert_eq!(game.ball, ball);
    assert_eq!(game.score, summary.score);
}

#[test]
fn new_game_keeps_score() {
    let mut game = Match::new(cpu_config(3), 8);
    game.ball.pos.x = -3;
    assert!(game.is_game_over());
    game.start_new_game();
    assert_eq!(game.score.two, 1);
    assert_eq!(game.volleys, 0);
    assert_eq!(game.phase, GamePhase::InPlay);
}

#[test]
fn repeated_matches_restart_from_zero() {
    let mut game = Match::new(cpu_config(2), 31);
    let first = game.run_simulated_match(());
    let second = game.run_simulated_match(());
    assert_eq!(first.score.get(first.winner.unwrap()), 2);
    assert_eq!(second.score.get(second.winner.unwrap()), 2);
    assert!(second.games <= 3);
}

#[test]
fn match_log_records_every_tick() {
    let config = cpu_config(2);
    let mut log = MatchLog::new(&config);
    let mut game = Match::new(config, 11);
    let summary = game.run_simulated_match(&mut log);

    assert_eq!(log.frames().len() as u64, summary.ticks);
    assert_eq!(log.data_count() as u64, summary.ticks * 4);

    let parsed = MatchLog::parse(&log.to_text()).unwrap();
    assert_eq!(parsed, log);
    assert_eq!(parsed.frames()[0].ball_x, 62);
}

#[test]
fn warmup_ticks_are_logged_but_not_exported() {
    let config = Config {
        serve_warmup_volleys: 1,
        ..cpu_config(1)
    };
    let mut log = MatchLog::new(&config);
    let mut exporter = TrainingExporter::new(Vec::new(), false);
    let mut game = Match::new(config, 3);
    let summary = game.run_simulated_match((&mut log, &mut exporter));

    assert_eq!(log.frames().len() as u64, summary.ticks);
    assert!(summary.frames_recorded < summary.ticks);
    assert_eq!(exporter.finish().unwrap(), summary.frames_recorded);
}

#[test]
fn same_seed_same_log() {
    let run = |seed| {
        let config = cpu_config(2);
        let mut log = MatchLog::new(&config);
        Match::new(config, seed).run_simulated_match(&mut log);
        log
    };
    assert_eq!(run(123), run(123));
}
